//! Book search flow.
//!
//! The search form posts to whatever its `action` attribute currently says, so
//! switching provider is just rewriting that attribute. Remote results render as
//! selectable cards feeding the review view; results from the site's own catalog
//! render as plain cards linking to the book page.

use super::submission::{RequestSequencer, SubmissionController};
use crate::dom::{Document, Element, NodeId, SubmitEvent};
use crate::domain::error::Result;
use crate::domain::{BookResult, SearchPage};
use crate::ui::{self, NO_RESULTS};

/// Which catalog a search form queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSource {
    /// An external provider; results can be selected for review.
    #[default]
    Remote,
    /// The site's own catalog; results link to existing book pages.
    Local,
}

impl SearchSource {
    fn card(self, book: &BookResult) -> Element {
        match self {
            Self::Remote => ui::book_card(book),
            Self::Local => ui::local_book_card(book),
        }
    }
}

/// Search form submission and result rendering.
#[derive(Debug)]
pub struct SearchFlow {
    controller: SubmissionController,
    sequencer: RequestSequencer,
    fallback_url: String,
}

impl SearchFlow {
    /// `fallback_url` is used when the form has no `action` attribute.
    #[must_use]
    pub fn new(controller: SubmissionController, fallback_url: impl Into<String>) -> Self {
        Self {
            controller,
            sequencer: RequestSequencer::new(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Submits the search form and renders the outcome into `results`.
    ///
    /// Returns the ids of the rendered cards. Empty results and failures render a
    /// message instead and return no ids, as does a response overtaken by a newer
    /// search.
    ///
    /// # Errors
    ///
    /// Returns an error only if `results` is not part of the document.
    pub async fn submit_search(
        &self,
        event: &mut SubmitEvent,
        results: NodeId,
        source: SearchSource,
        loader: Option<NodeId>,
    ) -> Result<Vec<NodeId>> {
        let dom = self.controller.dom();
        let url = dom
            .read(|doc| doc.attr(event.form(), "action").map(str::to_string))
            .filter(|action| !action.is_empty())
            .unwrap_or_else(|| self.fallback_url.clone());

        let submission = self
            .controller
            .submit::<SearchPage>(event, &url, loader, &self.sequencer)
            .await;

        let _span = tracing::debug_span!(
            "search_results",
            ?source,
            ticket = submission.ticket.sequence()
        )
        .entered();
        if !self.sequencer.admit(submission.ticket) {
            return Ok(Vec::new());
        }

        let envelope = submission.envelope;
        if !envelope.is_success() {
            dom.write(|doc| ui::write_errors(doc, results, &envelope));
            return Ok(Vec::new());
        }

        let books = envelope.into_data().map(|page| page.results).unwrap_or_default();
        dom.write(|doc| render_books(doc, results, &books, source))
    }
}

fn render_books(
    doc: &mut Document,
    results: NodeId,
    books: &[BookResult],
    source: SearchSource,
) -> Result<Vec<NodeId>> {
    if books.is_empty() {
        tracing::debug!("no results");
        doc.set_text(results, NO_RESULTS);
        return Ok(Vec::new());
    }

    doc.set_text(results, "");
    let cards: Vec<Element> = books.iter().map(|book| source.card(book)).collect();
    let ids = ui::append_all(doc, results, &cards)?;
    tracing::debug!(count = ids.len(), "rendered search results");
    Ok(ids)
}

/// Points the search form at another provider's endpoint.
pub fn change_provider(doc: &mut Document, form: NodeId, action: &str) {
    tracing::debug!(action = %action, "search provider changed");
    doc.set_attr(form, "action", action);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_render_message() {
        let mut doc = Document::new();
        let results = doc.mount(doc.body(), &Element::new("div")).unwrap();
        doc.mount(results, &Element::new("div").class("book-card")).unwrap();

        let ids = render_books(&mut doc, results, &[], SearchSource::Remote).unwrap();
        assert!(ids.is_empty());
        assert!(doc.children(results).is_empty());
        assert_eq!(doc.text_content(results), NO_RESULTS);
    }

    #[test]
    fn results_replace_earlier_content() {
        let mut doc = Document::new();
        let results = doc.mount(doc.body(), &Element::new("div")).unwrap();
        doc.set_text(results, NO_RESULTS);

        let books = vec![
            BookResult {
                title: "Dune".to_string(),
                ..BookResult::default()
            },
            BookResult {
                title: "Emma".to_string(),
                ..BookResult::default()
            },
        ];
        let ids = render_books(&mut doc, results, &books, SearchSource::Local).unwrap();
        assert_eq!(doc.children(results), ids.as_slice());
        assert!(!doc.text_content(results).contains(NO_RESULTS));
        assert!(ids.iter().all(|&id| doc.has_class(id, ui::BOOK_CARD)));
    }

    #[test]
    fn provider_change_rewrites_action() {
        let mut doc = Document::new();
        let form = doc
            .mount(doc.body(), &Element::new("form").attr("action", "/api/search-books"))
            .unwrap();
        change_provider(&mut doc, form, "/api/search-local");
        assert_eq!(doc.attr(form, "action"), Some("/api/search-local"));
    }
}
