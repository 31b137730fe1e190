//! Cursor-based "load more" for the review feed.
//!
//! The feed form carries the cursor (and the id of the last review shown) in hidden
//! fields. Each submission sends them back verbatim; a successful page is appended
//! after the reviews already on screen and the hidden fields are overwritten with the
//! tokens the server issued for the next page. The client never invents or advances
//! a cursor on its own.

use super::submission::{RequestSequencer, SubmissionController};
use crate::dom::{Document, NodeId, SubmitEvent};
use crate::domain::error::Result;
use crate::domain::FeedPage;
use crate::ui::{self, NO_RESULTS};

/// Elements touched by one "load more" round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedRegions {
    /// Container the review articles are appended to.
    pub feed: NodeId,
    /// Hidden field holding the current cursor.
    pub cursor_field: NodeId,
    /// Hidden field holding the last review id, when the form has one.
    pub review_id_field: Option<NodeId>,
    /// Where failures and empty pages are reported.
    pub error_region: NodeId,
}

/// Drives the review feed's pagination.
#[derive(Debug)]
pub struct PaginationController {
    controller: SubmissionController,
    sequencer: RequestSequencer,
    feed_url: String,
}

impl PaginationController {
    #[must_use]
    pub fn new(controller: SubmissionController, feed_url: impl Into<String>) -> Self {
        Self {
            controller,
            sequencer: RequestSequencer::new(),
            feed_url: feed_url.into(),
        }
    }

    /// Fetches the next page of reviews and appends it to the feed.
    ///
    /// Returns the ids of the appended articles. An empty page or a failure leaves
    /// the feed and the cursor untouched and reports into the error region. Calling
    /// again with an unchanged cursor simply asks for the same page again.
    ///
    /// # Errors
    ///
    /// Returns an error only if the feed container is not part of the document.
    pub async fn load_more(
        &self,
        event: &mut SubmitEvent,
        regions: FeedRegions,
        loader: Option<NodeId>,
    ) -> Result<Vec<NodeId>> {
        let submission = self
            .controller
            .submit::<FeedPage>(event, &self.feed_url, loader, &self.sequencer)
            .await;

        let _span =
            tracing::debug_span!("feed_page", ticket = submission.ticket.sequence()).entered();
        if !self.sequencer.admit(submission.ticket) {
            return Ok(Vec::new());
        }

        let envelope = submission.envelope;
        let dom = self.controller.dom();
        match envelope.data() {
            Some(page) if !page.results.is_empty() => {
                dom.write(|doc| append_page(doc, regions, page))
            }
            Some(_) => {
                let message = envelope.message().unwrap_or(NO_RESULTS).to_string();
                tracing::debug!(message = %message, "empty feed page");
                dom.write(|doc| doc.set_text(regions.error_region, &message));
                Ok(Vec::new())
            }
            None => {
                dom.write(|doc| ui::write_errors(doc, regions.error_region, &envelope));
                Ok(Vec::new())
            }
        }
    }
}

fn append_page(doc: &mut Document, regions: FeedRegions, page: &FeedPage) -> Result<Vec<NodeId>> {
    let articles: Vec<_> = page.results.iter().map(ui::review_article).collect();
    let ids = ui::append_all(doc, regions.feed, &articles)?;

    let cursor = page.next_cursor.as_ref().map_or("", |c| c.as_str());
    doc.set_value(regions.cursor_field, cursor);
    if let Some(field) = regions.review_id_field {
        doc.set_value(field, page.next_review_id.as_deref().unwrap_or_default());
    }
    doc.set_text(regions.error_region, "");

    tracing::debug!(appended = ids.len(), next_cursor = %cursor, "feed page appended");
    Ok(ids)
}

/// Expands or collapses a long review article.
///
/// Returns whether the review is now expanded. Articles without an expand button
/// are left alone and report `false`.
pub fn toggle_review_expansion(doc: &mut Document, article: NodeId) -> bool {
    let (Some(button), Some(content)) = (
        doc.query_class(article, ui::EXPAND_BUTTON),
        doc.query_class(article, ui::REVIEW_CONTENT),
    ) else {
        return false;
    };

    let expanded = doc.toggle_class(content, ui::REVIEW_CONTENT_EXPANDED);
    if expanded {
        doc.add_class(article, ui::REVIEW_ARTICLE_EXPANDED);
        doc.set_text(button, ui::HIDE_LABEL);
    } else {
        doc.remove_class(article, ui::REVIEW_ARTICLE_EXPANDED);
        doc.set_text(button, ui::EXPAND_LABEL);
    }
    expanded
}
