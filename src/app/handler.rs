//! Event handling for the page.
//!
//! The host page forwards DOM events to [`App::handle_event`], which routes each one
//! to the flow responsible for it and returns the [`Action`]s the host must perform.
//!
//! # Event Types
//!
//! - **Lifecycle**: `PageLoaded`
//! - **Search view**: `SubmitSearch`, `ChangeSearchProvider`, `SelectCard`, `Back`
//! - **Review form**: `SubmitReview`, `ReviewInput`
//! - **Review feed**: `FetchMoreReviews`, `ToggleReviewExpansion`
//! - **Confirmation page**: `ClearSubmissions`
//!
//! Submit events always suppress the form's native navigation. Network and storage
//! failures are reported on the page and never surface as errors here.
//!
//! # Example
//!
//! ```rust
//! use shelfnote::{App, Config, Event};
//! use shelfnote::dom::{Document, Dom};
//! # use shelfnote::http::{HttpReply, Transport};
//! # use shelfnote::dom::FormPayload;
//! # use futures_util::future::{FutureExt, LocalBoxFuture};
//! # struct Offline;
//! # impl Transport for Offline {
//! #     fn post_form<'a>(&'a self, _: &'a str, _: &'a FormPayload) -> LocalBoxFuture<'a, shelfnote::Result<HttpReply>> {
//! #         async { Err(shelfnote::ClientError::Transport("offline".into())) }.boxed_local()
//! #     }
//! #     fn get<'a>(&'a self, _: &'a str) -> LocalBoxFuture<'a, shelfnote::Result<HttpReply>> {
//! #         async { Err(shelfnote::ClientError::Transport("offline".into())) }.boxed_local()
//! #     }
//! # }
//! use shelfnote::storage::SubmissionCache;
//! use std::rc::Rc;
//!
//! let app = App::new(
//!     Config::default(),
//!     Dom::new(Document::new()),
//!     Rc::new(Offline),
//!     SubmissionCache::unavailable(),
//! );
//! // an empty page has nothing to go back from
//! assert!(futures::executor::block_on(app.handle_event(&Event::Back)).is_err());
//! ```

use super::confirmation;
use super::csrf::populate_csrf_tokens;
use super::pagination::{toggle_review_expansion, FeedRegions};
use super::review::{review_counter_text, REVIEW_FIELD};
use super::search::{change_provider, SearchSource};
use super::{Action, App};
use crate::dom::{NodeId, SubmitEvent};
use crate::domain::error::{ClientError, Result};
use tracing::Instrument;

/// Id of the search form.
pub const SEARCH_FORM_ID: &str = "search-form";
/// Id of the review form.
pub const SUBMIT_FORM_ID: &str = "submit-form";
/// Id of the region showing review submission errors.
pub const REVIEW_ERRORS_ID: &str = "review-form-errors";
/// Id of the review word counter.
pub const TEXT_COUNTER_ID: &str = "text-counter";
/// Id of the feed's "load more" form.
pub const FEED_FORM_ID: &str = "fetch-reviews-form";
/// Id of the container holding the review feed.
pub const FEED_ID: &str = "review-bookshelves";
/// Id of the hidden cursor field.
pub const CURSOR_FIELD_ID: &str = "cursor";
/// Id of the hidden last-review-id field.
pub const REVIEW_ID_FIELD_ID: &str = "review-id";
/// Id of the region showing feed errors.
pub const FEED_ERRORS_ID: &str = "fetch-form-errors";
/// Id of the confirmation page's receipt list.
pub const SUBMISSIONS_CONTAINER_ID: &str = "submissions-container";

/// Events the host page forwards to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The document finished loading. Populates CSRF fields and, on the
    /// confirmation page, renders the stored receipts.
    PageLoaded,
    /// The search form was submitted.
    SubmitSearch {
        /// Catalog the form queries, which decides how results render.
        source: SearchSource,
    },
    /// A result card's "Select" button was clicked.
    SelectCard {
        /// The card element.
        card: NodeId,
    },
    /// The review form's "Back" button was clicked.
    Back,
    /// The review form was submitted.
    SubmitReview,
    /// The feed's "load more" form was submitted.
    FetchMoreReviews,
    /// A long review's expand button was clicked.
    ToggleReviewExpansion {
        /// The review article.
        article: NodeId,
    },
    /// The review textarea changed.
    ReviewInput,
    /// Another search provider was picked.
    ChangeSearchProvider {
        /// Endpoint the search form should post to.
        action: String,
    },
    /// The confirmation page's "clear" button was clicked.
    ClearSubmissions,
}

impl App {
    /// Processes one event and returns the actions the host must execute.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Dom`] when the event needs markup the page does not
    /// have. Everything else is handled on the page.
    pub async fn handle_event(&self, event: &Event) -> Result<Vec<Action>> {
        let span = tracing::debug_span!("handle_event", event_type = ?event);
        self.dispatch(event).instrument(span).await
    }

    async fn dispatch(&self, event: &Event) -> Result<Vec<Action>> {
        match event {
            Event::PageLoaded => {
                self.page_loaded().await?;
                Ok(vec![])
            }
            Event::SubmitSearch { source } => {
                let form = self.dom.require(SEARCH_FORM_ID)?;
                let results = self.dom.require(super::view::RESULTS_ID)?;
                let mut submit = SubmitEvent::new(form);
                let cards = self
                    .search
                    .submit_search(&mut submit, results, *source, self.loader())
                    .await?;
                tracing::debug!(cards = cards.len(), "search handled");
                Ok(vec![])
            }
            Event::SelectCard { card } => {
                self.with_view(|view| view.select(*card))?;
                Ok(vec![])
            }
            Event::Back => {
                self.with_view(|view| {
                    view.back();
                    Ok(())
                })?;
                Ok(vec![])
            }
            Event::SubmitReview => {
                let form = self.dom.require(SUBMIT_FORM_ID)?;
                let errors = self.dom.require(REVIEW_ERRORS_ID)?;
                let mut submit = SubmitEvent::new(form);
                Ok(self
                    .review
                    .submit_review(&mut submit, errors, self.loader())
                    .await)
            }
            Event::FetchMoreReviews => {
                let form = self.dom.require(FEED_FORM_ID)?;
                let regions = FeedRegions {
                    feed: self.dom.require(FEED_ID)?,
                    cursor_field: self.dom.require(CURSOR_FIELD_ID)?,
                    review_id_field: self
                        .dom
                        .read(|doc| doc.get_element_by_id(REVIEW_ID_FIELD_ID)),
                    error_region: self.dom.require(FEED_ERRORS_ID)?,
                };
                let mut submit = SubmitEvent::new(form);
                self.feed
                    .load_more(&mut submit, regions, self.loader())
                    .await?;
                Ok(vec![])
            }
            Event::ToggleReviewExpansion { article } => {
                let expanded = self.dom.write(|doc| toggle_review_expansion(doc, *article));
                tracing::debug!(expanded, "review expansion toggled");
                Ok(vec![])
            }
            Event::ReviewInput => {
                let form = self.dom.require(SUBMIT_FORM_ID)?;
                let counter = self.dom.require(TEXT_COUNTER_ID)?;
                self.dom.write(|doc| -> Result<Vec<Action>> {
                    let field = doc.field(form, REVIEW_FIELD).ok_or_else(|| {
                        ClientError::Dom(format!("missing field {REVIEW_FIELD:?}"))
                    })?;
                    let text = review_counter_text(doc.value(field));
                    doc.set_text(counter, &text);
                    Ok(vec![])
                })
            }
            Event::ChangeSearchProvider { action } => {
                let form = self.dom.require(SEARCH_FORM_ID)?;
                self.dom.write(|doc| change_provider(doc, form, action));
                Ok(vec![])
            }
            Event::ClearSubmissions => {
                let container = self.dom.require(SUBMISSIONS_CONTAINER_ID)?;
                self.dom
                    .write(|doc| confirmation::clear_submissions(&self.cache, doc, container));
                Ok(vec![])
            }
        }
    }

    async fn page_loaded(&self) -> Result<()> {
        let csrf_url = self.config.url(&self.config.csrf_endpoint);
        populate_csrf_tokens(&self.dom, &self.client, &csrf_url).await;

        let container = self
            .dom
            .read(|doc| doc.get_element_by_id(SUBMISSIONS_CONTAINER_ID));
        if let Some(container) = container {
            let receipts = self.cache.list();
            tracing::debug!(count = receipts.len(), "rendering submission receipts");
            self.dom
                .write(|doc| confirmation::render_submissions(doc, container, &receipts))?;
        }
        Ok(())
    }
}
