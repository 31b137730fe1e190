//! Search ↔ review view state machine.
//!
//! The add-book page has two views. In the search view the search form and its
//! result cards are visible. Selecting a card moves that card into the review form's
//! card slot and switches to the review view. Going back puts the card exactly where
//! it came from and switches back.
//!
//! # State Machine
//!
//! ```text
//!            select(card)
//! Searching ─────────────→ Reviewing { card }
//!     ↑                         │
//!     └──────── back() ─────────┘
//! ```
//!
//! The card's original position is kept in a [`ViewTransitionRecord`] owned by the
//! machine. Selecting again overwrites it; going back consumes it.

use crate::dom::{Document, Dom, NodeId};
use crate::domain::error::{ClientError, Result};
use crate::ui::OPENLIB_ID;

/// Id of the search form's container.
pub const SEARCH_ID: &str = "search";
/// Id of the results container.
pub const RESULTS_ID: &str = "results";
/// Id of the review form's container.
pub const REVIEW_FORM_ID: &str = "review-form";
/// Id of the slot the selected card is shown in.
pub const REVIEW_CARD_CONTAINER_ID: &str = "review-card-container";
/// Id of the hidden field receiving the selected work key.
pub const OPENLIB_ID_FIELD_ID: &str = "openlib-id-hidden";

/// Elements the view machine switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub search: NodeId,
    pub results: NodeId,
    pub review_form: NodeId,
    pub review_card_container: NodeId,
    pub openlib_id_field: NodeId,
}

impl ViewLayout {
    /// Looks up every container by its document id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Dom`] naming the first id missing from the page.
    pub fn resolve(dom: &Dom) -> Result<Self> {
        Ok(Self {
            search: dom.require(SEARCH_ID)?,
            results: dom.require(RESULTS_ID)?,
            review_form: dom.require(REVIEW_FORM_ID)?,
            review_card_container: dom.require(REVIEW_CARD_CONTAINER_ID)?,
            openlib_id_field: dom.require(OPENLIB_ID_FIELD_ID)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Searching,
    Reviewing {
        card: NodeId,
    },
}

/// Where a selected card lived before it was moved into the review view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTransitionRecord {
    pub parent: NodeId,
    pub next_sibling: Option<NodeId>,
}

/// Two-state view controller for one page.
#[derive(Debug)]
pub struct ViewStateMachine {
    dom: Dom,
    layout: ViewLayout,
    state: ViewState,
    record: Option<ViewTransitionRecord>,
}

impl ViewStateMachine {
    #[must_use]
    pub fn new(dom: Dom, layout: ViewLayout) -> Self {
        Self {
            dom,
            layout,
            state: ViewState::Searching,
            record: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub const fn record(&self) -> Option<ViewTransitionRecord> {
        self.record
    }

    #[must_use]
    pub const fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    /// Moves `card` into the review view and switches to it.
    ///
    /// Records the card's parent and next sibling, replacing any earlier record. The
    /// card slot is emptied first, so a card selected earlier is detached rather than
    /// returned to the results.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Dom`] if the card is unknown or has no parent.
    pub fn select(&mut self, card: NodeId) -> Result<()> {
        let _span = tracing::debug_span!("view_select", card = ?card).entered();

        if self.state == (ViewState::Reviewing { card }) {
            tracing::debug!("card already selected");
            return Ok(());
        }

        let layout = self.layout;
        let record = self.dom.write(|doc| -> Result<ViewTransitionRecord> {
            let parent = doc
                .parent(card)
                .ok_or_else(|| ClientError::Dom("selected card is not attached".to_string()))?;
            let record = ViewTransitionRecord {
                parent,
                next_sibling: doc.next_sibling(card),
            };

            doc.clear_children(layout.review_card_container);
            doc.append_child(layout.review_card_container, card)?;

            let work_key = doc
                .query_class(card, OPENLIB_ID)
                .map(|id| doc.text_content(id))
                .unwrap_or_default();
            doc.set_value(layout.openlib_id_field, &work_key);

            show_review(doc, &layout);
            Ok(record)
        })?;

        if self.record.replace(record).is_some() {
            tracing::debug!("replacing earlier capture");
        }
        self.state = ViewState::Reviewing { card };
        tracing::debug!(parent = ?record.parent, next_sibling = ?record.next_sibling, "card captured");
        Ok(())
    }

    /// Returns to the search view, restoring the selected card if one was captured.
    ///
    /// The card goes back before its recorded next sibling when that sibling is still
    /// a child of the recorded parent, and is appended to the parent otherwise.
    /// Without a capture only the visibility changes. Never fails.
    pub fn back(&mut self) {
        let _span = tracing::debug_span!("view_back", state = ?self.state).entered();

        let record = self.record.take();
        let card = match self.state {
            ViewState::Reviewing { card } => Some(card),
            ViewState::Searching => None,
        };
        let layout = self.layout;

        self.dom.write(|doc| {
            if let (Some(record), Some(card)) = (record, card) {
                if let Err(e) = restore(doc, card, record) {
                    tracing::warn!(error = %e, "could not restore selected card");
                }
            } else {
                tracing::debug!("nothing captured, toggling visibility only");
            }
            show_search(doc, &layout);
        });

        self.state = ViewState::Searching;
    }
}

fn restore(doc: &mut Document, card: NodeId, record: ViewTransitionRecord) -> Result<()> {
    match record.next_sibling {
        Some(sibling) if doc.parent(sibling) == Some(record.parent) => {
            doc.insert_before(record.parent, card, sibling)
        }
        _ => doc.append_child(record.parent, card),
    }
}

fn show_review(doc: &mut Document, layout: &ViewLayout) {
    doc.hide(layout.search);
    doc.hide(layout.results);
    doc.show(layout.review_form);
}

fn show_search(doc: &mut Document, layout: &ViewLayout) {
    doc.show(layout.search);
    doc.show(layout.results);
    doc.hide(layout.review_form);
}
