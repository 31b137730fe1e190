//! Review submission flow.
//!
//! A successful submission is recorded as a [`SubmissionReceipt`] in the local cache
//! before the page navigates to the confirmation view, which lists the receipts.

use super::actions::Action;
use super::submission::{RequestSequencer, SubmissionController};
use crate::dom::{NodeId, SubmitEvent};
use crate::domain::{SubmissionAck, SubmissionReceipt};
use crate::storage::SubmissionCache;
use crate::ui;
use std::rc::Rc;

/// Maximum review length advertised next to the review textarea.
pub const REVIEW_WORD_LIMIT: usize = 1500;

/// Name of the review text field.
pub const REVIEW_FIELD: &str = "review";

/// Name of the hidden field holding the selected work key.
pub const OPENLIB_ID_FIELD: &str = "openlib_id_hidden";

/// Counter text for the review textarea, e.g. `"3/1500"`.
///
/// Counts space-separated segments, so an empty text counts as one.
#[must_use]
pub fn review_counter_text(text: &str) -> String {
    format!("{}/{REVIEW_WORD_LIMIT}", text.split(' ').count())
}

/// Review form submission.
#[derive(Debug)]
pub struct ReviewFlow {
    controller: SubmissionController,
    sequencer: RequestSequencer,
    cache: Rc<SubmissionCache>,
    submit_url: String,
    confirmation_page: String,
}

impl ReviewFlow {
    #[must_use]
    pub fn new(
        controller: SubmissionController,
        cache: Rc<SubmissionCache>,
        submit_url: impl Into<String>,
        confirmation_page: impl Into<String>,
    ) -> Self {
        Self {
            controller,
            sequencer: RequestSequencer::new(),
            cache,
            submit_url: submit_url.into(),
            confirmation_page: confirmation_page.into(),
        }
    }

    /// Submits the review form.
    ///
    /// On success the receipt is cached and the returned actions navigate to the
    /// confirmation page. On failure the errors are written to `error_region` and the
    /// view is left as it was.
    pub async fn submit_review(
        &self,
        event: &mut SubmitEvent,
        error_region: NodeId,
        loader: Option<NodeId>,
    ) -> Vec<Action> {
        let submission = self
            .controller
            .submit::<SubmissionAck>(event, &self.submit_url, loader, &self.sequencer)
            .await;

        let _span =
            tracing::debug_span!("review_submitted", ticket = submission.ticket.sequence()).entered();
        if !self.sequencer.admit(submission.ticket) {
            return Vec::new();
        }

        let envelope = submission.envelope;
        let dom = self.controller.dom();
        let Some(ack) = envelope.data() else {
            dom.write(|doc| ui::write_errors(doc, error_region, &envelope));
            return Vec::new();
        };

        let fields = dom.read(|doc| doc.form_payload(event.form()));
        let receipt = SubmissionReceipt::new(
            ack.submission_id.clone(),
            fields.get(REVIEW_FIELD).unwrap_or_default(),
            fields.get(OPENLIB_ID_FIELD).unwrap_or_default(),
        );
        tracing::info!(submission_id = %receipt.id, "review submitted");
        self.cache.add(receipt);

        vec![Action::Navigate(self.confirmation_page.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_counts_space_separated_segments() {
        assert_eq!(review_counter_text(""), "1/1500");
        assert_eq!(review_counter_text("a great read"), "3/1500");
        assert_eq!(review_counter_text("two  spaces"), "3/1500");
    }
}
