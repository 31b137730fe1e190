//! Confirmation page listing the receipts of submitted reviews.

use crate::dom::{Document, NodeId};
use crate::domain::error::Result;
use crate::domain::SubmissionReceipt;
use crate::storage::SubmissionCache;
use crate::ui::{self, NO_SUBMISSIONS};

/// Renders one entry per receipt into `container`, in the order given.
///
/// An empty list renders [`NO_SUBMISSIONS`] instead.
///
/// # Errors
///
/// Returns an error if `container` is not part of the document.
pub fn render_submissions(
    doc: &mut Document,
    container: NodeId,
    receipts: &[SubmissionReceipt],
) -> Result<Vec<NodeId>> {
    if receipts.is_empty() {
        doc.set_text(container, NO_SUBMISSIONS);
        return Ok(Vec::new());
    }

    doc.set_text(container, "");
    let entries: Vec<_> = receipts.iter().map(ui::submission_entry).collect();
    ui::append_all(doc, container, &entries)
}

/// Forgets every receipt and shows the empty-state message.
pub fn clear_submissions(cache: &SubmissionCache, doc: &mut Document, container: NodeId) {
    tracing::info!("clearing submission receipts");
    cache.clear();
    doc.set_text(container, NO_SUBMISSIONS);
}
