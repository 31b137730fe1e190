//! Shared rendering helpers used by every flow.

use crate::dom::{Document, Element, NodeId};
use crate::domain::error::Result;
use crate::domain::ResponseEnvelope;

/// Shown in a results region when a successful search or feed page is empty.
pub const NO_RESULTS: &str = "No results found.";

/// Shown on the confirmation page when no receipt is stored.
pub const NO_SUBMISSIONS: &str = "No submissions found.";

/// Replaces the region's content with the envelope's error text.
///
/// Any cards previously rendered into the region are detached.
pub fn write_errors<T>(doc: &mut Document, region: NodeId, envelope: &ResponseEnvelope<T>) {
    let text = envelope.error_text();
    tracing::debug!(region = ?region, text = %text, "writing errors");
    doc.set_text(region, &text);
}

/// Mounts each fragment at the end of `container`, in order.
///
/// # Errors
///
/// Returns an error if `container` is not part of the document.
pub fn append_all<'a>(
    doc: &mut Document,
    container: NodeId,
    fragments: impl IntoIterator<Item = &'a Element>,
) -> Result<Vec<NodeId>> {
    fragments
        .into_iter()
        .map(|fragment| doc.mount(container, fragment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn errors_replace_region_content() {
        let mut doc = Document::new();
        let region = doc.mount(doc.body(), &Element::new("div")).unwrap();
        doc.mount(region, &Element::new("div").class("book-card")).unwrap();

        let errors = BTreeMap::from([("q".to_string(), "required".to_string())]);
        let envelope: ResponseEnvelope<()> =
            ResponseEnvelope::rejected(Some("Bad search.".to_string()), Some(errors));
        write_errors(&mut doc, region, &envelope);

        assert!(doc.children(region).is_empty());
        assert_eq!(doc.text_content(region), "Bad search. q: required");
    }

    #[test]
    fn fragments_are_appended_in_order() {
        let mut doc = Document::new();
        let list = doc.mount(doc.body(), &Element::new("ul")).unwrap();
        let items = [Element::new("li").text("a"), Element::new("li").text("b")];

        let ids = append_all(&mut doc, list, &items).unwrap();
        assert_eq!(doc.children(list), ids.as_slice());
        assert_eq!(doc.text_content(list), "ab");
    }
}
