//! Document model the client renders into.
//!
//! The controllers never talk to a browser directly. They operate on a [`Document`]
//! shared through a [`Dom`] handle, which the host keeps in sync with the real page
//! (or which tests inspect directly).
//!
//! # Modules
//!
//! - [`document`]: Arena tree with DOM-like structural operations
//! - [`element`]: Pure fragments produced by the card builders

pub mod document;
pub mod element;

pub use document::{Document, NodeId, HIDDEN};
pub use element::Element;

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the page's document.
///
/// Everything runs on the single UI thread, so the document lives in an
/// `Rc<RefCell<_>>`. Borrows are scoped to the closure passed to [`Dom::read`] or
/// [`Dom::write`] and are never held across a network await.
#[derive(Debug, Clone, Default)]
pub struct Dom(Rc<RefCell<Document>>);

impl Dom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self(Rc::new(RefCell::new(document)))
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Like [`Dom::write`], but returns `None` instead of panicking when the document
    /// is already borrowed. Used from `Drop` impls.
    pub fn try_write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> Option<R> {
        self.0.try_borrow_mut().ok().map(|mut doc| f(&mut doc))
    }

    /// Resolves an element id, failing with a document error when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Dom`](crate::ClientError::Dom) if no connected element
    /// has this id.
    pub fn require(&self, id: &str) -> crate::Result<NodeId> {
        self.read(|doc| doc.get_element_by_id(id))
            .ok_or_else(|| crate::ClientError::Dom(format!("missing element #{id}")))
    }
}

/// Serialized form fields, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormPayload(Vec<(String, String)>);

impl FormPayload {
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Value of the first field named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A form submission event.
///
/// Mirrors the browser event enough for the pipeline: the submitted form and whether
/// native navigation has been suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    form: NodeId,
    default_prevented: bool,
}

impl SubmitEvent {
    #[must_use]
    pub const fn new(form: NodeId) -> Self {
        Self {
            form,
            default_prevented: false,
        }
    }

    #[must_use]
    pub const fn form(&self) -> NodeId {
        self.form
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
