//! Actions representing side effects the host page must carry out.
//!
//! Most events are handled entirely inside the client: they rewrite the document
//! and return nothing. Effects the document model cannot express are returned as
//! [`Action`]s for the host to execute in order.
//!
//! # Example
//!
//! ```rust
//! use shelfnote::Action;
//!
//! let actions = vec![Action::Navigate("/submission".to_string())];
//! for action in &actions {
//!     match action {
//!         Action::Navigate(url) => println!("navigating to {url}"),
//!     }
//! }
//! ```

/// Commands produced by the event handler for the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Loads another page, like assigning `window.location.href`.
    ///
    /// Sent after a review is accepted, pointing at the confirmation page.
    Navigate(String),
}
