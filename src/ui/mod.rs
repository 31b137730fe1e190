//! Rendering layer.
//!
//! Everything here is a pure function from data to an [`Element`](crate::dom::Element)
//! fragment, plus a couple of helpers that place fragments and messages into the
//! document. Controllers decide *where* things go; this module decides what they
//! look like.
//!
//! # Modules
//!
//! - [`cards`]: Book cards, review articles and confirmation entries
//! - [`helpers`]: Empty-state messages, error regions, bulk mounting

pub mod cards;
pub mod helpers;

pub use cards::{
    book_card, local_book_card, review_article, submission_entry, BOOK_CARD, EXPAND_BUTTON,
    EXPAND_LABEL, HIDE_LABEL, OPENLIB_ID, REVIEW_ARTICLE, REVIEW_ARTICLE_EXPANDED,
    REVIEW_CONTENT, REVIEW_CONTENT_EXPANDED, SELECT_BUTTON, SNIPPET_LIMIT,
};
pub use helpers::{append_all, write_errors, NO_RESULTS, NO_SUBMISSIONS};
