//! Domain layer for the shelfnote client.
//!
//! Core data types exchanged with the server or kept in local storage, independent
//! of the document model and the transport.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book and review-feed payloads
//! - [`envelope`]: The response envelope, cursors and per-endpoint payloads
//! - [`receipt`]: Locally cached submission receipts
//! - `wire`: Lenient decoders for loosely typed server fields

pub mod book;
pub mod envelope;
pub mod error;
pub mod receipt;
mod wire;

pub use book::{openlib_link, BookResult, LinkOut, ReviewFeedItem};
pub use envelope::{
    CsrfToken, Cursor, FeedPage, RawEnvelope, ResponseEnvelope, SearchPage, SubmissionAck,
    GENERIC_FAILURE,
};
pub use error::{ClientError, Result};
pub use receipt::SubmissionReceipt;
