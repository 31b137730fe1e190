//! Storage layer for locally persisted client state.
//!
//! The only persisted state is the list of review-submission receipts shown on the
//! confirmation page. It lives in a browser-local key/value store, so it is
//! single-profile and best-effort by nature.
//!
//! # Modules
//!
//! - `backend`: Key/value store trait
//! - `memory`: In-process store
//! - `json`: JSON file store with atomic writes
//! - `cache`: Deduplicated receipt cache

pub mod backend;
pub mod cache;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use cache::{SubmissionCache, SUBMISSIONS_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
