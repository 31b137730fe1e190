//! Deduplicated cache of review-submission receipts.
//!
//! Receipts are stored as one JSON array under a single key (`"submissions"` by
//! default). The cache is best-effort: a missing store, an unreadable value or a
//! failed write never reaches the caller. Reads degrade to an empty list and writes
//! are dropped, with a log line either way. An `add` whose read fails is dropped
//! too, so stored receipts are never replaced by a partial list.

use super::backend::KeyValueStore;
use crate::domain::error::{ClientError, Result};
use crate::domain::SubmissionReceipt;
use std::cell::RefCell;

/// Default store key for the receipt array.
pub const SUBMISSIONS_KEY: &str = "submissions";

/// Receipt cache over an optional local store.
pub struct SubmissionCache {
    store: Option<RefCell<Box<dyn KeyValueStore>>>,
    key: String,
}

impl std::fmt::Debug for SubmissionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionCache")
            .field("available", &self.store.is_some())
            .field("key", &self.key)
            .finish()
    }
}

impl SubmissionCache {
    /// Creates a cache over `store`; `None` models a browser without local storage.
    #[must_use]
    pub fn new(store: Option<Box<dyn KeyValueStore>>, key: impl Into<String>) -> Self {
        Self {
            store: store.map(RefCell::new),
            key: key.into(),
        }
    }

    /// A cache with no backing store. Always lists nothing.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(None, SUBMISSIONS_KEY)
    }

    /// Records a receipt unless one with the same id is already stored.
    ///
    /// First write wins: a duplicate id leaves the stored receipt untouched. Returns
    /// whether the receipt was stored.
    pub fn add(&self, receipt: SubmissionReceipt) -> bool {
        let _span = tracing::debug_span!("cache_add", id = %receipt.id).entered();

        match self.try_add(receipt) {
            Ok(stored) => {
                tracing::debug!(stored, "receipt processed");
                stored
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to record submission receipt");
                false
            }
        }
    }

    fn try_add(&self, receipt: SubmissionReceipt) -> Result<bool> {
        let Some(store) = &self.store else {
            return Err(ClientError::Storage("local storage unavailable".to_string()));
        };

        let mut receipts = self.load(store)?;
        if receipts.iter().any(|r| r.id == receipt.id) {
            return Ok(false);
        }
        receipts.push(receipt);

        let json = serde_json::to_string(&receipts)?;
        store.borrow_mut().set(&self.key, &json)?;
        Ok(true)
    }

    /// Every stored receipt, most recent first.
    #[must_use]
    pub fn list(&self) -> Vec<SubmissionReceipt> {
        let mut receipts = self.read_all();
        receipts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        receipts
    }

    /// Deletes every receipt.
    pub fn clear(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.borrow_mut().remove(&self.key) {
            tracing::warn!(error = %e, "failed to clear submission receipts");
        }
    }

    /// Stored receipts in insertion order; any failure reads as empty.
    fn read_all(&self) -> Vec<SubmissionReceipt> {
        let Some(store) = &self.store else {
            tracing::debug!("local storage unavailable, no receipts");
            return Vec::new();
        };

        self.load(store).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read submission receipts");
            Vec::new()
        })
    }

    /// Reads the stored array. A failed read is an error; an unreadable value
    /// counts as no receipts.
    fn load(&self, store: &RefCell<Box<dyn KeyValueStore>>) -> Result<Vec<SubmissionReceipt>> {
        let Some(raw) = store.borrow().get(&self.key)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding unreadable submission receipts");
            Vec::new()
        }))
    }
}
