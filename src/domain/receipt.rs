//! Locally cached record of a successfully submitted review.

use super::wire;
use serde::{Deserialize, Serialize};

/// Receipt for one review submission, keyed by the server-issued submission id.
///
/// Created on the client right after the server accepts a review, and kept in the
/// browser's local store until the user clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Server-issued submission id; unique within the store.
    #[serde(deserialize_with = "wire::token")]
    pub id: String,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Review text as submitted.
    pub review: String,

    /// OpenLibrary work key of the reviewed book.
    pub openlib_id: String,
}

impl SubmissionReceipt {
    /// Creates a receipt stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfnote::domain::SubmissionReceipt;
    ///
    /// let receipt = SubmissionReceipt::new("s1", "Loved it", "/works/OL1W");
    /// assert_eq!(receipt.id, "s1");
    /// assert!(receipt.timestamp > 0);
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        review: impl Into<String>,
        openlib_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            review: review.into(),
            openlib_id: openlib_id.into(),
        }
    }

    /// Submission time in local time, `YYYY-MM-DD HH:MM:SS`.
    ///
    /// Falls back to the raw millisecond value when it is out of range.
    #[must_use]
    pub fn submitted_display(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp).map_or_else(
            || self.timestamp.to_string(),
            |utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        )
    }
}
