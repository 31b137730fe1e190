//! Error types for the shelfnote client.
//!
//! This module defines the centralized error type [`ClientError`] and a type alias
//! [`Result`] used by every internal layer. None of these errors is allowed to escape
//! a UI event: the HTTP client folds them into a failed
//! [`ResponseEnvelope`](crate::domain::ResponseEnvelope) and the submission cache folds
//! storage failures into an empty receipt list.

use thiserror::Error;

/// The main error type for shelfnote operations.
///
/// # Examples
///
/// ```
/// use shelfnote::ClientError;
///
/// fn read_config() -> Result<(), ClientError> {
///     Err(ClientError::Config("missing feed endpoint".to_string()))
/// }
///
/// assert!(read_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ClientError {
    /// The network call itself failed (unreachable host, aborted fetch, ...).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// A response body or stored value could not be decoded.
    #[error("invalid JSON: {0}")]
    Decode(String),

    /// Reading from or writing to the local receipt store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem access for the file-backed store failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document does not contain markup an operation relies on.
    ///
    /// Raised when an event names a node that has been dropped from the page, or when
    /// a required container id is absent.
    #[error("Document error: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for shelfnote operations.
pub type Result<T> = std::result::Result<T, ClientError>;
