//! The uniform response envelope and the payloads it carries.
//!
//! Every endpoint answers with `{success, message, data, errors}`. The client decodes
//! the body in two steps: first into a [`RawEnvelope`] holding `data` as untyped JSON,
//! then into a [`ResponseEnvelope<T>`] for the payload type the calling flow expects.
//! The second step enforces the envelope invariants:
//!
//! - a success envelope always carries well-formed `data`;
//! - a failure envelope always carries a non-empty `message` or non-empty `errors`.

use super::book::{BookResult, ReviewFeedItem};
use super::wire;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Message used when the server reports failure without saying why.
pub const GENERIC_FAILURE: &str = "An error occurred.";

/// Envelope as it arrives on the wire, before payload decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvelope {
    #[serde(default, deserialize_with = "wire::flag")]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default, deserialize_with = "wire::field_errors")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl RawEnvelope {
    /// Interprets a parsed response body.
    ///
    /// Objects without a `success` key are bare payloads (the CSRF endpoint answers
    /// `{"csrf_token": ...}`) and are wrapped as successful `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not an object or its envelope fields have the
    /// wrong types.
    pub fn from_body(body: Value) -> crate::Result<Self> {
        if !body.is_object() {
            return Err(crate::ClientError::Decode(
                "response body is not a JSON object".to_string(),
            ));
        }
        if body.get("success").is_none() {
            return Ok(Self {
                success: true,
                data: Some(body),
                ..Self::default()
            });
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Decodes `data` into the payload type expected by the caller.
    ///
    /// A success envelope whose `data` is missing or malformed becomes a failure, so
    /// callers can branch on [`ResponseEnvelope::is_success`] alone.
    #[must_use]
    pub fn into_typed<T: DeserializeOwned>(self) -> ResponseEnvelope<T> {
        if !self.success {
            return ResponseEnvelope::rejected(self.message, self.errors);
        }

        let Some(data) = self.data else {
            return ResponseEnvelope::failure("malformed response data: missing data");
        };

        match serde_json::from_value(data) {
            Ok(payload) => ResponseEnvelope {
                success: true,
                message: non_empty(self.message),
                data: Some(payload),
                errors: None,
            },
            Err(e) => ResponseEnvelope::failure(format!("malformed response data: {e}")),
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Uniform success/data/error wrapper for one network response.
///
/// Created fresh per call and never mutated afterwards; fields are read through
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
    errors: Option<BTreeMap<String, String>>,
}

impl<T> ResponseEnvelope<T> {
    /// A successful envelope carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
        }
    }

    /// A failed envelope carrying only a diagnostic message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::rejected(Some(message.into()), None)
    }

    /// A failed envelope as reported by the server.
    ///
    /// Falls back to [`GENERIC_FAILURE`] when neither a message nor field errors are
    /// present.
    #[must_use]
    pub fn rejected(message: Option<String>, errors: Option<BTreeMap<String, String>>) -> Self {
        let mut message = non_empty(message);
        let has_errors = errors.as_ref().is_some_and(|e| !e.is_empty());
        if message.is_none() && !has_errors {
            message = Some(GENERIC_FAILURE.to_string());
        }
        Self {
            success: false,
            message,
            data: None,
            errors,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub const fn errors(&self) -> Option<&BTreeMap<String, String>> {
        self.errors.as_ref()
    }

    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Text shown in an error region for this envelope.
    ///
    /// The message, followed by a comma-joined `field: message` list when field errors
    /// are present. The two parts are separated by a single space.
    #[must_use]
    pub fn error_text(&self) -> String {
        let mut text = self.message.clone().unwrap_or_default();
        if let Some(errors) = self.errors.as_ref().filter(|e| !e.is_empty()) {
            let list = errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join(", ");
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&list);
        }
        text
    }
}

/// Opaque pagination continuation token.
///
/// Issued by the server, echoed back verbatim. The client never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        wire::token(deserializer).map(Self)
    }
}

/// `data` of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    pub results: Vec<BookResult>,
}

/// `data` of a review-feed page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedPage {
    pub results: Vec<ReviewFeedItem>,

    #[serde(default)]
    pub next_cursor: Option<Cursor>,

    #[serde(default, deserialize_with = "wire::opt_token")]
    pub next_review_id: Option<String>,
}

/// `data` of a successful review submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionAck {
    #[serde(deserialize_with = "wire::token")]
    pub submission_id: String,
}

/// Body of the CSRF endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CsrfToken {
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn typed<T: DeserializeOwned>(body: Value) -> ResponseEnvelope<T> {
        RawEnvelope::from_body(body).unwrap().into_typed()
    }

    #[test]
    fn success_without_data_is_a_failure() {
        let envelope: ResponseEnvelope<SearchPage> = typed(json!({"success": true}));
        assert!(!envelope.is_success());
        assert!(envelope.message().unwrap().contains("missing data"));
    }

    #[test]
    fn success_with_wrong_shape_is_a_failure() {
        let envelope: ResponseEnvelope<SearchPage> =
            typed(json!({"success": true, "data": {"results": "nope"}}));
        assert!(!envelope.is_success());
        assert!(envelope.message().unwrap().starts_with("malformed response data"));
    }

    #[test]
    fn bare_failure_gets_generic_message() {
        let envelope: ResponseEnvelope<SearchPage> =
            typed(json!({"success": false, "message": ""}));
        assert_eq!(envelope.message(), Some(GENERIC_FAILURE));
        assert_eq!(envelope.error_text(), GENERIC_FAILURE);
    }

    #[test]
    fn error_text_appends_field_list() {
        let envelope: ResponseEnvelope<SearchPage> = typed(json!({
            "success": false,
            "message": "Invalid form.",
            "errors": {"review": "too short", "csrf_token": "missing"}
        }));
        assert_eq!(
            envelope.error_text(),
            "Invalid form. csrf_token: missing, review: too short"
        );
    }

    #[test]
    fn field_errors_alone_satisfy_the_invariant() {
        let envelope: ResponseEnvelope<SearchPage> =
            typed(json!({"success": false, "errors": {"q": "required"}}));
        assert_eq!(envelope.message(), None);
        assert_eq!(envelope.error_text(), "q: required");
    }

    #[test]
    fn bare_payload_is_wrapped() {
        let envelope: ResponseEnvelope<CsrfToken> = typed(json!({"csrf_token": "abc"}));
        assert_eq!(envelope.into_data().unwrap().csrf_token, "abc");
    }

    #[test]
    fn feed_page_keeps_cursor_verbatim() {
        let envelope: ResponseEnvelope<FeedPage> = typed(json!({
            "success": true,
            "data": {"results": [], "next_cursor": 1700000000, "next_review_id": "r9"}
        }));
        let page = envelope.into_data().unwrap();
        assert_eq!(page.next_cursor, Some(Cursor::new("1700000000")));
        assert_eq!(page.next_review_id.as_deref(), Some("r9"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(RawEnvelope::from_body(json!([1, 2])).is_err());
    }
}
