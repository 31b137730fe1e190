//! Lenient field decoders for server payloads.
//!
//! The server is not strict about scalar types: ids and cursors arrive either as
//! strings or as numbers, `success` has been seen as the string `"false"`, and
//! validation errors may carry one message or a list per field. These helpers accept
//! every observed shape and normalize it to the typed field.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Renders a scalar token as text, keeping numbers in their decimal form.
fn token_text(value: Value) -> Option<std::result::Result<String, String>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Ok(s)),
        Value::Number(n) => Some(Ok(n.to_string())),
        other => Some(Err(format!("expected string or number, found {other}"))),
    }
}

/// Decodes a required string-or-number token.
pub fn token<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match token_text(Value::deserialize(deserializer)?) {
        Some(Ok(s)) => Ok(s),
        Some(Err(msg)) => Err(D::Error::custom(msg)),
        None => Err(D::Error::custom("expected string or number, found null")),
    }
}

/// Decodes an optional string-or-number token; `null` and absence become `None`.
pub fn opt_token<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    token_text(Value::deserialize(deserializer)?)
        .transpose()
        .map_err(D::Error::custom)
}

/// Decodes `true`/`false` or their string spellings.
pub fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(D::Error::custom(format!("expected boolean, found {other}"))),
    }
}

/// Decodes a string, or a list of strings joined with `", "`.
pub fn text_or_list<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    join_text(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn join_text(value: Value) -> std::result::Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => items
            .into_iter()
            .map(join_text)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(|parts| parts.join(", ")),
        other => Err(format!("expected text, found {other}")),
    }
}

/// Decodes the `errors` mapping of an envelope.
///
/// Field messages may be strings or lists of strings. An empty object is kept as
/// `Some(empty)` so callers can tell "no errors key" from "no field errors".
pub fn field_errors<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Object(map) => map
            .into_iter()
            .map(|(field, message)| join_text(message).map(|text| (field, text)))
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map(Some)
            .map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected object, found {other}"))),
    }
}
