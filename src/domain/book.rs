//! Book and review payloads returned by the server.
//!
//! Both types are immutable once received: the client renders them and never edits
//! them. Field aliases cover the two payload shapes the server produces (remote
//! OpenLibrary search results and rows from the site's own catalog).

use super::wire;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Base URL for OpenLibrary work pages.
const OPENLIB_BASE: &str = "https://openlibrary.org";

/// Base URL for OpenLibrary cover images.
const COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";

/// A searchable work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    #[serde(default)]
    pub cover_id: Option<i64>,

    pub title: String,

    #[serde(
        default,
        alias = "author_display",
        deserialize_with = "wire::text_or_list"
    )]
    pub author_names: String,

    #[serde(default)]
    pub first_publish_year: Option<i32>,

    #[serde(default, alias = "number_of_pages_median")]
    pub number_of_pages: Option<u32>,

    /// OpenLibrary work key such as `/works/OL45804W`.
    #[serde(default)]
    pub openlib_work_key: Option<String>,

    /// Id of the book in the site's own catalog.
    #[serde(default, deserialize_with = "wire::opt_token")]
    pub id: Option<String>,

    #[serde(default, alias = "filtered_link_outs")]
    pub link_outs: Vec<LinkOut>,
}

impl BookResult {
    /// Cover image URL in the medium size, if the work has a cover.
    #[must_use]
    pub fn cover_url(&self) -> Option<String> {
        self.cover_id.map(|id| format!("{COVERS_BASE}/{id}-M.jpg"))
    }

    /// OpenLibrary page for the work, if a work key is known.
    #[must_use]
    pub fn openlib_url(&self) -> Option<String> {
        self.openlib_work_key.as_deref().map(openlib_link)
    }
}

/// Builds the OpenLibrary URL for a work key.
#[must_use]
pub fn openlib_link(work_key: &str) -> String {
    format!("{OPENLIB_BASE}{work_key}")
}

/// An external link shown under a book ("buy", "borrow", ...).
///
/// The server sends either a bare URL or an object with a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkOut {
    Url(String),
    Labeled {
        #[serde(alias = "title", alias = "label")]
        name: String,
        #[serde(alias = "href")]
        url: String,
    },
}

impl LinkOut {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Labeled { url, .. } => url,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Labeled { name, .. } => name,
        }
    }
}

/// One entry of the review feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFeedItem {
    #[serde(deserialize_with = "wire::token")]
    pub id: String,

    pub content: String,

    /// Creation time as sent by the server (RFC 3339 or naive ISO 8601).
    pub created_at: String,

    pub book: BookResult,
}

impl ReviewFeedItem {
    /// Formats `created_at` as `YYYY-MM-DD HH:MM`, or returns it verbatim if it
    /// cannot be parsed.
    #[must_use]
    pub fn created_display(&self) -> String {
        if let Ok(stamp) = DateTime::parse_from_rfc3339(&self.created_at) {
            return stamp.format("%Y-%m-%d %H:%M").to_string();
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%d %H:%M:%S%.f"))
            .map_or_else(
                |_| self.created_at.clone(),
                |stamp| stamp.format("%Y-%m-%d %H:%M").to_string(),
            )
    }
}
