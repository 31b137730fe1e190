//! Shelfnote: the browser-side client of a book-review site.
//!
//! Shelfnote drives the interactive parts of the site's pages:
//! - A uniform submit → loading → fetch → dispatch pipeline for every form
//! - A search ↔ review view switch that puts a selected card back exactly where it was
//! - A cursor-paginated review feed with append-only "load more"
//! - A deduplicated local cache of review-submission receipts for the confirmation page
//! - CSRF token population for every form on the page

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host page (browser glue, tests)                    │  ← Forwards DOM events
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event handling
//! │  - Submission pipeline                              │  ← Flows
//! │  - View state machine                               │
//! │  - Pagination                                       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ HTTP Layer    │
//! │ (ui/)         │   │ (storage/)    │   │ (http/)       │
//! │ - Cards       │   │ - Receipts    │   │ - Envelopes   │
//! │ - Messages    │   │ - JSON file   │   │ - Transport   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Document & Domain Layers                           │
//! │  - Document tree (dom/)                             │
//! │  - Error types, wire types (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, operator log channel         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Flows, view state machine and the event/action model
//! - [`dom`]: In-memory document the flows render into
//! - [`domain`]: Wire types, envelopes, receipts, errors
//! - [`http`]: Transport seam and the JSON client
//! - [`storage`]: Local key-value stores and the receipt cache
//! - [`ui`]: Pure card builders
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Endpoints are read from the page's data attributes (see [`Config::from_map`]) or
//! from a TOML document:
//!
//! ```toml
//! base_url = "https://books.example.org"
//! feed_endpoint = "/api/fetch-more-reviews"
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use shelfnote::Config;
//! use std::collections::BTreeMap;
//!
//! let mut attrs = BTreeMap::new();
//! attrs.insert("search_endpoint".to_string(), "/api/search-local".to_string());
//!
//! let config = Config::from_map(&attrs);
//! assert_eq!(config.url(&config.search_endpoint), "/api/search-local");
//! assert_eq!(config.submit_endpoint, "/api/submit-book");
//! ```
//!
//! # Concurrency
//!
//! Everything runs on the page's single UI thread. The document and the receipt
//! store are shared through `Rc<RefCell<_>>` and are never borrowed across a network
//! await. Each flow tags its submissions with increasing sequence numbers and drops
//! a response that arrives after a newer one has been applied.

pub mod app;
pub mod dom;
pub mod domain;
pub mod http;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{Action, App, Event, SearchSource};
pub use domain::{ClientError, ResponseEnvelope, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Client configuration.
///
/// Every field has a default matching the site's own routes, so an empty
/// configuration is a working one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for every endpoint. Empty means same-origin relative URLs.
    pub base_url: String,

    /// Search endpoint used when the search form has no `action`.
    /// Default: `/api/search-books`
    pub search_endpoint: String,

    /// Review submission endpoint. Default: `/api/submit-book`
    pub submit_endpoint: String,

    /// Review feed endpoint. Default: `/api/fetch-more-reviews`
    pub feed_endpoint: String,

    /// CSRF token endpoint. Default: `/api/csrf-token`
    pub csrf_endpoint: String,

    /// Page shown after a review is accepted. Default: `/submission`
    pub confirmation_page: String,

    /// Store key for submission receipts. Default: `"submissions"`
    pub storage_key: String,

    /// Tracing filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            search_endpoint: "/api/search-books".to_string(),
            submit_endpoint: "/api/submit-book".to_string(),
            feed_endpoint: "/api/fetch-more-reviews".to_string(),
            csrf_endpoint: "/api/csrf-token".to_string(),
            confirmation_page: "/submission".to_string(),
            storage_key: storage::SUBMISSIONS_KEY.to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from string attributes, such as a page's `data-*` set.
    ///
    /// Keys match the field names. Missing or blank values fall back to the
    /// defaults; unknown keys are ignored.
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let get = |key: &str, fallback: String| value(key).unwrap_or(fallback);

        Self {
            base_url: get("base_url", defaults.base_url),
            search_endpoint: get("search_endpoint", defaults.search_endpoint),
            submit_endpoint: get("submit_endpoint", defaults.submit_endpoint),
            feed_endpoint: get("feed_endpoint", defaults.feed_endpoint),
            csrf_endpoint: get("csrf_endpoint", defaults.csrf_endpoint),
            confirmation_page: get("confirmation_page", defaults.confirmation_page),
            storage_key: get("storage_key", defaults.storage_key),
            trace_level: value("trace_level"),
        }
    }

    /// Parses configuration from a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the document is not valid TOML or a value
    /// has the wrong type.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Resolves an endpoint against `base_url`.
    ///
    /// Absolute URLs are returned unchanged.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() || path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Builds the client for one page.
///
/// `store` backs the receipt cache; `None` models a browser without local storage.
/// Tracing is not initialized here, see [`observability::init_tracing`].
pub fn initialize(
    config: Config,
    dom: dom::Dom,
    transport: Rc<dyn http::Transport>,
    store: Option<Box<dyn storage::KeyValueStore>>,
) -> App {
    tracing::debug!(base_url = %config.base_url, "initializing shelfnote client");

    let cache = storage::SubmissionCache::new(store, config.storage_key.clone());
    App::new(config, dom, transport, cache)
}
