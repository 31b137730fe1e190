//! HTTP JSON client with uniform failure handling.
//!
//! [`HttpJsonClient`] never returns an error. Transport failures, error statuses,
//! non-JSON bodies and malformed payloads all come back as a failed
//! [`ResponseEnvelope`] whose message is a diagnostic, and each one is logged. Callers
//! branch on [`ResponseEnvelope::is_success`] and nothing else.
//!
//! There is no retry: every call is at-most-once, and resubmitting is up to the user.

use super::transport::{HttpReply, Transport};
use crate::dom::FormPayload;
use crate::domain::envelope::{RawEnvelope, ResponseEnvelope};
use crate::domain::error::{ClientError, Result};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use tracing::Instrument;

/// Client for the site's JSON endpoints.
#[derive(Clone)]
pub struct HttpJsonClient {
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for HttpJsonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpJsonClient").finish_non_exhaustive()
    }
}

impl HttpJsonClient {
    #[must_use]
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Posts a form and decodes the envelope's `data` as `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &FormPayload,
    ) -> ResponseEnvelope<T> {
        let span = tracing::debug_span!("http_post", url = %url, fields = payload.len());
        async {
            match Self::exchange(self.transport.post_form(url, payload)).await {
                Ok(raw) => Self::typed(url, raw),
                Err(e) => {
                    let message = format!("Error posting form data to: {url} - {e}");
                    tracing::error!(url = %url, error = %e, "{message}");
                    ResponseEnvelope::failure(message)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fetches a URL and decodes the envelope's `data` as `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ResponseEnvelope<T> {
        let span = tracing::debug_span!("http_get", url = %url);
        async {
            match Self::exchange(self.transport.get(url)).await {
                Ok(raw) => Self::typed(url, raw),
                Err(e) => {
                    let message = format!("Error fetching data from: {url}, {e}");
                    tracing::error!(url = %url, error = %e, "{message}");
                    ResponseEnvelope::failure(message)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn exchange(reply: LocalBoxFuture<'_, Result<HttpReply>>) -> Result<RawEnvelope> {
        let reply = reply.await?;
        if !reply.is_success() {
            return Err(ClientError::HttpStatus(reply.status));
        }
        let body: serde_json::Value = serde_json::from_str(&reply.body)?;
        RawEnvelope::from_body(body)
    }

    fn typed<T: DeserializeOwned>(url: &str, raw: RawEnvelope) -> ResponseEnvelope<T> {
        let claimed_success = raw.success;
        let envelope = raw.into_typed::<T>();
        if claimed_success && !envelope.is_success() {
            tracing::error!(
                url = %url,
                message = envelope.message().unwrap_or_default(),
                "discarding malformed success response"
            );
        } else {
            tracing::debug!(url = %url, success = envelope.is_success(), "response decoded");
        }
        envelope
    }
}
