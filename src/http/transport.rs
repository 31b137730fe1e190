//! Transport abstraction under the HTTP JSON client.
//!
//! A [`Transport`] performs one raw exchange and reports the status and body. It does
//! no JSON handling and no error normalization; both live in
//! [`HttpJsonClient`](super::HttpJsonClient).
//!
//! Futures are boxed as [`LocalBoxFuture`] so the trait stays object-safe and works on
//! `wasm32`, where browser fetch futures are not `Send`.

use crate::dom::FormPayload;
use crate::domain::error::Result;
use futures_util::future::LocalBoxFuture;

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` reply carrying `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One raw HTTP exchange.
///
/// Implementations return `Err` only when no response was received at all; error
/// statuses are reported through [`HttpReply::status`].
pub trait Transport {
    /// `POST url` with a form-encoded body.
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        payload: &'a FormPayload,
    ) -> LocalBoxFuture<'a, Result<HttpReply>>;

    /// `GET url` with no body.
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpReply>>;
}

#[cfg(feature = "network")]
pub use network::ReqwestTransport;

#[cfg(feature = "network")]
mod network {
    use super::{FormPayload, HttpReply, LocalBoxFuture, Result, Transport};
    use crate::domain::error::ClientError;
    use futures_util::FutureExt;

    /// [`Transport`] backed by `reqwest` (browser fetch on `wasm32`).
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        #[must_use]
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }

        async fn read(request: reqwest::RequestBuilder) -> Result<HttpReply> {
            let response = request
                .send()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            Ok(HttpReply { status, body })
        }
    }

    impl Transport for ReqwestTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            payload: &'a FormPayload,
        ) -> LocalBoxFuture<'a, Result<HttpReply>> {
            Self::read(self.client.post(url).form(payload.pairs())).boxed_local()
        }

        fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpReply>> {
            Self::read(self.client.get(url)).boxed_local()
        }
    }
}
