//! Network layer.
//!
//! - [`transport`]: raw exchange trait and the optional `reqwest` backend
//! - [`client`]: envelope-normalizing JSON client

pub mod client;
pub mod transport;

pub use client::HttpJsonClient;
pub use transport::{HttpReply, Transport};

#[cfg(feature = "network")]
pub use transport::ReqwestTransport;
