//! Structured logging for the client.
//!
//! Every operation runs inside a `tracing` span and reports through `tracing`
//! events. Failures the user never sees as an error (a broken response, an
//! unwritable store) are logged at `warn`/`error` so an operator can find them.
//!
//! # Configuration
//!
//! The filter comes from `Config::trace_level` and defaults to `"info"`.
//!
//! # Usage
//!
//! Initialize tracing once, early in the page's lifecycle:
//!
//! ```rust
//! use shelfnote::observability::{init_tracing_with, LogBuffer, LogChannel};
//! use shelfnote::Config;
//!
//! let buffer = LogBuffer::new();
//! init_tracing_with(&Config::default(), LogChannel::Memory(buffer.clone()));
//!
//! tracing::info!("client started");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`sink`]: Stderr or in-memory log channel

mod init;
mod sink;

pub use init::{init_tracing, init_tracing_with};
pub use sink::{ChannelWriter, LogBuffer, LogChannel};
