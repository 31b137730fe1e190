//! Tracing initialization and subscriber setup.
//!
//! Builds the subscriber pipeline from `tracing` macros to the operator log
//! channel: an [`EnvFilter`] for the configured level, then a plain-text `fmt` layer.

use super::sink::LogChannel;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when the configuration names none.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the global tracing subscriber, logging to stderr.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `config.trace_level` if set
/// 2. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
///
/// # Example
///
/// ```rust
/// use shelfnote::observability::init_tracing;
/// use shelfnote::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    init_tracing_with(config, LogChannel::Stderr)
}

/// Initializes the global tracing subscriber, logging to `channel`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing_with(config: &Config, channel: LogChannel) -> bool {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(channel);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
