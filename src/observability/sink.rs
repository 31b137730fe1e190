//! Operator log channel.
//!
//! Formatted log lines go either to stderr (the browser console on `wasm32`) or to
//! an in-memory [`LogBuffer`] that hosts can drain and tests can inspect.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

/// Shared in-memory log buffer.
///
/// Cloning yields another handle to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // a writer that panicked mid-line leaves valid bytes behind
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns everything written so far and empties the buffer.
    pub fn drain(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination of formatted log lines.
#[derive(Debug, Clone, Default)]
pub enum LogChannel {
    #[default]
    Stderr,
    Memory(LogBuffer),
}

/// Writer handed out by [`LogChannel`] for one log event.
#[derive(Debug)]
pub enum ChannelWriter {
    Stderr(io::Stderr),
    Memory(LogBuffer),
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr(w) => w.write(buf),
            Self::Memory(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr(w) => w.flush(),
            Self::Memory(w) => w.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogChannel {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            Self::Stderr => ChannelWriter::Stderr(io::stderr()),
            Self::Memory(buffer) => ChannelWriter::Memory(buffer.clone()),
        }
    }
}
