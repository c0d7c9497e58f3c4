//! Optional application log sink.
//!
//! Applications that want the client's human-readable diagnostics inject a
//! [`LogSink`]. The default [`NoopLogSink`] discards every line, so call
//! sites never need to check whether a sink is configured.

use std::fmt;

use tracing::info;

/// Prefix added to every line handed to a sink.
pub(crate) const LOG_PREFIX: &str = "rustpush: ";

/// Receiver of single-line diagnostic messages.
pub trait LogSink: fmt::Debug + Send + Sync {
    /// Record one line.
    fn log(&self, message: &str);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn log(&self, _message: &str) {}
}

/// Sink that forwards lines to `tracing` at `INFO` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        info!(target: "rustpush", "{message}");
    }
}
