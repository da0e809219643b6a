//! Log sinks
//!
//! The loader never talks to a global logger directly. It is handed a
//! [`LogSink`] at construction and reports through it, so callers decide
//! where records end up: `tracing` in the binary, memory in tests.

use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// A single log record emitted by a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity
    pub level: Level,
    /// Name of the emitting component's logger
    pub target: &'static str,
    /// Human-readable message
    pub message: String,
}

impl LogRecord {
    pub fn new(level: Level, target: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            target,
            message: message.into(),
        }
    }
}

/// Receiver of log records
pub trait LogSink: Send + Sync {
    /// Accept one record
    fn emit(&self, record: &LogRecord);
}

/// Shared sink handle
pub type SharedLogSink = Arc<dyn LogSink>;

/// Forwards records to `tracing` events at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn shared() -> SharedLogSink {
        Arc::new(Self)
    }
}

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        let target = record.target;
        let message = record.message.as_str();
        match record.level {
            Level::ERROR => tracing::error!(logger = target, "{message}"),
            Level::WARN => tracing::warn!(logger = target, "{message}"),
            Level::INFO => tracing::info!(logger = target, "{message}"),
            Level::DEBUG => tracing::debug!(logger = target, "{message}"),
            _ => tracing::trace!(logger = target, "{message}"),
        }
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Records at exactly `level`
    pub fn records_at(&self, level: Level) -> Vec<LogRecord> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        // A panic while holding the lock cannot leave the Vec half-written
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.lock().push(record.clone());
    }
}

/// Install the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
