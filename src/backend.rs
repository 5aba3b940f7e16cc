use std::sync::Mutex;

use crate::field::fields_to_json;
use crate::level::Level;
use crate::record::LogRecord;

/// Synchronous destination for finished [`LogRecord`]s.
///
/// Hook callbacks run on driver threads, so `emit` must not block. Slow
/// destinations go through [`crate::pipeline::SinkBackend`], which moves
/// the I/O onto a background task.
pub trait LogBackend: Send + Sync {
    /// Whether entries at `level` would be kept. Checked before a record
    /// is built.
    fn enabled(&self, level: Level) -> bool {
        let _ = level;
        true
    }

    fn emit(&self, record: LogRecord);
}

/// Forwards records to the `tracing` dispatcher.
///
/// The scope name goes into the `logger` field and the structured fields
/// are rendered as one JSON `fields` value.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingBackend;

impl LogBackend for TracingBackend {
    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Trace => tracing::enabled!(tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(tracing::Level::INFO),
            Level::Warn => tracing::enabled!(tracing::Level::WARN),
            Level::Error | Level::Fatal => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn emit(&self, record: LogRecord) {
        let fields = fields_to_json(&record.fields);
        let logger = record.logger.as_str();
        let msg = record.message.as_str();
        match record.level {
            Level::Trace => tracing::trace!(logger, %fields, "{}", msg),
            Level::Debug => tracing::debug!(logger, %fields, "{}", msg),
            Level::Info => tracing::info!(logger, %fields, "{}", msg),
            Level::Warn => tracing::warn!(logger, %fields, "{}", msg),
            Level::Error => tracing::error!(logger, %fields, "{}", msg),
            Level::Fatal => tracing::error!(logger, %fields, fatal = true, "{}", msg),
        }
    }
}

/// Keeps every record in memory. Meant for tests and for inspecting what
/// a hook set emits.
#[derive(Debug)]
pub struct MemoryBackend {
    min_level: Level,
    records: Mutex<Vec<LogRecord>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        MemoryBackend::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::with_min_level(Level::Trace)
    }

    pub fn with_min_level(min_level: Level) -> Self {
        MemoryBackend { min_level, records: Mutex::new(Vec::new()) }
    }

    /// Snapshot of everything captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drain the captured records.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogBackend for MemoryBackend {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn emit(&self, record: LogRecord) {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).push(record);
    }
}
