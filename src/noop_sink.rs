use crate::record::LogRecord;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sink that discards records and only counts them.
///
/// Used by the load examples to measure adapter and pipeline overhead
/// without external I/O.
#[derive(Debug, Default)]
pub struct NoopSink {
    received: AtomicU64,
}

impl NoopSink {
    /// Number of records accepted so far.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LogSink for NoopSink {
    async fn send(&self, _record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.received.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
