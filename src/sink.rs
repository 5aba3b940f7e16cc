use crate::record::LogRecord;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for [`LogRecord`]s produced by the hook
/// adapters.
///
/// Implementations transport records to a concrete store (a database,
/// a message bus, stdout). [`crate::pipeline::SinkBackend`] calls `send`
/// from a background task and never awaits it on a driver thread.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Send a single log record to the underlying store.
    ///
    /// **Parameters**
    /// - `record`: fully-populated [`LogRecord`] with scope name, level and
    ///   fields as emitted by an adapter.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was accepted.
    /// - `Err(..)` if the store failed. The pipeline treats this as a
    ///   transient failure and resends the remaining records with backoff.
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered records, if the sink buffers.
    ///
    /// Called once when the pipeline shuts down. Default implementation is
    /// a no-op.
    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
