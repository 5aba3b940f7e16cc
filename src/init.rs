use crate::backend::TracingBackend;
use crate::error::Error;
use crate::level::Level;
use crate::logger::Logger;
use crate::pipeline::SinkBackend;
use crate::sink::LogSink;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

/// Configuration of the sink pipeline.
///
/// Controls the size of the internal channel, the batch size used when
/// sending to the sink, how often a partial batch is flushed, and which
/// records are kept at all.
///
/// **Fields**
/// - `channel_buffer`: maximum number of queued [`crate::record::LogRecord`]s
///   before new records are dropped.
/// - `batch_size`: number of records per batch sent to the sink.
/// - `flush_interval`: maximum interval between flushes even when the
///   batch is not full.
/// - `min_level`: records below this level are discarded before they are
///   built.
/// - `service_name`: stamped on every record that has none, for setups
///   where several services share one store.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub channel_buffer: usize,
    pub batch_size: usize,
    pub flush_interval: Duration,
    pub min_level: Level,
    pub service_name: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            batch_size: 128,
            flush_interval: Duration::from_secs(1),
            min_level: Level::Debug,
            service_name: None,
        }
    }
}

/// Build a root [`Logger`] that ships records to `sink` through a
/// [`SinkBackend`].
///
/// **Returns**
/// - the root logger, to be passed to the hook constructors;
/// - the handle of the background task, which completes once every clone
///   of the logger (and of the hook sets holding it) is dropped.
///
/// Must be called from within a Tokio runtime.
pub fn init_sink_logger(sink: Arc<dyn LogSink>, config: &PipelineConfig) -> (Logger, JoinHandle<()>) {
    let (backend, handle) = SinkBackend::new(sink, config);
    (Logger::new(Arc::new(backend)), handle)
}

/// Install a global `fmt` subscriber filtered by `RUST_LOG` (default
/// `debug`) and return a root [`Logger`] that emits through `tracing`.
///
/// **Errors**
///
/// Fails if a global subscriber is already installed. Use
/// [`tracing_logger`] in that case.
pub fn init_tracing() -> Result<Logger, Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(tracing_logger())
}

/// Root [`Logger`] on top of whatever `tracing` subscriber is current.
pub fn tracing_logger() -> Logger {
    Logger::new(Arc::new(TracingBackend))
}
