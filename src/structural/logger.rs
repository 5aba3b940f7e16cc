use super::array::Array;
use super::pool::RecordPool;
use super::record::Record;
use crate::level::Level;
use crate::logger::Logger;

/// Builder-style front end over a [`Logger`].
///
/// ```
/// use driver_trace_log::structural::{RecordPool, StructuralLogger};
/// use driver_trace_log::tracing_logger;
///
/// let log = StructuralLogger::new(tracing_logger(), RecordPool::default());
/// log.info().string("address", "n1:2135").int64("attempts", 2).message("connected");
/// ```
#[derive(Clone, Debug)]
pub struct StructuralLogger {
    log: Logger,
    pool: RecordPool,
}

impl StructuralLogger {
    pub fn new(log: Logger, pool: RecordPool) -> Self {
        StructuralLogger { log, pool }
    }

    pub fn pool(&self) -> &RecordPool {
        &self.pool
    }

    fn record(&self, level: Level) -> Record {
        Record::new(Some(self.log.clone()), level, &self.pool)
    }

    pub fn trace(&self) -> Record {
        self.record(Level::Trace)
    }

    pub fn debug(&self) -> Record {
        self.record(Level::Debug)
    }

    pub fn info(&self) -> Record {
        self.record(Level::Info)
    }

    pub fn warn(&self) -> Record {
        self.record(Level::Warn)
    }

    pub fn error(&self) -> Record {
        self.record(Level::Error)
    }

    /// Fatal entries are emitted like any other; the process keeps running.
    pub fn fatal(&self) -> Record {
        self.record(Level::Fatal)
    }

    /// Child scope sharing the same pool.
    pub fn with_name(&self, name: &str) -> StructuralLogger {
        StructuralLogger { log: self.log.named(name), pool: self.pool.clone() }
    }

    /// Unbound record for use as a nested object.
    pub fn object(&self) -> Record {
        Record::new(None, Level::Debug, &self.pool)
    }

    pub fn array(&self) -> Array {
        Array::new()
    }
}
