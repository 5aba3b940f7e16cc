//! Structured-logging adapters for database driver trace hooks.
//!
//! Each constructor turns a [`Logger`] and a [`trace::Details`] selection
//! into one subsystem's hook set. Records go to a [`LogBackend`]: straight
//! to `tracing`, into memory, or through the batching sink pipeline.

pub mod record;
pub mod sink;
pub mod pipeline;

pub mod init;
pub mod noop_sink;

pub mod backend;
pub mod env;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod options;

pub mod trace;

pub mod adapter;
pub mod discovery;
pub mod driver;
pub mod retry;
pub mod scripting;
pub mod sql;
pub mod structural;
pub mod table;
pub mod topic;
pub mod traces;

/// Crate version, stamped on failure entries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use backend::{LogBackend, MemoryBackend, TracingBackend};
pub use discovery::discovery;
pub use driver::driver;
pub use error::Error;
pub use field::{Field, Value};
pub use init::{init_sink_logger, init_tracing, tracing_logger, PipelineConfig};
pub use level::{log_debug_info, log_debug_warn, log_info_warn, log_level, Level};
pub use logger::Logger;
pub use options::Options;
pub use record::LogRecord;
pub use retry::retry;
pub use scripting::scripting;
pub use sql::database_sql;
pub use table::table;
pub use topic::topic;
pub use trace::{Detailer, Details};
pub use traces::{with_traces, Traces};
