//! Hooks of the `database/sql`-style connector layer.

use super::{DriverError, OnStart};

/// Start payload of operations that carry nothing.
#[derive(Debug, Clone, Default)]
pub struct StartInfo {}

/// Completion payload of operations that only report an error.
#[derive(Debug, Clone, Default)]
pub struct DoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PrepareStartInfo {
    pub query: String,
}

/// Start of a statement run directly on a connection.
#[derive(Debug, Clone, Default)]
pub struct ConnQueryStartInfo {
    pub query: String,
    /// Query mode chosen by the connector (data, scan, scheme, ...).
    pub mode: String,
    pub idempotent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StmtQueryStartInfo {
    pub query: String,
}

/// Hook set of the SQL connector layer.
#[derive(Default)]
pub struct DatabaseSql {
    pub on_connector_connect: Option<OnStart<StartInfo, DoneInfo>>,

    pub on_conn_ping: Option<OnStart<StartInfo, DoneInfo>>,
    pub on_conn_close: Option<OnStart<StartInfo, DoneInfo>>,
    pub on_conn_begin: Option<OnStart<StartInfo, DoneInfo>>,
    pub on_conn_prepare: Option<OnStart<PrepareStartInfo, DoneInfo>>,
    pub on_conn_exec: Option<OnStart<ConnQueryStartInfo, DoneInfo>>,
    pub on_conn_query: Option<OnStart<ConnQueryStartInfo, DoneInfo>>,

    pub on_tx_commit: Option<OnStart<StartInfo, DoneInfo>>,
    pub on_tx_rollback: Option<OnStart<StartInfo, DoneInfo>>,

    pub on_stmt_close: Option<OnStart<StartInfo, DoneInfo>>,
    pub on_stmt_exec: Option<OnStart<StmtQueryStartInfo, DoneInfo>>,
    pub on_stmt_query: Option<OnStart<StmtQueryStartInfo, DoneInfo>>,
}
