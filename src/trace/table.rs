//! Table client hooks: client lifecycle, retry helpers, sessions, queries,
//! transactions and the session pool.

use super::{DriverError, OnEvent, OnStart, OnStartStream, Session};

#[derive(Debug, Clone, Default)]
pub struct InitStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct InitDoneInfo {
    /// Session pool size limit.
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CloseStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct CloseDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateSessionStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct CreateSessionIntermediateInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateSessionDoneInfo {
    pub session: Option<Session>,
    pub attempts: usize,
    pub error: Option<DriverError>,
}

/// Start of a `do`/`doTx` retry helper.
#[derive(Debug, Clone, Default)]
pub struct DoStartInfo {
    pub idempotent: bool,
    /// Helper was called from inside another helper's operation.
    pub nested_call: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DoIntermediateInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct DoDoneInfo {
    pub attempts: usize,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionNewStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct SessionNewDoneInfo {
    pub session: Option<Session>,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionDeleteStartInfo {
    pub session: Session,
}

#[derive(Debug, Clone, Default)]
pub struct SessionDeleteDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct KeepAliveStartInfo {
    pub session: Session,
}

#[derive(Debug, Clone, Default)]
pub struct KeepAliveDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PrepareDataQueryStartInfo {
    pub session: Session,
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct PrepareDataQueryDoneInfo {
    /// Server-side text of the prepared statement.
    pub statement: String,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteDataQueryStartInfo {
    pub session: Session,
    pub query: String,
    /// Rendered query parameters.
    pub parameters: String,
    pub keep_in_cache: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteDataQueryDoneInfo {
    pub tx: Option<String>,
    pub prepared: bool,
    /// Error reported inside an otherwise delivered result.
    pub result_error: Option<DriverError>,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamExecuteStartInfo {
    pub session: Session,
    pub query: String,
    pub parameters: String,
}

#[derive(Debug, Clone, Default)]
pub struct StreamExecuteIntermediateInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamExecuteDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamReadStartInfo {
    pub session: Session,
}

#[derive(Debug, Clone, Default)]
pub struct StreamReadIntermediateInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamReadDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct TxBeginStartInfo {
    pub session: Session,
}

#[derive(Debug, Clone, Default)]
pub struct TxBeginDoneInfo {
    pub tx: Option<String>,
    pub error: Option<DriverError>,
}

/// Start payload shared by commit and rollback.
#[derive(Debug, Clone, Default)]
pub struct TxEndStartInfo {
    pub session: Session,
    pub tx: String,
}

#[derive(Debug, Clone, Default)]
pub struct TxEndDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PoolSessionInfo {
    pub session: Session,
}

#[derive(Debug, Clone, Default)]
pub struct PoolStateChangeInfo {
    pub size: usize,
    pub event: String,
}

#[derive(Debug, Clone, Default)]
pub struct PoolPutStartInfo {
    pub session: Session,
}

#[derive(Debug, Clone, Default)]
pub struct PoolPutDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PoolGetStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct PoolGetDoneInfo {
    pub session: Option<Session>,
    pub attempts: usize,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PoolWaitStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct PoolWaitDoneInfo {
    pub session: Option<Session>,
    pub error: Option<DriverError>,
}

/// Hook set of the table client.
#[derive(Default)]
pub struct Table {
    pub on_init: Option<OnStart<InitStartInfo, InitDoneInfo>>,
    pub on_close: Option<OnStart<CloseStartInfo, CloseDoneInfo>>,
    pub on_create_session:
        Option<OnStartStream<CreateSessionStartInfo, CreateSessionIntermediateInfo, CreateSessionDoneInfo>>,
    pub on_do: Option<OnStartStream<DoStartInfo, DoIntermediateInfo, DoDoneInfo>>,
    pub on_do_tx: Option<OnStartStream<DoStartInfo, DoIntermediateInfo, DoDoneInfo>>,

    pub on_session_new: Option<OnStart<SessionNewStartInfo, SessionNewDoneInfo>>,
    pub on_session_delete: Option<OnStart<SessionDeleteStartInfo, SessionDeleteDoneInfo>>,
    pub on_session_keep_alive: Option<OnStart<KeepAliveStartInfo, KeepAliveDoneInfo>>,

    pub on_session_query_prepare: Option<OnStart<PrepareDataQueryStartInfo, PrepareDataQueryDoneInfo>>,
    pub on_session_query_execute: Option<OnStart<ExecuteDataQueryStartInfo, ExecuteDataQueryDoneInfo>>,
    pub on_session_query_stream_execute:
        Option<OnStartStream<StreamExecuteStartInfo, StreamExecuteIntermediateInfo, StreamExecuteDoneInfo>>,
    pub on_session_query_stream_read:
        Option<OnStartStream<StreamReadStartInfo, StreamReadIntermediateInfo, StreamReadDoneInfo>>,

    pub on_session_transaction_begin: Option<OnStart<TxBeginStartInfo, TxBeginDoneInfo>>,
    pub on_session_transaction_commit: Option<OnStart<TxEndStartInfo, TxEndDoneInfo>>,
    pub on_session_transaction_rollback: Option<OnStart<TxEndStartInfo, TxEndDoneInfo>>,

    pub on_pool_session_add: Option<OnEvent<PoolSessionInfo>>,
    pub on_pool_session_remove: Option<OnEvent<PoolSessionInfo>>,
    pub on_pool_state_change: Option<OnEvent<PoolStateChangeInfo>>,

    pub on_pool_put: Option<OnStart<PoolPutStartInfo, PoolPutDoneInfo>>,
    pub on_pool_get: Option<OnStart<PoolGetStartInfo, PoolGetDoneInfo>>,
    pub on_pool_wait: Option<OnStart<PoolWaitStartInfo, PoolWaitDoneInfo>>,
}
