use std::time::Instant;

use crate::field::{latency, version, Field};
use crate::level::Level;
use crate::logger::Logger;
use crate::options::Options;
use crate::retry::classification;
use crate::trace::sql::*;
use crate::trace::{DatabaseSql, Detailer, Details, OnDone, OnStart};

/// Hooks of the SQL connector layer, logged under `database.sql`.
pub fn database_sql(log: &Logger, d: impl Detailer, opts: &Options) -> DatabaseSql {
    let details = d.details();
    let log = log.named("database").named("sql");
    let opts = *opts;
    let mut t = DatabaseSql::default();
    if details.contains(Details::DATABASE_SQL_CONNECTOR) {
        let log = log.named("connector");
        t.on_connector_connect = Some(plain(&log, "connect start", Level::Info, "connected", "connect failed"));
    }
    if details.contains(Details::DATABASE_SQL_CONN) {
        let log = log.named("conn");
        t.on_conn_ping = Some(plain(&log, "ping start", Level::Debug, "ping done", "ping failed"));
        t.on_conn_close = Some(plain(&log, "close start", Level::Info, "closed", "close failed"));
        t.on_conn_begin = Some(plain(
            &log,
            "begin transaction start",
            Level::Debug,
            "begin transaction was success",
            "begin transaction failed",
        ));
        let l = log.clone();
        t.on_conn_prepare = Some(Box::new(move |info: PrepareStartInfo| -> OnDone<DoneInfo> {
            l.debug("prepare statement start", opts.query_field("query", &info.query).into_iter().collect());
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |done: DoneInfo| match &done.error {
                None => log.debug("prepare statement was success", vec![latency(start)]),
                Some(err) => {
                    let mut fields = vec![version(), latency(start)];
                    fields.extend(opts.query_field("query", &info.query));
                    fields.push(Field::error(err));
                    log.error("prepare statement failed", fields)
                }
            })
        }));
        t.on_conn_exec = Some(conn_query(&log, opts, "exec start", "exec was success", "exec failed"));
        t.on_conn_query = Some(conn_query(&log, opts, "query start", "query was success", "query failed"));
    }
    if details.contains(Details::DATABASE_SQL_TX) {
        let log = log.named("tx");
        t.on_tx_commit = Some(plain(&log, "commit start", Level::Debug, "committed", "commit failed"));
        t.on_tx_rollback = Some(plain(&log, "rollback start", Level::Debug, "rollbacked", "rollback failed"));
    }
    if details.contains(Details::DATABASE_SQL_STMT) {
        let log = log.named("stmt");
        t.on_stmt_close = Some(plain(&log, "close start", Level::Debug, "closed", "close failed"));
        t.on_stmt_exec = Some(stmt_query(&log, opts, "exec start", "exec was success", "exec failed"));
        t.on_stmt_query = Some(stmt_query(&log, opts, "query start", "query was success", "query failed"));
    }
    t
}

/// Operation without payload: debug start, `ok_level` success, error
/// failure.
fn plain(
    log: &Logger,
    start_msg: &'static str,
    ok_level: Level,
    ok_msg: &'static str,
    failed_msg: &'static str,
) -> OnStart<StartInfo, DoneInfo> {
    let l = log.clone();
    Box::new(move |_: StartInfo| -> OnDone<DoneInfo> {
        l.debug(start_msg, vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: DoneInfo| match &done.error {
            None => log.log(ok_level, ok_msg, vec![latency(start)]),
            Some(err) => log.error(failed_msg, vec![version(), latency(start), Field::error(err)]),
        })
    })
}

/// Statement run on a connection; failures carry the retry classification.
fn conn_query(
    log: &Logger,
    opts: Options,
    start_msg: &'static str,
    ok_msg: &'static str,
    failed_msg: &'static str,
) -> OnStart<ConnQueryStartInfo, DoneInfo> {
    let l = log.clone();
    Box::new(move |info: ConnQueryStartInfo| -> OnDone<DoneInfo> {
        let mut fields = vec![Field::string("mode", info.mode.as_str()), Field::bool("idempotent", info.idempotent)];
        fields.extend(opts.query_field("query", &info.query));
        l.debug(start_msg, fields);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: DoneInfo| match &done.error {
            None => log.debug(ok_msg, vec![latency(start)]),
            Some(err) => {
                let mut fields = vec![version(), latency(start)];
                fields.extend(opts.query_field("query", &info.query));
                fields.extend(classification(err, info.idempotent));
                fields.push(Field::error(err));
                log.error(failed_msg, fields)
            }
        })
    })
}

fn stmt_query(
    log: &Logger,
    opts: Options,
    start_msg: &'static str,
    ok_msg: &'static str,
    failed_msg: &'static str,
) -> OnStart<StmtQueryStartInfo, DoneInfo> {
    let l = log.clone();
    Box::new(move |info: StmtQueryStartInfo| -> OnDone<DoneInfo> {
        l.debug(start_msg, opts.query_field("query", &info.query).into_iter().collect());
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: DoneInfo| match &done.error {
            None => log.debug(ok_msg, vec![latency(start)]),
            Some(err) => {
                let mut fields = vec![version(), latency(start)];
                fields.extend(opts.query_field("query", &info.query));
                fields.push(Field::error(err));
                log.error(failed_msg, fields)
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::Value;
    use crate::trace::{self, DriverError, RetryMode};
    use std::sync::Arc;

    fn capture(d: Details, opts: Options) -> (Arc<MemoryBackend>, DatabaseSql) {
        let backend = Arc::new(MemoryBackend::new());
        let t = database_sql(&Logger::new(backend.clone()), d, &opts);
        (backend, t)
    }

    #[test]
    fn tx_bit_wires_only_tx() {
        let (_, t) = capture(Details::DATABASE_SQL_TX, Options::default());
        assert!(t.on_tx_commit.is_some());
        assert!(t.on_tx_rollback.is_some());
        assert!(t.on_conn_exec.is_none());
        assert!(t.on_connector_connect.is_none());
        assert!(t.on_stmt_query.is_none());
    }

    #[test]
    fn conn_exec_failure_is_classified() {
        let (backend, t) = capture(Details::DATABASE_SQL, Options::default().with_log_query());
        let done = trace::start(
            &t.on_conn_exec,
            ConnQueryStartInfo { query: "UPSERT INTO t (k) VALUES (1)".into(), mode: "data".into(), idempotent: false },
        );
        done(DoneInfo {
            error: Some(DriverError::Operation {
                code: 400140,
                message: "unavailable".into(),
                retry: RetryMode::IdempotentOnly,
                delete_session: false,
            }),
        });

        let records = backend.records();
        assert_eq!(records[0].logger, "database.sql.conn");
        let last = &records[1];
        assert_eq!(last.message, "exec failed");
        assert_eq!(last.level, Level::Error);
        assert_eq!(last.field("retryable"), Some(&Value::Bool(false)));
        assert_eq!(last.field("code"), Some(&Value::Int(400140)));
        assert_eq!(last.field("query"), Some(&Value::Str("UPSERT INTO t (k) VALUES (1)".into())));
    }

    #[test]
    fn connect_and_close_are_info() {
        let (backend, t) = capture(Details::DATABASE_SQL, Options::default());
        trace::start(&t.on_connector_connect, StartInfo {})(DoneInfo { error: None });
        trace::start(&t.on_conn_close, StartInfo {})(DoneInfo { error: None });

        let records = backend.records();
        assert_eq!(records[1].message, "connected");
        assert_eq!(records[1].level, Level::Info);
        assert_eq!(records[3].message, "closed");
        assert_eq!(records[3].level, Level::Info);
    }
}
