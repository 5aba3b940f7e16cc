use std::time::Instant;

use crate::field::{latency, version, Field};
use crate::level::{log_debug_warn, Level};
use crate::logger::Logger;
use crate::options::Options;
use crate::retry::RetryLog;
use crate::trace::error::as_dyn;
use crate::trace::table::*;
use crate::trace::{Detailer, Details, OnDone, OnIntermediate, OnStartStream, Session, Table};

/// Table-client hooks, logged under `table`.
///
/// Query text reaches the log only when `opts.log_query` is set.
pub fn table(log: &Logger, d: impl Detailer, opts: &Options) -> Table {
    let details = d.details();
    let log = log.named("table");
    let mut t = Table::default();
    if details.contains(Details::TABLE_EVENTS) {
        events(&log, &mut t);
    }
    let session_log = log.named("session");
    if details.contains(Details::TABLE_SESSION_LIFECYCLE) {
        session_lifecycle(&session_log, &mut t);
    }
    let query_log = session_log.named("query");
    if details.contains(Details::TABLE_SESSION_QUERY_INVOKE) {
        query_invoke(&query_log.named("invoke"), &mut t, *opts);
    }
    if details.contains(Details::TABLE_SESSION_QUERY_STREAM) {
        query_stream(&query_log.named("stream"), &mut t, *opts);
    }
    if details.contains(Details::TABLE_SESSION_TRANSACTION) {
        transaction(&session_log.named("transaction"), &mut t);
    }
    let pool_log = log.named("pool");
    if details.contains(Details::TABLE_POOL_LIFECYCLE) {
        pool_lifecycle(&pool_log.named("session"), &mut t);
    }
    if details.contains(Details::TABLE_POOL_API) {
        pool_api(&pool_log, &mut t);
    }
    t
}

fn session_fields(session: &Session) -> [Field; 2] {
    [Field::string("id", session.id.as_str()), Field::string("status", session.status.as_str())]
}

fn events(log: &Logger, t: &mut Table) {
    let l = log.clone();
    t.on_init = Some(Box::new(move |_: InitStartInfo| -> OnDone<InitDoneInfo> {
        l.info("initializing", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: InitDoneInfo| {
            log.info("initialized", vec![latency(start), Field::uint("limit", done.limit as u64)])
        })
    }));
    let l = log.clone();
    t.on_close = Some(Box::new(move |_: CloseStartInfo| -> OnDone<CloseDoneInfo> {
        l.info("closing", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: CloseDoneInfo| match &done.error {
            None => log.info("closed", vec![latency(start)]),
            Some(err) => log.error("close failed", vec![version(), latency(start), Field::error(err)]),
        })
    }));

    let l = log.named("createSession");
    t.on_create_session = Some(Box::new(
        move |_: CreateSessionStartInfo| -> OnIntermediate<CreateSessionIntermediateInfo, CreateSessionDoneInfo> {
            l.debug("creating session", vec![]);
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |info: CreateSessionIntermediateInfo| -> OnDone<CreateSessionDoneInfo> {
                log_debug_warn(&log, as_dyn(&info.error), "intermediate", vec![latency(start)]);
                let log = log.clone();
                Box::new(move |done: CreateSessionDoneInfo| {
                    let mut fields = vec![latency(start), Field::uint("attempts", done.attempts as u64)];
                    match &done.error {
                        None => {
                            if let Some(session) = &done.session {
                                fields.extend(session_fields(session));
                            }
                            log.debug("finish", fields)
                        }
                        Some(err) => {
                            fields.insert(0, version());
                            fields.push(Field::error(err));
                            log.error("finish", fields)
                        }
                    }
                })
            })
        },
    ));
    t.on_do = Some(retry_helper(&log.named("do")));
    t.on_do_tx = Some(retry_helper(&log.named("doTx")));
}

/// `do` and `doTx` wrap a retry loop; a nested call is reported on the
/// same scope before the loop starts.
fn retry_helper(log: &Logger) -> OnStartStream<DoStartInfo, DoIntermediateInfo, DoDoneInfo> {
    let log = log.clone();
    Box::new(move |info: DoStartInfo| -> OnIntermediate<DoIntermediateInfo, DoDoneInfo> {
        if info.nested_call {
            log.error("nested call", vec![version()]);
        }
        let attempts = RetryLog::start(&log, info.idempotent);
        Box::new(move |info: DoIntermediateInfo| -> OnDone<DoDoneInfo> {
            attempts.intermediate(info.error.as_ref());
            let attempts = attempts.clone();
            Box::new(move |done: DoDoneInfo| attempts.done(done.attempts, done.error.as_ref()))
        })
    })
}

fn session_lifecycle(log: &Logger, t: &mut Table) {
    let l = log.clone();
    t.on_session_new = Some(Box::new(move |_: SessionNewStartInfo| -> OnDone<SessionNewDoneInfo> {
        l.debug("try to create", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: SessionNewDoneInfo| match (&done.error, &done.session) {
            (None, session) => {
                let mut fields = vec![latency(start)];
                if let Some(session) = session {
                    fields.extend(session_fields(session));
                }
                log.info("created", fields)
            }
            (Some(err), _) => log.error("create failed", vec![version(), latency(start), Field::error(err)]),
        })
    }));
    let l = log.clone();
    t.on_session_delete = Some(Box::new(move |info: SessionDeleteStartInfo| -> OnDone<SessionDeleteDoneInfo> {
        l.debug("try to delete", session_fields(&info.session).to_vec());
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: SessionDeleteDoneInfo| {
            let mut fields = vec![latency(start)];
            fields.extend(session_fields(&info.session));
            match &done.error {
                None => log.debug("deleted", fields),
                Some(err) => {
                    fields.insert(0, version());
                    fields.push(Field::error(err));
                    log.warn("delete failed", fields)
                }
            }
        })
    }));
    let l = log.clone();
    t.on_session_keep_alive = Some(Box::new(move |info: KeepAliveStartInfo| -> OnDone<KeepAliveDoneInfo> {
        l.debug("keep-aliving", session_fields(&info.session).to_vec());
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: KeepAliveDoneInfo| {
            let mut fields = vec![latency(start)];
            fields.extend(session_fields(&info.session));
            match &done.error {
                None => log.debug("keep-alived", fields),
                Some(err) => {
                    fields.insert(0, version());
                    fields.push(Field::error(err));
                    log.warn("keep-alive failed", fields)
                }
            }
        })
    }));
}

fn query_invoke(log: &Logger, t: &mut Table, opts: Options) {
    let l = log.clone();
    t.on_session_query_prepare = Some(Box::new(
        move |info: PrepareDataQueryStartInfo| -> OnDone<PrepareDataQueryDoneInfo> {
            let mut fields = session_fields(&info.session).to_vec();
            fields.extend(opts.query_field("query", &info.query));
            l.debug("preparing", fields);
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |done: PrepareDataQueryDoneInfo| {
                let mut fields = vec![latency(start)];
                fields.extend(session_fields(&info.session));
                match &done.error {
                    None => {
                        fields.extend(opts.query_field("statement", &done.statement));
                        log.debug("prepared", fields)
                    }
                    Some(err) => {
                        fields.insert(0, version());
                        fields.extend(opts.query_field("query", &info.query));
                        fields.push(Field::error(err));
                        log.error("prepare failed", fields)
                    }
                }
            })
        },
    ));
    let l = log.clone();
    t.on_session_query_execute = Some(Box::new(
        move |info: ExecuteDataQueryStartInfo| -> OnDone<ExecuteDataQueryDoneInfo> {
            let mut fields = session_fields(&info.session).to_vec();
            fields.extend(opts.query_field("query", &info.query));
            fields.extend([
                Field::string("params", info.parameters.as_str()),
                Field::bool("keepInCache", info.keep_in_cache),
            ]);
            l.debug("executing", fields);
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |done: ExecuteDataQueryDoneInfo| {
                let mut fields = vec![latency(start)];
                fields.extend(session_fields(&info.session));
                match &done.error {
                    None => {
                        fields.extend([
                            Field::string("tx", done.tx.as_deref().unwrap_or_default()),
                            Field::bool("prepared", done.prepared),
                            Field::named_error_opt("resultErr", as_dyn(&done.result_error)),
                        ]);
                        log.debug("executed", fields)
                    }
                    Some(err) => {
                        fields.insert(0, version());
                        fields.extend(opts.query_field("query", &info.query));
                        fields.extend([
                            Field::string("params", info.parameters.as_str()),
                            Field::bool("prepared", done.prepared),
                            Field::error(err),
                        ]);
                        log.error("execute failed", fields)
                    }
                }
            })
        },
    ));
}

fn query_stream(log: &Logger, t: &mut Table, opts: Options) {
    let l = log.clone();
    t.on_session_query_stream_execute = Some(Box::new(
        move |info: StreamExecuteStartInfo| -> OnIntermediate<StreamExecuteIntermediateInfo, StreamExecuteDoneInfo> {
            let mut fields = session_fields(&info.session).to_vec();
            fields.extend(opts.query_field("query", &info.query));
            fields.push(Field::string("params", info.parameters.as_str()));
            l.debug("executing", fields.clone());
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |step: StreamExecuteIntermediateInfo| -> OnDone<StreamExecuteDoneInfo> {
                let mut step_fields = vec![latency(start)];
                step_fields.extend(fields.iter().cloned());
                match &step.error {
                    None => log.debug("intermediate", step_fields),
                    Some(err) => {
                        step_fields.insert(0, version());
                        step_fields.push(Field::error(err));
                        log.error("intermediate failed", step_fields)
                    }
                }
                let (log, fields) = (log.clone(), fields.clone());
                Box::new(move |done: StreamExecuteDoneInfo| {
                    let mut done_fields = vec![latency(start)];
                    done_fields.extend(fields);
                    match &done.error {
                        None => log.debug("executed", done_fields),
                        Some(err) => {
                            done_fields.insert(0, version());
                            done_fields.push(Field::error(err));
                            log.error("execute failed", done_fields)
                        }
                    }
                })
            })
        },
    ));
    let l = log.clone();
    t.on_session_query_stream_read = Some(Box::new(
        move |info: StreamReadStartInfo| -> OnIntermediate<StreamReadIntermediateInfo, StreamReadDoneInfo> {
            let fields = session_fields(&info.session);
            l.debug("reading", fields.to_vec());
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |step: StreamReadIntermediateInfo| -> OnDone<StreamReadDoneInfo> {
                let mut step_fields = vec![latency(start)];
                step_fields.extend(fields.iter().cloned());
                match &step.error {
                    None => log.debug("intermediate", step_fields),
                    Some(err) => {
                        step_fields.insert(0, version());
                        step_fields.push(Field::error(err));
                        log.error("intermediate failed", step_fields)
                    }
                }
                let (log, fields) = (log.clone(), fields.clone());
                Box::new(move |done: StreamReadDoneInfo| {
                    let mut done_fields = vec![latency(start)];
                    done_fields.extend(fields);
                    match &done.error {
                        None => log.debug("read", done_fields),
                        Some(err) => {
                            done_fields.insert(0, version());
                            done_fields.push(Field::error(err));
                            log.error("read failed", done_fields)
                        }
                    }
                })
            })
        },
    ));
}

fn transaction(log: &Logger, t: &mut Table) {
    let l = log.clone();
    t.on_session_transaction_begin = Some(Box::new(move |info: TxBeginStartInfo| -> OnDone<TxBeginDoneInfo> {
        l.debug("beginning", session_fields(&info.session).to_vec());
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: TxBeginDoneInfo| {
            let mut fields = vec![latency(start)];
            fields.extend(session_fields(&info.session));
            match &done.error {
                None => {
                    fields.push(Field::string("tx", done.tx.as_deref().unwrap_or_default()));
                    log.debug("began", fields)
                }
                Some(err) => {
                    fields.insert(0, version());
                    fields.push(Field::error(err));
                    log.debug("begin failed", fields)
                }
            }
        })
    }));
    t.on_session_transaction_commit =
        Some(tx_end(log, "committing", "committed", "commit failed", Level::Debug));
    t.on_session_transaction_rollback =
        Some(tx_end(log, "try to rollback", "rollback done", "rollback failed", Level::Error));
}

fn tx_end(
    log: &Logger,
    start_msg: &'static str,
    done_msg: &'static str,
    failed_msg: &'static str,
    failed_level: Level,
) -> crate::trace::OnStart<TxEndStartInfo, TxEndDoneInfo> {
    let l = log.clone();
    Box::new(move |info: TxEndStartInfo| -> OnDone<TxEndDoneInfo> {
        let mut fields = session_fields(&info.session).to_vec();
        fields.push(Field::string("tx", info.tx.as_str()));
        l.debug(start_msg, fields.clone());
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: TxEndDoneInfo| {
            fields.insert(0, latency(start));
            match &done.error {
                None => log.debug(done_msg, fields),
                Some(err) => {
                    fields.insert(0, version());
                    fields.push(Field::error(err));
                    log.log(failed_level, failed_msg, fields)
                }
            }
        })
    })
}

fn pool_lifecycle(log: &Logger, t: &mut Table) {
    let l = log.clone();
    t.on_pool_session_add = Some(Box::new(move |info: PoolSessionInfo| {
        l.debug("session added to pool", session_fields(&info.session).to_vec())
    }));
    let l = log.clone();
    t.on_pool_session_remove = Some(Box::new(move |info: PoolSessionInfo| {
        l.debug("session removed from pool", session_fields(&info.session).to_vec())
    }));
    let l = log.clone();
    t.on_pool_state_change = Some(Box::new(move |info: PoolStateChangeInfo| {
        l.debug(
            "change",
            vec![Field::uint("size", info.size as u64), Field::string("event", info.event)],
        )
    }));
}

fn pool_api(log: &Logger, t: &mut Table) {
    let l = log.clone();
    t.on_pool_put = Some(Box::new(move |info: PoolPutStartInfo| -> OnDone<PoolPutDoneInfo> {
        l.debug("putting", session_fields(&info.session).to_vec());
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: PoolPutDoneInfo| {
            let mut fields = vec![latency(start)];
            fields.extend(session_fields(&info.session));
            match &done.error {
                None => log.debug("put", fields),
                Some(err) => {
                    fields.insert(0, version());
                    fields.push(Field::error(err));
                    log.error("put failed", fields)
                }
            }
        })
    }));
    let l = log.clone();
    t.on_pool_get = Some(Box::new(move |_: PoolGetStartInfo| -> OnDone<PoolGetDoneInfo> {
        l.debug("getting", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: PoolGetDoneInfo| {
            let mut fields = vec![latency(start), Field::uint("attempts", done.attempts as u64)];
            match &done.error {
                None => {
                    if let Some(session) = &done.session {
                        fields.extend(session_fields(session));
                    }
                    log.debug("got", fields)
                }
                Some(err) => {
                    fields.insert(0, version());
                    fields.push(Field::error(err));
                    log.warn("get failed", fields)
                }
            }
        })
    }));
    let l = log.clone();
    t.on_pool_wait = Some(Box::new(move |_: PoolWaitStartInfo| -> OnDone<PoolWaitDoneInfo> {
        l.debug("waiting", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: PoolWaitDoneInfo| {
            let mut fields = vec![latency(start)];
            match (&done.error, &done.session) {
                (None, Some(session)) => {
                    fields.extend(session_fields(session));
                    log.debug("wait done", fields)
                }
                (None, None) => log.debug("wait done without any significant result", fields),
                (Some(err), Some(session)) => {
                    fields.insert(0, version());
                    fields.extend(session_fields(session));
                    fields.push(Field::error(err));
                    log.warn("wait failed", fields)
                }
                (Some(err), None) => {
                    fields.push(Field::error(err));
                    log.debug("wait failed without any significant result", fields)
                }
            }
        })
    }));
}
