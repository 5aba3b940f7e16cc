use std::time::Instant;

use crate::field::{latency, version, Field};
use crate::logger::Logger;
use crate::options::Options;
use crate::trace::error::as_dyn;
use crate::trace::scripting::*;
use crate::trace::{Detailer, Details, OnDone, OnIntermediate, Scripting};

/// Scripting-client hooks, logged under `scripting`.
pub fn scripting(log: &Logger, d: impl Detailer, opts: &Options) -> Scripting {
    let mut t = Scripting::default();
    if !d.details().contains(Details::SCRIPTING) {
        return t;
    }
    let log = log.named("scripting");
    let opts = *opts;

    let l = log.clone();
    t.on_execute = Some(Box::new(move |_: ExecuteStartInfo| -> OnDone<ExecuteDoneInfo> {
        l.debug("execute start", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: ExecuteDoneInfo| match &done.error {
            None => log.debug(
                "execute done",
                vec![
                    latency(start),
                    Field::uint("resultSetCount", done.result_set_count as u64),
                    Field::named_error_opt("error", as_dyn(&done.result_error)),
                ],
            ),
            Some(err) => log.error("execute failed", vec![version(), latency(start), Field::error(err)]),
        })
    }));

    let l = log.clone();
    t.on_explain = Some(Box::new(move |_: ExplainStartInfo| -> OnDone<ExplainDoneInfo> {
        l.debug("explain start", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: ExplainDoneInfo| match &done.error {
            None => log.debug("explain done", vec![latency(start), Field::string("plan", done.plan)]),
            Some(err) => log.error("explain failed", vec![version(), latency(start), Field::error(err)]),
        })
    }));

    let l = log.clone();
    t.on_stream_execute = Some(Box::new(
        move |info: StreamExecuteStartInfo| -> OnIntermediate<StreamExecuteIntermediateInfo, StreamExecuteDoneInfo> {
            let mut query = Vec::with_capacity(2);
            if let Some(field) = opts.query_field("query", &info.query) {
                query.extend([field, Field::string("params", info.parameters)]);
            }
            l.debug("stream execute start", query.clone());
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |step: StreamExecuteIntermediateInfo| -> OnDone<StreamExecuteDoneInfo> {
                match &step.error {
                    None => log.debug("stream execute intermediate", vec![]),
                    Some(err) => {
                        log.warn("stream execute intermediate failed", vec![version(), Field::error(err)])
                    }
                }
                let (log, mut fields) = (log.clone(), query.clone());
                Box::new(move |done: StreamExecuteDoneInfo| {
                    fields.insert(0, latency(start));
                    match &done.error {
                        None => log.debug("stream execute done", fields),
                        Some(err) => {
                            fields.insert(0, version());
                            fields.push(Field::error(err));
                            log.error("stream execute failed", fields)
                        }
                    }
                })
            })
        },
    ));

    let l = log;
    t.on_close = Some(Box::new(move |_: CloseStartInfo| -> OnDone<CloseDoneInfo> {
        l.debug("close start", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: CloseDoneInfo| match &done.error {
            None => log.debug("close done", vec![latency(start)]),
            Some(err) => log.error("close failed", vec![version(), latency(start), Field::error(err)]),
        })
    }));
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::Value;
    use crate::level::Level;
    use crate::trace::{self, DriverError};
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    #[error("script aborted")]
    struct Aborted;

    fn stream_start() -> StreamExecuteStartInfo {
        StreamExecuteStartInfo { query: "SELECT 1".into(), parameters: "{}".into() }
    }

    #[test]
    fn stream_execute_levels() {
        let backend = Arc::new(MemoryBackend::new());
        let t = scripting(&Logger::new(backend.clone()), Details::SCRIPTING, &Options::default());

        let mut step = trace::start_stream(&t.on_stream_execute, stream_start());
        let _ = step(StreamExecuteIntermediateInfo { error: Some(DriverError::external(Aborted)) });
        step(StreamExecuteIntermediateInfo { error: None })(StreamExecuteDoneInfo {
            error: Some(DriverError::external(Aborted)),
        });

        let records = backend.records();
        let seen: Vec<_> = records.iter().map(|r| r.level).collect();
        assert_eq!(seen, [Level::Debug, Level::Warn, Level::Debug, Level::Error]);
        assert!(records.iter().all(|r| r.field("query").is_none()));
    }

    #[test]
    fn stream_execute_with_query_text() {
        let backend = Arc::new(MemoryBackend::new());
        let opts = Options::default().with_log_query();
        let t = scripting(&Logger::new(backend.clone()), Details::SCRIPTING, &opts);

        let mut step = trace::start_stream(&t.on_stream_execute, stream_start());
        step(StreamExecuteIntermediateInfo { error: None })(StreamExecuteDoneInfo { error: None });

        let records = backend.records();
        assert_eq!(records[0].field("query"), Some(&Value::Str("SELECT 1".into())));
        assert_eq!(records[2].message, "stream execute done");
        assert_eq!(records[2].field("params"), Some(&Value::Str("{}".into())));
    }

    #[test]
    fn explain_done_carries_plan() {
        let backend = Arc::new(MemoryBackend::new());
        let t = scripting(&Logger::new(backend.clone()), Details::SCRIPTING, &Options::default());
        trace::start(&t.on_explain, ExplainStartInfo { query: "SELECT 1".into() })(ExplainDoneInfo {
            plan: "{\"Plan\":{}}".into(),
            error: None,
        });

        let last = backend.records().pop().unwrap();
        assert_eq!(last.logger, "scripting");
        assert_eq!(last.field("plan"), Some(&Value::Str("{\"Plan\":{}}".into())));
    }
}
