use std::time::Instant;

use crate::field::{latency, version, Field};
use crate::level::Level;
use crate::logger::Logger;
use crate::trace::retry::{RetryLoopDoneInfo, RetryLoopIntermediateInfo, RetryLoopStartInfo};
use crate::trace::{Detailer, Details, DriverError, OnDone, OnIntermediate, Retry};

/// Retry-loop hooks, logged under `retry`.
pub fn retry(log: &Logger, d: impl Detailer) -> Retry {
    let mut t = Retry::default();
    if !d.details().contains(Details::RETRY) {
        return t;
    }
    let log = log.named("retry");
    t.on_retry = Some(Box::new(
        move |info: RetryLoopStartInfo| -> OnIntermediate<RetryLoopIntermediateInfo, RetryLoopDoneInfo> {
            let attempts = RetryLog::start(&log, info.idempotent);
            Box::new(move |info: RetryLoopIntermediateInfo| -> OnDone<RetryLoopDoneInfo> {
                attempts.intermediate(info.error.as_ref());
                let attempts = attempts.clone();
                Box::new(move |info: RetryLoopDoneInfo| attempts.done(info.attempts, info.error.as_ref()))
            })
        },
    ));
    t
}

/// Severity for an error: `recognized` when the driver classified it,
/// debug otherwise.
pub(crate) fn classified(err: &DriverError, recognized: Level) -> Level {
    if err.is_driver_error() {
        recognized
    } else {
        Level::Debug
    }
}

/// `retryable`, `deleteSession` and `code` as classified by the driver.
pub(crate) fn classification(err: &DriverError, idempotent: bool) -> [Field; 3] {
    [
        Field::bool("retryable", err.must_retry(idempotent)),
        Field::bool("deleteSession", err.must_delete_session()),
        Field::int("code", err.code()),
    ]
}

/// Log lines of one retry loop, shared by the retry hooks and the table
/// `do`/`doTx` helpers.
#[derive(Clone)]
pub(crate) struct RetryLog {
    log: Logger,
    idempotent: bool,
    start: Instant,
}

impl RetryLog {
    pub(crate) fn start(log: &Logger, idempotent: bool) -> Self {
        log.debug("init", vec![Field::bool("idempotent", idempotent)]);
        RetryLog { log: log.clone(), idempotent, start: Instant::now() }
    }

    pub(crate) fn intermediate(&self, err: Option<&DriverError>) {
        match err {
            None => self.log.debug(
                "attempt",
                vec![latency(self.start), Field::bool("idempotent", self.idempotent)],
            ),
            Some(err) => self.log.log(classified(err, Level::Warn), "intermediate", self.failure_fields(err)),
        }
    }

    pub(crate) fn done(&self, attempts: usize, err: Option<&DriverError>) {
        match err {
            None => self.log.debug(
                "finish",
                vec![
                    latency(self.start),
                    Field::bool("idempotent", self.idempotent),
                    Field::uint("attempts", attempts as u64),
                ],
            ),
            Some(err) => self.log.log(classified(err, Level::Error), "done", self.failure_fields(err)),
        }
    }

    fn failure_fields(&self, err: &DriverError) -> Vec<Field> {
        let mut fields = vec![version(), latency(self.start), Field::bool("idempotent", self.idempotent)];
        fields.extend(classification(err, self.idempotent));
        fields.push(Field::error(err));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::Value;
    use crate::trace::{self, RetryMode};
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    #[error("context canceled")]
    struct Canceled;

    fn overloaded() -> DriverError {
        DriverError::Operation {
            code: 400060,
            message: "overloaded".into(),
            retry: RetryMode::Always,
            delete_session: false,
        }
    }

    #[test]
    fn disabled_without_retry_bit() {
        let log = Logger::new(Arc::new(MemoryBackend::new()));
        assert!(retry(&log, Details::TABLE).on_retry.is_none());
    }

    #[test]
    fn recognized_errors_are_louder_than_foreign_ones() {
        let backend = Arc::new(MemoryBackend::new());
        let t = retry(&Logger::new(backend.clone()), Details::RETRY);

        let mut intermediate = trace::start_stream(&t.on_retry, RetryLoopStartInfo { idempotent: true });
        let _ = intermediate(RetryLoopIntermediateInfo { error: Some(overloaded()) });
        let done = intermediate(RetryLoopIntermediateInfo { error: Some(DriverError::external(Canceled)) });
        done(RetryLoopDoneInfo { attempts: 2, error: Some(overloaded()) });

        let records = backend.records();
        let levels: Vec<_> = records.iter().map(|r| (r.message.as_str(), r.level)).collect();
        assert_eq!(
            levels,
            [("init", Level::Debug), ("intermediate", Level::Warn), ("intermediate", Level::Debug), ("done", Level::Error)]
        );
        assert!(records.iter().all(|r| r.logger == "retry"));
        assert_eq!(records[1].field("retryable"), Some(&Value::Bool(true)));
        assert_eq!(records[1].field("code"), Some(&Value::Int(400060)));
        assert_eq!(records[2].field("code"), Some(&Value::Int(-1)));
    }

    #[test]
    fn success_path_is_debug() {
        let backend = Arc::new(MemoryBackend::new());
        let t = retry(&Logger::new(backend.clone()), Details::RETRY);

        let mut intermediate = trace::start_stream(&t.on_retry, RetryLoopStartInfo { idempotent: false });
        intermediate(RetryLoopIntermediateInfo { error: None })(RetryLoopDoneInfo { attempts: 1, error: None });

        let records = backend.records();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.level == Level::Debug));
        assert_eq!(records[2].message, "finish");
        assert_eq!(records[2].field("attempts"), Some(&Value::Uint(1)));
    }
}
