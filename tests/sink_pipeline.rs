use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use driver_trace_log::record::LogRecord;
use driver_trace_log::sink::LogSink;
use driver_trace_log::trace::table::{SessionDeleteDoneInfo, SessionDeleteStartInfo};
use driver_trace_log::trace::{self, Details, DriverError, RetryMode, Session};
use driver_trace_log::{init_sink_logger, Level, Options, PipelineConfig};
use tokio::sync::Mutex;

#[derive(Default)]
struct CollectSink {
    records: Mutex<Vec<LogRecord>>,
}

#[async_trait]
impl LogSink for CollectSink {
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}

#[tokio::test]
async fn hook_records_reach_the_sink_as_json() {
    let sink = Arc::new(CollectSink::default());
    let config = PipelineConfig {
        min_level: Level::Warn,
        service_name: Some("orders".into()),
        ..PipelineConfig::default()
    };
    let (log, handle) = init_sink_logger(sink.clone(), &config);
    let table = driver_trace_log::table(&log, Details::TABLE_SESSION_LIFECYCLE, &Options::default());
    drop(log);

    let session = Session { id: "s-1".into(), status: "busy".into() };
    let done = trace::start(&table.on_session_delete, SessionDeleteStartInfo { session });
    done(SessionDeleteDoneInfo {
        error: Some(DriverError::Operation {
            code: 400150,
            message: "session busy".into(),
            retry: RetryMode::IdempotentOnly,
            delete_session: true,
        }),
    });
    drop(table);
    handle.await.unwrap();

    let records = sink.records.lock().await;
    assert_eq!(records.len(), 1);
    let json = records[0].to_json();
    assert_eq!(json["level"], "warn");
    assert_eq!(json["logger"], "table.session");
    assert_eq!(json["message"], "delete failed");
    assert_eq!(json["service_name"], "orders");
    assert_eq!(json["fields"]["id"], "s-1");
    assert_eq!(json["fields"]["error"], "operation failed (code = 400150): session busy");
}
