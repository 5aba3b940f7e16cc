use std::sync::Arc;

use driver_trace_log::trace::discovery::{DiscoverDoneInfo, DiscoverStartInfo};
use driver_trace_log::trace::{self, Details, DriverError};
use driver_trace_log::{with_traces, Level, Logger, MemoryBackend, Options, Value};

#[derive(Debug, thiserror::Error)]
#[error("deadline exceeded")]
struct Deadline;

#[test]
fn only_discovery_emits_when_only_discovery_is_enabled() {
    let backend = Arc::new(MemoryBackend::with_min_level(Level::Trace));
    let log = Logger::new(backend.clone());
    let traces = with_traces(&log, Details::DISCOVERY, &Options::default().with_log_query());

    assert!(traces.driver.on_net_read.is_none());
    assert!(traces.table.on_do.is_none());
    assert!(traces.topic.on_reader_reconnect.is_none());
    assert!(traces.scripting.on_execute.is_none());
    assert!(traces.database_sql.on_conn_exec.is_none());
    assert!(traces.retry.on_retry.is_none());

    let done = trace::start(
        &traces.discovery.on_discover,
        DiscoverStartInfo { address: "grpc://db:2135".into(), database: "/local".into() },
    );
    done(DiscoverDoneInfo { endpoints: vec![], error: Some(DriverError::external(Deadline)) });

    let records = backend.records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].level, Level::Debug);
    assert_eq!(records[0].message, "try to discover");
    assert_eq!(records[0].logger, "discovery");
    assert_eq!(records[0].field("address"), Some(&Value::Str("grpc://db:2135".into())));

    assert_eq!(records[1].level, Level::Error);
    assert_eq!(records[1].message, "discover failed");
    assert_eq!(records[1].field("error"), Some(&Value::Error("deadline exceeded".into())));
    assert_eq!(records[1].field("version"), Some(&Value::Str(driver_trace_log::VERSION.into())));
    assert!(matches!(records[1].field("latency"), Some(Value::Duration(_))));
}
