use std::sync::Arc;

use async_trait::async_trait;
use driver_trace_log::{
    init::{init_sink_logger, PipelineConfig},
    record::LogRecord,
    sink::LogSink,
    trace::{self, discovery::DiscoverDoneInfo, discovery::DiscoverStartInfo, Details, DriverError, RetryMode},
};

/// Example of integrating a completely custom store by implementing the
/// `LogSink` trait directly. Imagine this talks to some proprietary DB
/// for which this crate does not provide a built-in sink.
struct MyCustomDbSink;

#[async_trait]
impl LogSink for MyCustomDbSink {
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Here you would call your own client library for the target DB.
        println!("[my-custom-db] {}", record.to_json());
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let sink: Arc<dyn LogSink> = Arc::new(MyCustomDbSink);
    let (log, handle) = init_sink_logger(sink, &PipelineConfig::default());

    let hooks = driver_trace_log::discovery(&log, Details::DISCOVERY);
    drop(log);

    let done = trace::start(
        &hooks.on_discover,
        DiscoverStartInfo { address: "grpc://db.example:2135".into(), database: "/local".into() },
    );
    done(DiscoverDoneInfo {
        endpoints: vec![],
        error: Some(DriverError::Transport {
            code: 14,
            message: "connection refused".into(),
            retry: RetryMode::Always,
            delete_session: false,
        }),
    });

    drop(hooks);
    let _ = handle.await;
}
