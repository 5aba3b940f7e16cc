use std::sync::Arc;
use std::time::Instant;
use tokio::time::Duration;

use driver_trace_log::init::{init_sink_logger, PipelineConfig};
use driver_trace_log::noop_sink::NoopSink;
use driver_trace_log::trace::table::{DoDoneInfo, DoIntermediateInfo, DoStartInfo};
use driver_trace_log::trace::{self, Details};
use driver_trace_log::{Level, Options};

#[tokio::main]
async fn main() {
    let sink = Arc::new(NoopSink::default());

    let config = PipelineConfig {
        channel_buffer: 50_000,
        batch_size: 1_000,
        flush_interval: Duration::from_millis(200),
        min_level: Level::Trace,
        service_name: Some("load-test".to_string()),
    };

    let (log, handle) = init_sink_logger(sink.clone(), &config);
    let hooks = driver_trace_log::table(&log, Details::TABLE_EVENTS, &Options::default());
    drop(log);

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let mut attempt = trace::start_stream(&hooks.on_do, DoStartInfo { idempotent: true, nested_call: false });
        attempt(DoIntermediateInfo { error: None })(DoDoneInfo { attempts: 1 + (i % 3) as usize, error: None });
    }

    let elapsed = start.elapsed();
    println!(
        "custom config: traced {} retry loops in {:?} (~{:.0} loops/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    drop(hooks);
    let _ = handle.await;
    println!("sink received {} records", sink.received());
}
