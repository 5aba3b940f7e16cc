use std::sync::Arc;
use std::time::Instant;

use driver_trace_log::init::{init_sink_logger, PipelineConfig};
use driver_trace_log::noop_sink::NoopSink;
use driver_trace_log::trace::{self, driver::NetReadDoneInfo, driver::NetReadStartInfo, Details};

#[tokio::main]
async fn main() {
    let sink = Arc::new(NoopSink::default());
    let (log, handle) = init_sink_logger(sink.clone(), &PipelineConfig::default());
    let hooks = driver_trace_log::driver(&log, Details::DRIVER_NET);
    drop(log);

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let done = trace::start(&hooks.on_net_read, NetReadStartInfo { address: "127.0.0.1:2135".into() });
        done(NetReadDoneInfo { received: i as usize, error: None });
    }

    let elapsed = start.elapsed();
    println!(
        "default config: traced {} reads in {:?} (~{:.0} ev/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Dropping the hooks releases the last logger and lets the pipeline drain.
    drop(hooks);
    let _ = handle.await;
    println!("sink received {} records", sink.received());
}
