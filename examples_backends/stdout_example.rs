use driver_trace_log::structural::{RecordPool, StructuralLogger};
use driver_trace_log::trace::table::{PoolGetDoneInfo, PoolGetStartInfo};
use driver_trace_log::trace::{self, Details, Session};
use driver_trace_log::{init_tracing, with_traces, Options};

/// Logs through a `tracing` fmt subscriber on stdout. Set `RUST_LOG` to
/// change the filter (default `debug`).
fn main() -> Result<(), driver_trace_log::Error> {
    let log = init_tracing()?;

    let traces = with_traces(&log, Details::TABLE_POOL_API | Details::RETRY, &Options::default());
    let done = trace::start(&traces.table.on_pool_get, PoolGetStartInfo {});
    done(PoolGetDoneInfo {
        session: Some(Session { id: "session-1".into(), status: "ready".into() }),
        attempts: 1,
        error: None,
    });

    let structural = StructuralLogger::new(log.named("app"), RecordPool::default());
    structural.info().string("component", "stdout example").bool("ok", true).message("finished");
    Ok(())
}
