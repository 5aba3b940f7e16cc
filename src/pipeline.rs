use std::error::Error;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};

use crate::backend::LogBackend;
use crate::init::PipelineConfig;
use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::LogSink;

/// Give up on a batch after this many failed sends.
const MAX_SEND_ATTEMPTS: u32 = 5;

/// Counters shared between [`SinkBackend`] and its background task.
#[derive(Debug, Default)]
pub struct PipelineStats {
    /// Records offered to the backend at an enabled level.
    pub total_events: AtomicU64,
    /// Successfully enqueued into the channel.
    pub enqueued_events: AtomicU64,
    /// Accepted by the sink.
    pub sent_events: AtomicU64,
    /// Dropped because the channel was full or the sink kept failing.
    pub dropped_events: AtomicU64,
}

/// [`LogBackend`] that forwards records to an asynchronous [`LogSink`] via
/// a bounded channel and a background task.
///
/// `emit` never blocks: when the channel is full the record is dropped and
/// counted. Sink I/O is fully decoupled from driver threads.
pub struct SinkBackend {
    sender: mpsc::Sender<LogRecord>,
    min_level: Level,
    service_name: Option<String>,
    stats: Arc<PipelineStats>,
}

impl SinkBackend {
    /// Create the backend and spawn the task that pulls [`LogRecord`]s from
    /// the channel and sends them to `sink` in batches.
    ///
    /// Must be called from within a Tokio runtime. The task ends once every
    /// clone of the backend is dropped and the channel is drained; the sink
    /// is flushed on the way out.
    pub fn new(sink: Arc<dyn LogSink>, config: &PipelineConfig) -> (Self, JoinHandle<()>) {
        // Enforce minimal thresholds to avoid degenerate configs.
        let buffer = config.channel_buffer.max(16);
        let batch_size = config.batch_size.max(1);
        let flush_interval = config.flush_interval.max(Duration::from_millis(10));

        let (tx, mut rx) = mpsc::channel::<LogRecord>(buffer);
        let stats = Arc::new(PipelineStats::default());
        let stats_bg = Arc::clone(&stats);

        let handle = tokio::spawn(async move {
            let mut batch = Vec::with_capacity(batch_size);
            let mut ticker = interval(flush_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(record) => {
                            batch.push(record);
                            if batch.len() >= batch_size {
                                send_batch(&*sink, &mut batch, &stats_bg).await;
                            }
                        }
                        None => break,
                    },
                    _ = ticker.tick() => {
                        if !batch.is_empty() {
                            send_batch(&*sink, &mut batch, &stats_bg).await;
                        }
                    }
                }
            }

            if !batch.is_empty() {
                send_batch(&*sink, &mut batch, &stats_bg).await;
            }
            if let Err(e) = sink.flush().await {
                eprintln!("error flushing log sink: {}", e);
            }
        });

        (
            Self {
                sender: tx,
                min_level: config.min_level,
                service_name: config.service_name.clone(),
                stats,
            },
            handle,
        )
    }

    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }
}

async fn send_batch(sink: &dyn LogSink, batch: &mut Vec<LogRecord>, stats: &PipelineStats) {
    let mut backoff = Duration::from_millis(100);
    let max_backoff = Duration::from_secs(10);
    let mut sent = 0;

    for attempt in 1..=MAX_SEND_ATTEMPTS {
        match send_from(sink, &batch[sent..]).await {
            Ok(()) => {
                stats.sent_events.fetch_add((batch.len() - sent) as u64, Ordering::Relaxed);
                batch.clear();
                return;
            }
            Err((accepted, e)) => {
                sent += accepted;
                stats.sent_events.fetch_add(accepted as u64, Ordering::Relaxed);
                if attempt == MAX_SEND_ATTEMPTS {
                    eprintln!("log sink send failed, dropping {} records: {}", batch.len() - sent, e);
                    break;
                }
                eprintln!("log sink send failed, retrying in {:?}: {}", backoff, e);
                sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, max_backoff);
            }
        }
    }

    stats.dropped_events.fetch_add((batch.len() - sent) as u64, Ordering::Relaxed);
    batch.clear();
}

/// Send records in order; on failure report how many were accepted first.
async fn send_from(
    sink: &dyn LogSink,
    records: &[LogRecord],
) -> Result<(), (usize, Box<dyn Error + Send + Sync>)> {
    for (i, record) in records.iter().enumerate() {
        sink.send(record).await.map_err(|e| (i, e))?;
    }
    Ok(())
}

impl LogBackend for SinkBackend {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn emit(&self, mut record: LogRecord) {
        if record.level < self.min_level {
            return;
        }
        self.stats.total_events.fetch_add(1, Ordering::Relaxed);
        if record.service_name.is_none() {
            record.service_name = self.service_name.clone();
        }

        match self.sender.try_send(record) {
            Ok(()) => {
                self.stats.enqueued_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(_)) => {
                self.stats.dropped_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("log channel full, dropping log record");
            }
            Err(TrySendError::Closed(_)) => {
                self.stats.dropped_events.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
