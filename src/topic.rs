use std::time::Instant;

use crate::field::{latency, Field};
use crate::level::{log_debug_info, log_debug_warn, log_info_warn};
use crate::logger::Logger;
use crate::trace::error::as_dyn;
use crate::trace::topic::*;
use crate::trace::{Detailer, Details, OnDone, OnIntermediate, Topic};

/// Topic reader and writer hooks, logged under `topic`.
///
/// Start context goes on a child logger built with [`Logger::with`], so the
/// completion entry repeats it.
pub fn topic(log: &Logger, d: impl Detailer) -> Topic {
    let details = d.details();
    let log = log.named("topic");
    let mut t = Topic::default();
    let reader = log.named("reader");
    if details.contains(Details::TOPIC_READER_STREAM_LIFECYCLE) {
        reader_lifecycle(&reader.named("lifecycle"), &mut t);
    }
    if details.contains(Details::TOPIC_READER_PARTITION) {
        reader_partition(&reader.named("partition"), &mut t);
    }
    if details.contains(Details::TOPIC_READER_STREAM) {
        reader_stream(&reader.named("stream"), &mut t);
    }
    if details.contains(Details::TOPIC_READER_MESSAGE) {
        reader_message(&reader.named("message"), &mut t);
    }
    let writer = log.named("writer");
    if details.contains(Details::TOPIC_WRITER_STREAM_LIFECYCLE) {
        writer_lifecycle(&writer.named("lifecycle"), &mut t);
    }
    if details.contains(Details::TOPIC_WRITER_STREAM) {
        writer_stream(&writer.named("stream"), &mut t);
    }
    t
}

fn reader_lifecycle(log: &Logger, t: &mut Topic) {
    let l = log.clone();
    t.on_reader_reconnect = Some(Box::new(
        move |_: ReaderReconnectStartInfo| -> OnDone<ReaderReconnectDoneInfo> {
            l.debug("reconnecting", vec![]);
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |done: ReaderReconnectDoneInfo| {
                log_info_warn(&log, as_dyn(&done.error), "reconnected", vec![latency(start)])
            })
        },
    ));
    let l = log.clone();
    t.on_reader_reconnect_request = Some(Box::new(move |info: ReaderReconnectRequestInfo| {
        l.debug(
            "request reconnect",
            vec![
                Field::named_error_opt("reason", as_dyn(&info.reason)),
                Field::bool("was_sent", info.was_sent),
            ],
        )
    }));
}

fn reader_partition(log: &Logger, t: &mut Topic) {
    let l = log.clone();
    t.on_reader_partition_read_start_response = Some(Box::new(
        move |info: PartitionReadStartResponseStartInfo| -> OnDone<PartitionReadStartResponseDoneInfo> {
            let log = l.with(vec![
                Field::string("topic", info.topic),
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::int("partition_id", info.partition_id),
                Field::int("partition_session_id", info.partition_session_id),
            ]);
            log.debug("read partition response starting...", vec![]);
            let start = Instant::now();
            Box::new(move |done: PartitionReadStartResponseDoneInfo| {
                log_info_warn(
                    &log,
                    as_dyn(&done.error),
                    "read partition response completed",
                    vec![
                        latency(start),
                        Field::int_opt("commit_offset", done.commit_offset),
                        Field::int_opt("read_offset", done.read_offset),
                    ],
                )
            })
        },
    ));
    let l = log.clone();
    t.on_reader_partition_read_stop_response = Some(Box::new(
        move |info: PartitionReadStopResponseStartInfo| -> OnDone<PartitionReadStopResponseDoneInfo> {
            let log = l.with(vec![
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::string("topic", info.topic),
                Field::int("partition_id", info.partition_id),
                Field::int("partition_session_id", info.partition_session_id),
                Field::int("committed_offset", info.committed_offset),
                Field::bool("graceful", info.graceful),
            ]);
            log.debug("reader partition stopping", vec![]);
            let start = Instant::now();
            Box::new(move |done: PartitionReadStopResponseDoneInfo| {
                log_info_warn(&log, as_dyn(&done.error), "reader partition stopped", vec![latency(start)])
            })
        },
    ));
}

fn reader_stream(log: &Logger, t: &mut Topic) {
    let l = log.clone();
    t.on_reader_stream_commit = Some(Box::new(move |info: StreamCommitStartInfo| -> OnDone<StreamCommitDoneInfo> {
        let log = l.with(vec![
            Field::string("topic", info.topic),
            Field::int("partition_id", info.partition_id),
            Field::int("partition_session_id", info.partition_session_id),
            Field::int("commit_start_offset", info.start_offset),
            Field::int("commit_end_offset", info.end_offset),
        ]);
        log.debug("start committing...", vec![]);
        let start = Instant::now();
        Box::new(move |done: StreamCommitDoneInfo| {
            log_debug_warn(&log, as_dyn(&done.error), "committed", vec![latency(start)])
        })
    }));
    let l = log.clone();
    t.on_reader_stream_send_commit_message = Some(Box::new(
        move |info: StreamSendCommitMessageStartInfo| -> OnDone<StreamSendCommitMessageDoneInfo> {
            let log = l.with(vec![
                Field::ints("partitions_id", info.partition_ids),
                Field::ints("partitions_session_id", info.partition_session_ids),
            ]);
            log.debug("commit message sending...", vec![]);
            let start = Instant::now();
            Box::new(move |done: StreamSendCommitMessageDoneInfo| {
                log_debug_warn(&log, as_dyn(&done.error), "commit message sent", vec![latency(start)])
            })
        },
    ));
    let l = log.clone();
    t.on_reader_stream_committed_notify = Some(Box::new(move |info: StreamCommittedNotifyInfo| {
        l.debug(
            "commit ack",
            vec![
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::string("topic", info.topic),
                Field::int("partition_id", info.partition_id),
                Field::int("partition_session_id", info.partition_session_id),
                Field::int("committed_offset", info.committed_offset),
            ],
        )
    }));
    let l = log.clone();
    t.on_reader_stream_close = Some(Box::new(move |info: StreamCloseStartInfo| -> OnDone<StreamCloseDoneInfo> {
        let log = l.with(vec![
            Field::string("reader_connection_id", info.reader_connection_id),
            Field::named_error_opt("close_reason", as_dyn(&info.close_reason)),
        ]);
        log.debug("stream closing", vec![]);
        let start = Instant::now();
        Box::new(move |done: StreamCloseDoneInfo| {
            log_debug_warn(&log, as_dyn(&done.close_error), "topic reader stream closed", vec![latency(start)])
        })
    }));
    let l = log.clone();
    t.on_reader_stream_init = Some(Box::new(move |info: StreamInitStartInfo| -> OnDone<StreamInitDoneInfo> {
        let log = l.with(vec![
            Field::string("pre_init_reader_connection_id", info.pre_init_reader_connection_id),
            Field::string("consumer", info.consumer),
            Field::strings("topics", info.topics),
        ]);
        log.debug("stream init starting...", vec![]);
        let start = Instant::now();
        Box::new(move |done: StreamInitDoneInfo| {
            log_debug_warn(
                &log,
                as_dyn(&done.error),
                "topic reader stream initialized",
                vec![latency(start), Field::string("reader_connection_id", done.reader_connection_id)],
            )
        })
    }));
    let l = log.clone();
    t.on_reader_stream_error = Some(Box::new(move |info: StreamErrorInfo| {
        l.warn(
            "stream error",
            vec![
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::error(&info.error),
            ],
        )
    }));
    let l = log.clone();
    t.on_reader_stream_update_token = Some(Box::new(
        move |info: UpdateTokenStartInfo| -> OnIntermediate<UpdateTokenReceivedInfo, UpdateTokenDoneInfo> {
            let log = l.with(vec![Field::string("reader_connection_id", info.reader_connection_id)]);
            log.debug("token updating...", vec![]);
            let start = Instant::now();
            Box::new(move |received: UpdateTokenReceivedInfo| -> OnDone<UpdateTokenDoneInfo> {
                log_debug_warn(
                    &log,
                    as_dyn(&received.error),
                    "got token",
                    vec![latency(start), Field::uint("token_len", received.token_len as u64)],
                );
                let log = log.clone();
                Box::new(move |done: UpdateTokenDoneInfo| {
                    log_debug_warn(&log, as_dyn(&done.error), "token updated on stream", vec![latency(start)])
                })
            })
        },
    ));
}

fn reader_message(log: &Logger, t: &mut Topic) {
    let l = log.clone();
    t.on_reader_stream_sent_data_request = Some(Box::new(move |info: SentDataRequestInfo| {
        l.debug(
            "sent data request",
            vec![
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::int("request_bytes", info.request_bytes),
                Field::int("local_capacity", info.local_buffer_size_after_sent),
            ],
        )
    }));
    let l = log.clone();
    t.on_reader_stream_receive_data_response = Some(Box::new(
        move |info: ReceiveDataResponseStartInfo| -> OnDone<ReceiveDataResponseDoneInfo> {
            let log = l.with(vec![
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::int("received_bytes", info.bytes_size),
                Field::int("local_capacity", info.local_buffer_size_after_receive),
                Field::int("partitions_count", info.partitions_count),
                Field::int("batches_count", info.batches_count),
                Field::int("messages_count", info.messages_count),
            ]);
            log.debug("data response received, process starting...", vec![]);
            let start = Instant::now();
            Box::new(move |done: ReceiveDataResponseDoneInfo| {
                log_debug_warn(
                    &log,
                    as_dyn(&done.error),
                    "data response received and processed",
                    vec![latency(start)],
                )
            })
        },
    ));
    let l = log.clone();
    t.on_reader_stream_read_messages = Some(Box::new(
        move |info: ReadMessagesStartInfo| -> OnDone<ReadMessagesDoneInfo> {
            let log = l.with(vec![
                Field::int("min_count", info.min_count),
                Field::int("max_count", info.max_count),
                Field::int("local_capacity_before", info.free_buffer_capacity),
            ]);
            log.debug("read messages called, waiting...", vec![]);
            let start = Instant::now();
            Box::new(move |done: ReadMessagesDoneInfo| {
                log_debug_info(
                    &log,
                    as_dyn(&done.error),
                    "read messages returned",
                    vec![
                        Field::string("topic", done.topic),
                        Field::int("partition_id", done.partition_id),
                        Field::int("messages_count", done.messages_count),
                        Field::int("local_capacity_after", done.free_buffer_capacity),
                        latency(start),
                    ],
                )
            })
        },
    ));
    let l = log.clone();
    t.on_reader_stream_unknown_grpc_message = Some(Box::new(move |info: UnknownGrpcMessageInfo| {
        l.info(
            "received unknown message",
            vec![
                Field::string("reader_connection_id", info.reader_connection_id),
                Field::error(&info.error),
            ],
        )
    }));
}

fn writer_lifecycle(log: &Logger, t: &mut Topic) {
    let l = log.clone();
    t.on_writer_reconnect = Some(Box::new(
        move |info: WriterReconnectStartInfo| -> OnDone<WriterReconnectDoneInfo> {
            let log = l.with(vec![
                Field::string("writer_instance_id", info.writer_instance_id),
                Field::string("topic", info.topic),
                Field::string("producer_id", info.producer_id),
                Field::uint("attempt", info.attempt as u64),
            ]);
            log.debug("reconnecting", vec![]);
            let start = Instant::now();
            Box::new(move |done: WriterReconnectDoneInfo| {
                log_info_warn(&log, as_dyn(&done.error), "reconnected", vec![latency(start)])
            })
        },
    ));
    let l = log.clone();
    t.on_writer_init_stream = Some(Box::new(
        move |info: WriterInitStreamStartInfo| -> OnDone<WriterInitStreamDoneInfo> {
            let log = l.with(vec![
                Field::string("writer_instance_id", info.writer_instance_id),
                Field::string("topic", info.topic),
                Field::string("producer_id", info.producer_id),
            ]);
            log.debug("stream init starting...", vec![]);
            let start = Instant::now();
            Box::new(move |done: WriterInitStreamDoneInfo| {
                log_debug_warn(
                    &log,
                    as_dyn(&done.error),
                    "stream initialized",
                    vec![latency(start), Field::string("session_id", done.session_id)],
                )
            })
        },
    ));
    let l = log.clone();
    t.on_writer_close = Some(Box::new(move |info: WriterCloseStartInfo| -> OnDone<WriterCloseDoneInfo> {
        let log = l.with(vec![
            Field::string("writer_instance_id", info.writer_instance_id),
            Field::named_error_opt("reason", as_dyn(&info.reason)),
        ]);
        log.debug("closing", vec![]);
        let start = Instant::now();
        Box::new(move |done: WriterCloseDoneInfo| {
            log_info_warn(&log, as_dyn(&done.error), "closed", vec![latency(start)])
        })
    }));
}

fn writer_stream(log: &Logger, t: &mut Topic) {
    let l = log.clone();
    t.on_writer_send_messages = Some(Box::new(
        move |info: WriterSendMessagesStartInfo| -> OnDone<WriterSendMessagesDoneInfo> {
            let log = l.with(vec![
                Field::string("writer_instance_id", info.writer_instance_id),
                Field::string("session_id", info.session_id),
                Field::string("codec", info.codec),
                Field::int("first_seqno", info.first_seq_no),
                Field::int("messages_count", info.messages_count),
            ]);
            log.debug("sending messages...", vec![]);
            let start = Instant::now();
            Box::new(move |done: WriterSendMessagesDoneInfo| {
                log_debug_warn(&log, as_dyn(&done.error), "messages sent", vec![latency(start)])
            })
        },
    ));
    let l = log.clone();
    t.on_writer_receive_acks = Some(Box::new(move |info: WriterReceiveAcksInfo| {
        l.debug(
            "received acks",
            vec![
                Field::string("writer_instance_id", info.writer_instance_id),
                Field::string("session_id", info.session_id),
                Field::int("acks_count", info.acks_count),
            ],
        )
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::Value;
    use crate::level::Level;
    use crate::trace::{self, DriverError, RetryMode};
    use std::sync::Arc;

    fn capture(d: Details) -> (Arc<MemoryBackend>, Topic) {
        let backend = Arc::new(MemoryBackend::new());
        let t = topic(&Logger::new(backend.clone()), d);
        (backend, t)
    }

    #[test]
    fn writer_bits_leave_reader_unset() {
        let (_, t) = capture(Details::TOPIC_WRITER);
        assert!(t.on_writer_send_messages.is_some());
        assert!(t.on_writer_reconnect.is_some());
        assert!(t.on_reader_reconnect.is_none());
        assert!(t.on_reader_stream_read_messages.is_none());
    }

    #[test]
    fn start_context_repeats_on_completion() {
        let (backend, t) = capture(Details::TOPIC_READER_PARTITION);
        let done = trace::start(
            &t.on_reader_partition_read_start_response,
            PartitionReadStartResponseStartInfo {
                reader_connection_id: "conn-1".into(),
                topic: "events".into(),
                partition_id: 2,
                partition_session_id: 9,
            },
        );
        done(PartitionReadStartResponseDoneInfo { read_offset: Some(10), commit_offset: None, error: None });

        let records = backend.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].level, Level::Info);
        assert_eq!(records[1].logger, "topic.reader.partition");
        assert_eq!(records[1].field("topic"), Some(&Value::Str("events".into())));
        assert_eq!(records[1].field("partition_session_id"), Some(&Value::Int(9)));
        assert_eq!(records[1].field("read_offset"), Some(&Value::Int(10)));
        assert_eq!(records[1].field("commit_offset"), Some(&Value::Null));
    }

    #[test]
    fn read_messages_failure_is_info() {
        let (backend, t) = capture(Details::TOPIC_READER_MESSAGE);
        let done = trace::start(
            &t.on_reader_stream_read_messages,
            ReadMessagesStartInfo { min_count: 1, max_count: 100, free_buffer_capacity: 1024 },
        );
        done(ReadMessagesDoneInfo {
            error: Some(DriverError::Transport {
                code: 2,
                message: "stream closed".into(),
                retry: RetryMode::IdempotentOnly,
                delete_session: false,
            }),
            ..Default::default()
        });

        let last = backend.records().pop().unwrap();
        assert_eq!(last.level, Level::Info);
        assert_eq!(last.field("max_count"), Some(&Value::Int(100)));
        assert!(last.field("error").is_some());
    }

    #[test]
    fn send_messages_logs_under_writer_stream() {
        let (backend, t) = capture(Details::TOPIC);
        trace::start(
            &t.on_writer_send_messages,
            WriterSendMessagesStartInfo {
                writer_instance_id: "w-1".into(),
                session_id: "s-1".into(),
                codec: "raw".into(),
                first_seq_no: 5,
                messages_count: 3,
            },
        )(WriterSendMessagesDoneInfo { error: None });
        trace::event(
            &t.on_writer_receive_acks,
            WriterReceiveAcksInfo { writer_instance_id: "w-1".into(), session_id: "s-1".into(), acks_count: 3 },
        );

        let records = backend.records();
        let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["sending messages...", "messages sent", "received acks"]);
        assert!(records.iter().all(|r| r.logger == "topic.writer.stream" && r.level == Level::Debug));
    }
}
