//! Topic reader and writer hooks.

use super::{DriverError, OnEvent, OnStart, OnStartStream};

#[derive(Debug, Clone, Default)]
pub struct ReaderReconnectStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct ReaderReconnectDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ReaderReconnectRequestInfo {
    pub reason: Option<DriverError>,
    pub was_sent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PartitionReadStartResponseStartInfo {
    pub reader_connection_id: String,
    pub topic: String,
    pub partition_id: i64,
    pub partition_session_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PartitionReadStartResponseDoneInfo {
    pub read_offset: Option<i64>,
    pub commit_offset: Option<i64>,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PartitionReadStopResponseStartInfo {
    pub reader_connection_id: String,
    pub topic: String,
    pub partition_id: i64,
    pub partition_session_id: i64,
    pub committed_offset: i64,
    pub graceful: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PartitionReadStopResponseDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamCommitStartInfo {
    pub topic: String,
    pub partition_id: i64,
    pub partition_session_id: i64,
    pub start_offset: i64,
    pub end_offset: i64,
}

#[derive(Debug, Clone, Default)]
pub struct StreamCommitDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamSendCommitMessageStartInfo {
    pub partition_ids: Vec<i64>,
    pub partition_session_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamSendCommitMessageDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamCommittedNotifyInfo {
    pub reader_connection_id: String,
    pub topic: String,
    pub partition_id: i64,
    pub partition_session_id: i64,
    pub committed_offset: i64,
}

#[derive(Debug, Clone, Default)]
pub struct StreamCloseStartInfo {
    pub reader_connection_id: String,
    pub close_reason: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamCloseDoneInfo {
    pub close_error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamInitStartInfo {
    pub pre_init_reader_connection_id: String,
    pub consumer: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamInitDoneInfo {
    pub reader_connection_id: String,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone)]
pub struct StreamErrorInfo {
    pub reader_connection_id: String,
    pub error: DriverError,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTokenStartInfo {
    pub reader_connection_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTokenReceivedInfo {
    pub token_len: usize,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTokenDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct SentDataRequestInfo {
    pub reader_connection_id: String,
    pub request_bytes: i64,
    pub local_buffer_size_after_sent: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReceiveDataResponseStartInfo {
    pub reader_connection_id: String,
    pub bytes_size: i64,
    pub local_buffer_size_after_receive: i64,
    pub partitions_count: i64,
    pub batches_count: i64,
    pub messages_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReceiveDataResponseDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ReadMessagesStartInfo {
    pub min_count: i64,
    pub max_count: i64,
    pub free_buffer_capacity: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReadMessagesDoneInfo {
    pub topic: String,
    pub partition_id: i64,
    pub messages_count: i64,
    pub free_buffer_capacity: i64,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone)]
pub struct UnknownGrpcMessageInfo {
    pub reader_connection_id: String,
    pub error: DriverError,
}

#[derive(Debug, Clone, Default)]
pub struct WriterReconnectStartInfo {
    pub writer_instance_id: String,
    pub topic: String,
    pub producer_id: String,
    pub attempt: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WriterReconnectDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct WriterInitStreamStartInfo {
    pub writer_instance_id: String,
    pub topic: String,
    pub producer_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct WriterInitStreamDoneInfo {
    pub session_id: String,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct WriterCloseStartInfo {
    pub writer_instance_id: String,
    pub reason: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct WriterCloseDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct WriterSendMessagesStartInfo {
    pub writer_instance_id: String,
    pub session_id: String,
    pub codec: String,
    pub first_seq_no: i64,
    pub messages_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct WriterSendMessagesDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct WriterReceiveAcksInfo {
    pub writer_instance_id: String,
    pub session_id: String,
    pub acks_count: i64,
}

/// Hook set of the topic reader and writer.
#[derive(Default)]
pub struct Topic {
    pub on_reader_reconnect: Option<OnStart<ReaderReconnectStartInfo, ReaderReconnectDoneInfo>>,
    pub on_reader_reconnect_request: Option<OnEvent<ReaderReconnectRequestInfo>>,

    pub on_reader_partition_read_start_response:
        Option<OnStart<PartitionReadStartResponseStartInfo, PartitionReadStartResponseDoneInfo>>,
    pub on_reader_partition_read_stop_response:
        Option<OnStart<PartitionReadStopResponseStartInfo, PartitionReadStopResponseDoneInfo>>,

    pub on_reader_stream_commit: Option<OnStart<StreamCommitStartInfo, StreamCommitDoneInfo>>,
    pub on_reader_stream_send_commit_message:
        Option<OnStart<StreamSendCommitMessageStartInfo, StreamSendCommitMessageDoneInfo>>,
    pub on_reader_stream_committed_notify: Option<OnEvent<StreamCommittedNotifyInfo>>,
    pub on_reader_stream_close: Option<OnStart<StreamCloseStartInfo, StreamCloseDoneInfo>>,
    pub on_reader_stream_init: Option<OnStart<StreamInitStartInfo, StreamInitDoneInfo>>,
    pub on_reader_stream_error: Option<OnEvent<StreamErrorInfo>>,
    pub on_reader_stream_update_token:
        Option<OnStartStream<UpdateTokenStartInfo, UpdateTokenReceivedInfo, UpdateTokenDoneInfo>>,

    pub on_reader_stream_sent_data_request: Option<OnEvent<SentDataRequestInfo>>,
    pub on_reader_stream_receive_data_response:
        Option<OnStart<ReceiveDataResponseStartInfo, ReceiveDataResponseDoneInfo>>,
    pub on_reader_stream_read_messages: Option<OnStart<ReadMessagesStartInfo, ReadMessagesDoneInfo>>,
    pub on_reader_stream_unknown_grpc_message: Option<OnEvent<UnknownGrpcMessageInfo>>,

    pub on_writer_reconnect: Option<OnStart<WriterReconnectStartInfo, WriterReconnectDoneInfo>>,
    pub on_writer_init_stream: Option<OnStart<WriterInitStreamStartInfo, WriterInitStreamDoneInfo>>,
    pub on_writer_close: Option<OnStart<WriterCloseStartInfo, WriterCloseDoneInfo>>,
    pub on_writer_send_messages: Option<OnStart<WriterSendMessagesStartInfo, WriterSendMessagesDoneInfo>>,
    pub on_writer_receive_acks: Option<OnEvent<WriterReceiveAcksInfo>>,
}
