use super::{DriverError, OnStart, OnStartStream};

#[derive(Debug, Clone, Default)]
pub struct ExecuteStartInfo {
    pub query: String,
    pub parameters: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteDoneInfo {
    pub result_set_count: usize,
    pub result_error: Option<DriverError>,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ExplainStartInfo {
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExplainDoneInfo {
    pub plan: String,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamExecuteStartInfo {
    pub query: String,
    pub parameters: String,
}

#[derive(Debug, Clone, Default)]
pub struct StreamExecuteIntermediateInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct StreamExecuteDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct CloseStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct CloseDoneInfo {
    pub error: Option<DriverError>,
}

/// Hook set of the scripting client.
#[derive(Default)]
pub struct Scripting {
    pub on_execute: Option<OnStart<ExecuteStartInfo, ExecuteDoneInfo>>,
    pub on_explain: Option<OnStart<ExplainStartInfo, ExplainDoneInfo>>,
    pub on_stream_execute:
        Option<OnStartStream<StreamExecuteStartInfo, StreamExecuteIntermediateInfo, StreamExecuteDoneInfo>>,
    pub on_close: Option<OnStart<CloseStartInfo, CloseDoneInfo>>,
}
