use super::{DriverError, OnStartStream};

#[derive(Debug, Clone, Default)]
pub struct RetryLoopStartInfo {
    pub idempotent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RetryLoopIntermediateInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct RetryLoopDoneInfo {
    pub attempts: usize,
    pub error: Option<DriverError>,
}

/// Hook set of the generic retry loop.
#[derive(Default)]
pub struct Retry {
    pub on_retry: Option<OnStartStream<RetryLoopStartInfo, RetryLoopIntermediateInfo, RetryLoopDoneInfo>>,
}
