use std::error::Error as StdError;
use std::sync::Arc;

/// Which operations the driver considers safe to retry after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryMode {
    #[default]
    Never,
    IdempotentOnly,
    Always,
}

/// Error value carried by hook payloads.
///
/// The driver classifies its errors; adapters only read the
/// classification to pick a severity and to fill `retryable`,
/// `deleteSession` and `code` fields.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DriverError {
    /// Server answered with a non-success status.
    #[error("operation failed (code = {code}): {message}")]
    Operation { code: i64, message: String, retry: RetryMode, delete_session: bool },

    /// Transport-level failure talking to a node.
    #[error("transport failed (code = {code}): {message}")]
    Transport { code: i64, message: String, retry: RetryMode, delete_session: bool },

    /// Error that did not originate in the driver (cancellation, a user
    /// callback, I/O from another library).
    #[error(transparent)]
    External(Arc<dyn StdError + Send + Sync>),
}

impl DriverError {
    pub fn external<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        DriverError::External(Arc::new(err))
    }

    /// Whether the error was produced and classified by the driver.
    pub fn is_driver_error(&self) -> bool {
        !matches!(self, DriverError::External(_))
    }

    /// Status code, or `-1` for foreign errors.
    pub fn code(&self) -> i64 {
        match self {
            DriverError::Operation { code, .. } | DriverError::Transport { code, .. } => *code,
            DriverError::External(_) => -1,
        }
    }

    pub fn must_retry(&self, idempotent: bool) -> bool {
        let retry = match self {
            DriverError::Operation { retry, .. } | DriverError::Transport { retry, .. } => *retry,
            DriverError::External(_) => RetryMode::Never,
        };
        match retry {
            RetryMode::Never => false,
            RetryMode::IdempotentOnly => idempotent,
            RetryMode::Always => true,
        }
    }

    pub fn must_delete_session(&self) -> bool {
        match self {
            DriverError::Operation { delete_session, .. } | DriverError::Transport { delete_session, .. } => {
                *delete_session
            }
            DriverError::External(_) => false,
        }
    }
}

/// Borrow an optional driver error as a plain error object.
pub(crate) fn as_dyn(err: &Option<DriverError>) -> Option<&(dyn StdError + 'static)> {
    err.as_ref().map(|e| e as &(dyn StdError + 'static))
}
