/// Errors of the crate's own setup paths.
///
/// The hook adapters never fail; driver errors are relayed as log fields.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("a global tracing subscriber is already installed")]
    SubscriberInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("unknown event category: {0:?}")]
    UnknownCategory(String),

    #[error("unknown log level: {0:?}")]
    InvalidLevel(String),
}
