use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;

/// Severity and scope path the driver attaches to a facade call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub level: Level,
    pub names: Vec<String>,
}

impl LogContext {
    pub fn new(level: Level) -> Self {
        LogContext { level, names: Vec::new() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }
}

/// The driver's generic logger facade.
pub trait ContextLogger: Send + Sync {
    fn log(&self, ctx: &LogContext, msg: &str, fields: Vec<Field>);
}

/// [`ContextLogger`] on top of a [`Logger`]: each call is re-scoped by the
/// context names and emitted at the context level.
#[derive(Clone, Debug)]
pub struct Adapter {
    log: Logger,
}

impl Adapter {
    pub fn new(log: Logger) -> Self {
        Adapter { log }
    }
}

impl ContextLogger for Adapter {
    fn log(&self, ctx: &LogContext, msg: &str, fields: Vec<Field>) {
        if !self.log.enabled(ctx.level) {
            return;
        }
        let log = ctx.names.iter().fold(self.log.clone(), |log, name| log.named(name));
        log.log(ctx.level, msg, fields);
    }
}
