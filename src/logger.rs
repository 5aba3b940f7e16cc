use chrono::Utc;
use std::fmt;
use std::sync::Arc;

use crate::backend::LogBackend;
use crate::field::Field;
use crate::level::Level;
use crate::record::LogRecord;

/// Named scope over a shared [`LogBackend`].
///
/// Cloning is cheap; `named` and `with` derive child scopes that share the
/// backend. A scope carries no state besides its name and context fields.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    context: Arc<[Field]>,
    backend: Arc<dyn LogBackend>,
}

impl Logger {
    pub fn new(backend: Arc<dyn LogBackend>) -> Self {
        Logger { name: Arc::from(""), context: Arc::from(Vec::new()), backend }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &Arc<dyn LogBackend> {
        &self.backend
    }

    /// Child scope `<self>.<name>`.
    pub fn named(&self, name: &str) -> Logger {
        let name: Arc<str> = if self.name.is_empty() {
            Arc::from(name)
        } else if name.is_empty() {
            self.name.clone()
        } else {
            Arc::from(format!("{}.{}", self.name, name))
        };
        Logger { name, context: self.context.clone(), backend: self.backend.clone() }
    }

    /// Child scope that prepends `fields` to every entry it emits.
    pub fn with(&self, fields: Vec<Field>) -> Logger {
        let context: Vec<Field> = self.context.iter().cloned().chain(fields).collect();
        Logger { name: self.name.clone(), context: Arc::from(context), backend: self.backend.clone() }
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.backend.enabled(level)
    }

    pub fn log(&self, level: Level, msg: &str, fields: Vec<Field>) {
        self.emit(level, msg, fields);
    }

    /// Build and hand one record to the backend, unless the backend has
    /// the level disabled.
    pub fn emit<I>(&self, level: Level, msg: &str, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        if !self.backend.enabled(level) {
            return;
        }
        let fields = self.context.iter().cloned().chain(fields).collect();
        self.backend.emit(LogRecord {
            timestamp: Utc::now(),
            level,
            logger: self.name.to_string(),
            message: msg.to_string(),
            fields,
            service_name: None,
        });
    }

    pub fn trace(&self, msg: &str, fields: Vec<Field>) {
        self.log(Level::Trace, msg, fields);
    }

    pub fn debug(&self, msg: &str, fields: Vec<Field>) {
        self.log(Level::Debug, msg, fields);
    }

    pub fn info(&self, msg: &str, fields: Vec<Field>) {
        self.log(Level::Info, msg, fields);
    }

    pub fn warn(&self, msg: &str, fields: Vec<Field>) {
        self.log(Level::Warn, msg, fields);
    }

    pub fn error(&self, msg: &str, fields: Vec<Field>) {
        self.log(Level::Error, msg, fields);
    }

    /// Emits at fatal severity. The process is not terminated.
    pub fn fatal(&self, msg: &str, fields: Vec<Field>) {
        self.log(Level::Fatal, msg, fields);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("context", &self.context.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn named_builds_dotted_path() {
        let log = Logger::new(Arc::new(MemoryBackend::new()));
        assert_eq!(log.named("table").named("pool").named("session").name(), "table.pool.session");
        assert_eq!(log.named("driver").named("").name(), "driver");
    }

    #[test]
    fn with_prepends_context_fields() {
        let backend = Arc::new(MemoryBackend::new());
        let log = Logger::new(backend.clone())
            .named("topic")
            .with(vec![Field::string("topic", "events")]);

        log.info("committed", vec![Field::int("partition_id", 2)]);

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].logger, "topic");
        let keys: Vec<_> = records[0].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["topic", "partition_id"]);
    }

    #[test]
    fn disabled_level_is_not_emitted() {
        let backend = Arc::new(MemoryBackend::with_min_level(Level::Info));
        let log = Logger::new(backend.clone());

        log.debug("hidden", vec![]);
        log.warn("shown", vec![]);

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "shown");
    }
}
