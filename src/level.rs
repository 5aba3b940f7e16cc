use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use crate::field::Field;
use crate::logger::Logger;

/// Severity of a single log entry.
///
/// Ordered from least to most severe, so `level >= Level::Warn` reads the
/// way one expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" | "critical" => Ok(Level::Fatal),
            _ => Err(crate::error::Error::InvalidLevel(s.to_string())),
        }
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => tracing::Level::TRACE,
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error | Level::Fatal => tracing::Level::ERROR,
        }
    }
}

/// Emit `msg` at `err_level` with an `error` field appended when `err` is
/// present, otherwise at `ok_level`.
pub fn log_level(
    log: &Logger,
    err: Option<&(dyn StdError + 'static)>,
    ok_level: Level,
    err_level: Level,
    msg: &str,
    mut fields: Vec<Field>,
) {
    let level = match err {
        Some(err) => {
            fields.push(Field::error(err));
            err_level
        }
        None => ok_level,
    };
    log.log(level, msg, fields);
}

pub fn log_debug_warn(log: &Logger, err: Option<&(dyn StdError + 'static)>, msg: &str, fields: Vec<Field>) {
    log_level(log, err, Level::Debug, Level::Warn, msg, fields);
}

pub fn log_debug_info(log: &Logger, err: Option<&(dyn StdError + 'static)>, msg: &str, fields: Vec<Field>) {
    log_level(log, err, Level::Debug, Level::Info, msg, fields);
}

pub fn log_info_warn(log: &Logger, err: Option<&(dyn StdError + 'static)>, msg: &str, fields: Vec<Field>) {
    log_level(log, err, Level::Info, Level::Warn, msg, fields);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::Value;
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn picks_ok_level_without_error() {
        let backend = Arc::new(MemoryBackend::new());
        let log = Logger::new(backend.clone());

        log_debug_warn(&log, None, "done", vec![Field::int("n", 1)]);

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Debug);
        assert_eq!(records[0].fields.len(), 1);
        assert!(records[0].field("error").is_none());
    }

    #[test]
    fn picks_error_level_and_appends_error_field() {
        let backend = Arc::new(MemoryBackend::new());
        let log = Logger::new(backend.clone());

        log_info_warn(&log, Some(&Boom), "done", vec![Field::int("n", 1)]);
        log_info_warn(&log, Some(&Boom), "done", vec![Field::int("n", 1)]);

        let records = backend.records();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.level, Level::Warn);
            assert_eq!(record.fields.len(), 2);
            assert_eq!(record.field("error"), Some(&Value::Error("boom".into())));
        }
    }

    #[test]
    fn parses_level_names() {
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" debug ".parse::<Level>().unwrap(), Level::Debug);
        assert!("loud".parse::<Level>().is_err());
        assert_eq!(tracing::Level::from(Level::Fatal), tracing::Level::ERROR);
    }
}
