//! Environment-driven configuration.
//!
//! These are helpers only; every constructor also takes its configuration
//! as plain values.

use std::time::Duration;

use crate::error::Error;
use crate::init::PipelineConfig;
use crate::options::Options;
use crate::trace::Details;

/// Enabled event categories, e.g. `driver,table.pool` or `all`.
pub const TRACE_LOG_DETAILS_ENV: &str = "TRACE_LOG_DETAILS";

/// `1` or `true` attaches query text to entries.
pub const TRACE_LOG_QUERY_ENV: &str = "TRACE_LOG_QUERY";

/// Minimum level kept by the sink pipeline.
pub const TRACE_LOG_LEVEL_ENV: &str = "TRACE_LOG_LEVEL";

/// Optional logical service name stamped on records in shared stores.
pub const TRACE_LOG_SERVICE_NAME_ENV: &str = "TRACE_LOG_SERVICE_NAME";

/// Pipeline flush interval in milliseconds.
pub const TRACE_LOG_FLUSH_MS_ENV: &str = "TRACE_LOG_FLUSH_MS";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Categories from [`TRACE_LOG_DETAILS_ENV`]; everything when unset.
pub fn details_from_env() -> Result<Details, Error> {
    match std::env::var(TRACE_LOG_DETAILS_ENV) {
        Ok(value) => value.parse(),
        Err(_) => Ok(Details::all()),
    }
}

pub fn options_from_env() -> Options {
    let value = env_or(TRACE_LOG_QUERY_ENV, "");
    Options { log_query: matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") }
}

/// [`PipelineConfig`] defaults overridden by the environment.
pub fn pipeline_config_from_env() -> Result<PipelineConfig, Error> {
    let mut config = PipelineConfig::default();
    if let Ok(level) = std::env::var(TRACE_LOG_LEVEL_ENV) {
        config.min_level = level.parse()?;
    }
    if let Ok(name) = std::env::var(TRACE_LOG_SERVICE_NAME_ENV) {
        if !name.is_empty() {
            config.service_name = Some(name);
        }
    }
    if let Ok(ms) = env_or(TRACE_LOG_FLUSH_MS_ENV, "").parse::<u64>() {
        config.flush_interval = Duration::from_millis(ms);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    // All environment access lives in this one test.
    #[test]
    fn reads_configuration_from_env() {
        std::env::set_var(TRACE_LOG_DETAILS_ENV, "discovery, table_pool_api");
        std::env::set_var(TRACE_LOG_QUERY_ENV, "TRUE");
        std::env::set_var(TRACE_LOG_LEVEL_ENV, "warn");
        std::env::set_var(TRACE_LOG_SERVICE_NAME_ENV, "orders");

        let details = details_from_env().unwrap();
        assert_eq!(details, Details::DISCOVERY | Details::TABLE_POOL_API);
        assert!(options_from_env().log_query);
        let config = pipeline_config_from_env().unwrap();
        assert_eq!(config.min_level, Level::Warn);
        assert_eq!(config.service_name.as_deref(), Some("orders"));

        std::env::set_var(TRACE_LOG_LEVEL_ENV, "chatty");
        assert!(pipeline_config_from_env().is_err());

        for key in [TRACE_LOG_DETAILS_ENV, TRACE_LOG_QUERY_ENV, TRACE_LOG_LEVEL_ENV, TRACE_LOG_SERVICE_NAME_ENV] {
            std::env::remove_var(key);
        }
        assert_eq!(details_from_env().unwrap(), Details::all());
        assert!(!options_from_env().log_query);
    }
}
