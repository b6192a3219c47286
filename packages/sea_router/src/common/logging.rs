//! Structured logging setup for the service binary.
//!
//! - `LOG_FORMAT`: output format, `json` (default) or `text`
//! - `RUST_LOG`: log level filter (default: `info`)

use std::env;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON structured logging
    #[default]
    Json,
    /// Human-readable text logging
    Text,
}

impl LogFormat {
    /// Accepts "json", "text", or "pretty" (alias for text). Anything else
    /// falls back to JSON
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directives, taken from RUST_LOG when it is set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            format: LogFormat::Json,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        LoggingConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration using the provided function to look up each
    /// setting
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = lookup("LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();

        let level = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        LoggingConfig { format, level }
    }
}

/// Build the filter for the configured level. Directives which can't be
/// parsed fall back to `info`
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber. Should be called once, before
/// anything else is logged
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_filter(config);

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("TEXT"), LogFormat::Text);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Json);
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
    }

    /// RUST_LOG is only read while building the config, and the filter is
    /// built from whatever ended up in it
    #[test]
    fn test_logging_config_from_lookup() {
        let config = LoggingConfig::from_lookup(|key| match key {
            "LOG_FORMAT" => Some("text".to_string()),
            "RUST_LOG" => Some("sea_router=debug".to_string()),
            _ => None,
        });

        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "sea_router=debug");
        assert_eq!(
            build_filter(&config).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_logging_config_blank_level() {
        let config = LoggingConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(config, LoggingConfig::default());
    }
}
