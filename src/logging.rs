//! Structured logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is left to the run summary
//! and to `crudgen inspect` JSON so both stay pipeable.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `CRUDGEN_LOG_LEVEL` | trace, debug, info, warn, error | info |
//! | `CRUDGEN_LOG_FORMAT` | pretty, json, compact | pretty |
//! | `CRUDGEN_LOG_FILTER` | comma-separated `EnvFilter` directives | none |

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra directives, comma-separated
    pub target_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
        }
    }
}

impl LogConfig {
    /// Parse configuration from `CRUDGEN_LOG_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        LogConfig {
            log_level: lookup("CRUDGEN_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: LogFormat::parse(&lookup("CRUDGEN_LOG_FORMAT").unwrap_or_default()),
            target_filter: lookup("CRUDGEN_LOG_FILTER").filter(|f| !f.trim().is_empty()),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Build the filter; invalid directives are returned instead of applied
fn build_filter(config: &LogConfig) -> (EnvFilter, Vec<String>) {
    let mut env_filter = EnvFilter::new(config.level().as_str());
    let mut invalid = Vec::new();
    if let Some(target_filter) = &config.target_filter {
        for filter in target_filter.split(',') {
            let filter = filter.trim();
            if filter.is_empty() {
                continue;
            }
            match filter.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(_) => invalid.push(filter.to_string()),
            }
        }
    }
    (env_filter, invalid)
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let (env_filter, invalid) = build_filter(config);
    for filter in invalid {
        eprintln!("Warning: Invalid log filter directive: {}", filter);
    }

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

/// [`init_logging_with_config`] with [`LogConfig::from_env`]
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("COMPACT"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
    }

    #[test]
    fn test_defaults_without_variables() {
        assert_eq!(LogConfig::from_lookup(lookup(&[])), LogConfig::default());
    }

    #[test]
    fn test_variables_are_read() {
        let config = LogConfig::from_lookup(lookup(&[
            ("CRUDGEN_LOG_LEVEL", "debug"),
            ("CRUDGEN_LOG_FORMAT", "json"),
            ("CRUDGEN_LOG_FILTER", "crudgen::patch=trace"),
        ]));
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target_filter.as_deref(), Some("crudgen::patch=trace"));
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = LogConfig {
            log_level: "loud".into(),
            ..LogConfig::default()
        };
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_invalid_directives_are_collected() {
        let config = LogConfig {
            target_filter: Some("crudgen=debug, ,crudgen=loudest".into()),
            ..LogConfig::default()
        };
        let (filter, invalid) = build_filter(&config);
        assert_eq!(invalid, ["crudgen=loudest"]);
        assert!(filter.to_string().contains("crudgen=debug"));
    }
}
