//! Logging system configuration and initialization
//!
//! This module provides the logging setup with:
//! - Configuration file based log level and per-module filters
//! - `RUST_LOG` override
//! - Console output on stderr (stdout carries the scan result)
//! - Optional non-blocking file output, plain or JSON
//! - UTC timestamps

use anyhow::{Context, Result};
use chrono::Utc;
use lazy_static::lazy_static;
use std::sync::Mutex;
use tracing::{Subscriber, debug, info, warn};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());
}

/// Millisecond UTC timestamps
struct UtcTimeFormatter;

impl FormatTime for UtcTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"))
    }
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Stderr layer, built per subscriber stack so each gets its own layer type
fn console_layer<S>(enabled: bool) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    enabled.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(UtcTimeFormatter)
            .with_target(false)
    })
}

/// Build the filter from `level` plus module directives.
/// Returns the directives that failed to parse.
fn build_filter(config: &LoggingConfig) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::new(&config.level);
    let mut rejected = Vec::new();

    let mut modules: Vec<_> = config.module_filters.iter().collect();
    modules.sort();
    for (module, level) in modules {
        let directive = format!("{module}={level}");
        match directive.parse() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(_) => rejected.push(directive),
        }
    }

    (filter, rejected)
}

/// Initialize logging with custom configuration
///
/// `RUST_LOG` takes precedence over the configured level and module filters:
/// ```bash
/// RUST_LOG="debug,html5ever=warn" profile-scan ./snapshots
/// ```
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let (configured_filter, rejected) = build_filter(config);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(configured_filter);
    let registry = Registry::default().with(env_filter);

    let (init_result, file_guard) = match (config.file_output, config.console_output) {
        (true, console) => {
            std::fs::create_dir_all(&config.log_dir).with_context(|| {
                format!("Failed to create log directory {:?}", config.log_dir)
            })?;
            let file_appender = rolling::never(&config.log_dir, &config.file_name);
            let (file_writer, file_guard) = non_blocking(file_appender);

            let result = if config.json_format {
                let file_layer = fmt::Layer::new()
                    .json()
                    .with_writer(file_writer)
                    .with_timer(UtcTimeFormatter)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false);
                registry.with(file_layer).with(console_layer(console)).try_init()
            } else {
                let file_layer = fmt::Layer::new()
                    .with_writer(file_writer)
                    .with_timer(UtcTimeFormatter)
                    .with_target(false)
                    .with_ansi(false);
                registry.with(file_layer).with(console_layer(console)).try_init()
            };
            (result, Some(file_guard))
        }
        (false, true) => (registry.with(console_layer(true)).try_init(), None),
        (false, false) => {
            anyhow::bail!("No logging output configured");
        }
    };

    // A rejected subscriber drops its file guard here, stopping its worker
    if let Err(e) = init_result {
        debug!("Logging already initialized: {}", e);
        return Ok(());
    }

    if let Some(guard) = file_guard {
        if let Ok(mut guards) = LOG_GUARDS.lock() {
            guards.push(guard);
        }
    }

    for directive in rejected {
        warn!("Ignoring invalid log filter directive '{}'", directive);
    }

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!(
            "Log file: {:?} (JSON format: {})",
            config.log_dir.join(&config.file_name),
            config.json_format
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn retained_guards() -> usize {
        LOG_GUARDS.lock().map(|guards| guards.len()).unwrap_or(0)
    }

    fn file_config(dir: &TempDir, console_output: bool, json_format: bool) -> LoggingConfig {
        LoggingConfig {
            file_output: true,
            console_output,
            json_format,
            log_dir: dir.path().join("logs"),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.console_output);
        assert!(!config.file_output);
        assert_eq!(config.module_filters.get("html5ever").map(String::as_str), Some("warn"));
    }

    #[test]
    fn test_invalid_module_directives_are_reported() {
        let config = LoggingConfig {
            module_filters: HashMap::from([
                ("scraper".to_string(), "debug".to_string()),
                ("selectors".to_string(), "loud".to_string()),
            ]),
            ..LoggingConfig::default()
        };

        let (_, rejected) = build_filter(&config);

        assert_eq!(rejected, ["selectors=loud"]);
    }

    #[test]
    fn test_no_output_is_an_error() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, false, false);

        assert!(init_logging_with_config(&config).is_ok());
        assert!(init_logging_with_config(&config).is_ok());
        assert!(dir.path().join("logs").exists());
    }

    #[rstest]
    #[case::plain(false)]
    #[case::json(true)]
    fn test_file_and_console_init(#[case] json_format: bool) {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true, json_format);

        assert!(init_logging_with_config(&config).is_ok());
        assert!(dir.path().join("logs").exists());
    }

    #[test]
    fn test_rejected_init_does_not_retain_file_guard() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true, false);

        for _ in 0..3 {
            assert!(init_logging_with_config(&config).is_ok());
        }

        // Only the one subscriber that was installed keeps its writer alive
        assert!(retained_guards() <= 1);
    }
}
