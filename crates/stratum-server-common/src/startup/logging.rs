//! Logging initialization
//!
//! Sets up the tracing subscriber with console output and an optional
//! rolling log file. The `RUST_LOG` env var overrides the configured
//! level for both layers.
//!
//! Configuration comes from the environment:
//!
//! | Variable                 | Meaning                          | Default |
//! |--------------------------|----------------------------------|---------|
//! | `STRATUM_LOG_LEVEL`      | Console log level                | `info`  |
//! | `STRATUM_LOG_FILE`       | Enable file logging              | off     |
//! | `STRATUM_LOG_DIR`        | Log file directory               | `logs`  |
//! | `STRATUM_LOG_FILE_LEVEL` | File log level                   | console |

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Log file name within the log directory.
const LOG_FILE_NAME: &str = "stratum.log";

/// Logging configuration for the entire application.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Enable console output
    pub console_output: bool,
    /// Console log level
    pub console_level: Level,
    /// Enable file logging
    pub file_logging: bool,
    /// Log directory (default: `logs`)
    pub log_dir: PathBuf,
    /// File log level
    pub file_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_output: true,
            console_level: Level::INFO,
            file_logging: false,
            log_dir: PathBuf::from("logs"),
            file_level: Level::INFO,
        }
    }
}

impl LoggingConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let console_level = std::env::var("STRATUM_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::INFO);

        let file_logging = std::env::var("STRATUM_LOG_FILE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        let log_dir = std::env::var("STRATUM_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let file_level = std::env::var("STRATUM_LOG_FILE_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(console_level);

        Self {
            console_output: true,
            console_level,
            file_logging,
            log_dir,
            file_level,
        }
    }
}

/// Guard that keeps the logging system alive.
///
/// Holds the file appender worker guard. Must be kept alive for the
/// duration of the application; dropping it flushes buffered log output.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Initialize the logging system.
///
/// Sets up console output (human-readable, ANSI colors) and, when enabled,
/// a daily-rolling log file with non-blocking writes. Returns a
/// [`LoggingGuard`] that must be kept alive for the duration of the
/// application.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));
        let console_layer = fmt::layer()
            .with_target(true)
            .with_filter(filter);
        layers.push(Box::new(console_layer));
    }

    if config.file_logging {
        let appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.file_level.to_string()));
        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .with_filter(filter);
        layers.push(Box::new(file_layer));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))?;

    if config.file_logging {
        tracing::info!(
            log_dir = %config.log_dir.display(),
            "file logging initialized"
        );
    }

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.console_output);
        assert!(!config.file_logging);
        assert_eq!(config.console_level, Level::INFO);
        assert_eq!(config.file_level, Level::INFO);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }
}
