//! Structured logging setup.
//!
//! JSON output for production environments, pretty output for development,
//! optional daily-rotated file output. The filter comes from `RUST_LOG`
//! with an `info` default.

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Configuration for logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub output: LogOutput,
    /// Directory for log files (when output is "file")
    pub log_dir: PathBuf,
    /// Log file name prefix
    pub log_file_prefix: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logging (production)
    Json,
    /// Human-readable output (development)
    Pretty,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Daily-rotated file under `log_dir`
    File,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let is_production = environment == "production" || environment == "prod";

        Self {
            format: if is_production {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            output: LogOutput::Stderr,
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "search-form-sync".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Build from environment: `LOG_FORMAT` (json|pretty), `LOG_OUTPUT`
    /// (stdout|stderr|file), `LOG_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(format) = env::var("LOG_FORMAT") {
            match format.to_ascii_lowercase().as_str() {
                "json" => config.format = LogFormat::Json,
                "pretty" => config.format = LogFormat::Pretty,
                _ => {}
            }
        }
        if let Ok(output) = env::var("LOG_OUTPUT") {
            match output.to_ascii_lowercase().as_str() {
                "stdout" => config.output = LogOutput::Stdout,
                "stderr" => config.output = LogOutput::Stderr,
                "file" => config.output = LogOutput::File,
                _ => {}
            }
        }
        if let Ok(dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }
}

/// Initialize the global subscriber. Returns the appender guard when file
/// output is active; hold it for the life of the process or buffered lines
/// are lost on exit.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard) = match config.output {
        LogOutput::Stdout => (BoxMakeWriter::new(io::stdout), None),
        LogOutput::Stderr => (BoxMakeWriter::new(io::stderr), None),
        LogOutput::File => {
            let appender =
                tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer).with_target(true))
            .try_init()
            .context("failed to initialize logging")?,
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(writer).with_target(false))
            .try_init()
            .context("failed to initialize logging")?,
    }

    Ok(guard)
}
