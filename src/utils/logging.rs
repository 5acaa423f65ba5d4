//! # Logging
//!
//! Installs a global `tracing` subscriber from [`LoggingConfig`].
//!
//! The codec itself only emits events; nothing is printed until an application calls
//! [`init_logging`]. `RUST_LOG` overrides the configured level when set.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{CodecError, Result};

/// Build the writer for the configured outputs
fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    let file = match (config.log_to_file, config.log_file_path.as_deref()) {
        (true, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| CodecError::ConfigError(format!("Failed to open log file: {e}")))?;
            Some(Arc::new(file))
        }
        (true, None) => {
            return Err(CodecError::ConfigError(
                "log_file_path must be specified when log_to_file is true".to_string(),
            ))
        }
        (false, _) => None,
    };

    let writer = match (config.log_to_console, file) {
        (true, Some(file)) => BoxMakeWriter::new(std::io::stdout.and(file)),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (true, None) => BoxMakeWriter::new(std::io::stdout),
        (false, None) => BoxMakeWriter::new(std::io::sink),
    };
    Ok(writer)
}

/// Install the global subscriber
///
/// Fails with `ConfigError` if the log file cannot be opened or a subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer(config)?)
        .with_target(true)
        .with_ansi(config.log_to_console && !config.log_to_file);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| CodecError::ConfigError(format!("Failed to initialize logging: {e}")))?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_output_requires_path() {
        let config = LoggingConfig {
            log_to_file: true,
            log_file_path: None,
            ..LoggingConfig::default()
        };
        assert!(matches!(
            make_writer(&config),
            Err(CodecError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_log_directory() {
        let config = LoggingConfig {
            log_to_file: true,
            log_file_path: Some("/nonexistent-dir/proto-wire/out.log".to_string()),
            ..LoggingConfig::default()
        };
        assert!(make_writer(&config).is_err());
    }
}
