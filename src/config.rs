//! # Configuration Management
//!
//! Centralized configuration for the codec.
//!
//! This module provides structured configuration for decode limits, stream framing and
//! logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`
//!
//! ## Security Considerations
//! - The recursion limit bounds stack use on hostile, deeply nested input
//! - Message and frame size limits are checked before any allocation

use crate::core::reader::DecodeOptions;
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Max allowed encoded message size (16 MB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Max allowed frame body size on a stream (16 MB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Default nesting depth for length-delimited messages
pub const DEFAULT_RECURSION_LIMIT: u32 = 100;

/// Whether 64-bit values are checked against the safe integer domain by default
pub const ENFORCE_SAFE_INTEGERS: bool = true;

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CodecConfig {
    /// Decode limits
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Stream framing configuration
    #[serde(default)]
    pub framing: FramingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| CodecError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CodecError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(limit) = std::env::var("PROTO_WIRE_RECURSION_LIMIT") {
            if let Ok(val) = limit.parse::<u32>() {
                config.decode.recursion_limit = val;
            }
        }

        if let Ok(enforce) = std::env::var("PROTO_WIRE_ENFORCE_SAFE_INTEGERS") {
            if let Ok(val) = enforce.parse::<bool>() {
                config.decode.enforce_safe_integers = val;
            }
        }

        if let Ok(size) = std::env::var("PROTO_WIRE_MAX_MESSAGE_SIZE") {
            if let Ok(val) = size.parse::<usize>() {
                config.decode.max_message_size = val;
            }
        }

        if let Ok(size) = std::env::var("PROTO_WIRE_MAX_FRAME_SIZE") {
            if let Ok(val) = size.parse::<usize>() {
                config.framing.max_frame_size = val;
            }
        }

        if let Ok(level) = std::env::var("PROTO_WIRE_LOG_LEVEL") {
            if let Ok(val) = level.parse::<Level>() {
                config.logging.log_level = val;
            }
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CodecError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        errors.extend(self.decode.validate());
        errors.extend(self.framing.validate());
        errors.extend(self.logging.validate());

        if self.framing.max_frame_size > self.decode.max_message_size {
            errors.push(format!(
                "Max frame size ({}) exceeds max message size ({}); frames that large could never decode",
                self.framing.max_frame_size, self.decode.max_message_size
            ));
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CodecError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Limits applied to every decode
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum nesting depth of embedded messages
    pub recursion_limit: u32,

    /// Reject 64-bit integers outside the safe integer domain
    pub enforce_safe_integers: bool,

    /// Maximum size in bytes of a buffer handed to `decode`
    pub max_message_size: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            enforce_safe_integers: ENFORCE_SAFE_INTEGERS,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }
}

impl DecodeConfig {
    /// Reader options for these limits
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions {
            recursion_limit: self.recursion_limit,
            enforce_safe_integers: self.enforce_safe_integers,
            max_message_size: self.max_message_size,
        }
    }

    /// Validate decode configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.recursion_limit == 0 {
            errors.push("Recursion limit must be greater than 0".to_string());
        } else if self.recursion_limit > 1_000 {
            errors.push(format!(
                "Recursion limit too large: {} (maximum: 1,000)",
                self.recursion_limit
            ));
        }

        if self.max_message_size == 0 {
            errors.push("Max message size cannot be 0".to_string());
        } else if self.max_message_size > 1024 * 1024 * 1024 {
            errors.push(format!(
                "Max message size too large: {} bytes (maximum: 1 GB)",
                self.max_message_size
            ));
        }

        errors
    }
}

/// Stream framing configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FramingConfig {
    /// Maximum frame body size in bytes
    pub max_frame_size: usize,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl FramingConfig {
    /// Validate framing configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_frame_size == 0 {
            errors.push("Max frame size cannot be 0".to_string());
        } else if self.max_frame_size < 64 {
            errors.push("Max frame size too small (minimum: 64 bytes)".to_string());
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("proto-wire"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
