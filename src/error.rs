//! # Error Types
//!
//! Error handling for the wire codec.
//!
//! Only a handful of conditions are fatal. Everything else the codec meets on the wire
//! (unknown fields, enum values it has never heard of) is absorbed locally so that older
//! readers keep working against newer writers.
//!
//! ## Error Categories
//! - **Range Errors**: 64-bit values outside the exactly-representable integer domain
//! - **Input Errors**: truncated varints, short length-delimited sections, bad tags
//! - **Size Errors**: messages or frames above the configured limits
//! - **JSON Errors**: values that cannot be coerced to the field's type
//! - **Registry Errors**: unknown or mismatched `Any` type URLs
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! ## Example Usage
//! ```rust
//! use proto_wire::error::{CodecError, Result};
//! use proto_wire::types::dex::Order;
//! use proto_wire::Message;
//! use tracing::{error, info};
//!
//! fn order_id(bytes: &[u8]) -> Result<u64> {
//!     Ok(Order::decode(bytes)?.id)
//! }
//!
//! fn main() {
//!     match order_id(&[0x08, 0x2a]) {
//!         Ok(id) => info!(id, "Decoded order"),
//!         Err(e) => error!(error = %e, "Failed to decode order"),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
/// Static strings are borrowed, avoiding heap allocations for common error cases.
pub mod constants {
    /// Varint errors
    pub const ERR_TRUNCATED_VARINT: &str = "truncated varint";
    pub const ERR_VARINT_TOO_LONG: &str = "varint exceeds 10 bytes";
    pub const ERR_VARINT_OVERFLOW: &str = "varint overflows 64 bits";

    /// Tag errors
    pub const ERR_ZERO_FIELD_NUMBER: &str = "field number 0 is not allowed";
    pub const ERR_GROUP_WIRE_TYPE: &str = "group wire types are not supported";

    /// Length-delimited errors
    pub const ERR_TRUNCATED_FIXED: &str = "truncated fixed-width value";
    pub const ERR_LENGTH_EXCEEDS_BUFFER: &str = "length prefix exceeds remaining buffer";
    pub const ERR_LENGTH_OVERFLOW: &str = "length prefix does not fit in memory";
    pub const ERR_RECURSION_LIMIT: &str = "recursion limit reached";

    /// Registry errors
    pub const ERR_REGISTRY_WRITE_LOCK: &str = "Failed to acquire write lock on type registry";
    pub const ERR_REGISTRY_READ_LOCK: &str = "Failed to acquire read lock on type registry";
}

/// CodecError is the primary error type for all codec operations
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    #[serde(skip_serializing, skip_deserializing)]
    Io(#[from] io::Error),

    #[error("Value out of range: {0} is outside the safe integer domain")]
    ValueOutOfRange(i128),

    #[error("Malformed input: {0}")]
    MalformedInput(Cow<'static, str>),

    #[error("Message too large: {0} bytes")]
    OversizedMessage(usize),

    #[error("Invalid JSON for field `{field}`: {reason}")]
    InvalidJson { field: String, reason: String },

    #[error("Unknown type URL: {0}")]
    UnknownType(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl CodecError {
    /// Build a `MalformedInput` error from a static message without allocating
    pub fn malformed(reason: &'static str) -> Self {
        CodecError::MalformedInput(Cow::Borrowed(reason))
    }

    /// Build an `InvalidJson` error for the named field
    pub fn invalid_json(field: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidJson {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error comes from the bytes being decoded rather than the caller's setup
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            CodecError::ValueOutOfRange(_)
                | CodecError::MalformedInput(_)
                | CodecError::OversizedMessage(_)
        )
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
