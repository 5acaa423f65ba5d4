//! # Serialization Formats
//!
//! Format selection for messages that travel either as protocol-buffer bytes or as JSON.
//!
//! ## Features
//! - **Two formats**: binary wire encoding (default) and the plain JSON mapping
//! - **Format metadata**: optional one-byte prefix so a receiver can detect the format
//!
//! ## Usage
//! ```rust
//! use proto_wire::core::serialization::{MultiFormat, SerializationFormat};
//! use proto_wire::types::cosmos::Coin;
//!
//! let coin = Coin { denom: "usei".into(), amount: "10".into() };
//! let bytes = coin.serialize_with_header(SerializationFormat::Json).unwrap();
//! let (back, format) = Coin::deserialize_with_header(&bytes).unwrap();
//! assert_eq!(back, coin);
//! assert_eq!(format, SerializationFormat::Json);
//! ```

use crate::core::message::Message;
use crate::error::{CodecError, Result};

/// Supported serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationFormat {
    /// Protocol-buffer wire encoding (default, compact)
    #[default]
    Protobuf,
    /// JSON object mapping (debugging, interop)
    Json,
}

impl SerializationFormat {
    /// Get the format identifier byte
    pub fn format_byte(self) -> u8 {
        match self {
            SerializationFormat::Protobuf => 0x01,
            SerializationFormat::Json => 0x02,
        }
    }

    /// Detect format from identifier byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(SerializationFormat::Protobuf),
            0x02 => Some(SerializationFormat::Json),
            _ => None,
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            SerializationFormat::Protobuf => "Protobuf",
            SerializationFormat::Json => "JSON",
        }
    }
}

/// Trait for types that support both serialization formats
pub trait MultiFormat: Sized {
    /// Serialize to bytes using the specified format
    fn serialize_format(&self, format: SerializationFormat) -> Result<Vec<u8>>;

    /// Deserialize from bytes using the specified format
    fn deserialize_format(data: &[u8], format: SerializationFormat) -> Result<Self>;

    /// Serialize to bytes with format header
    fn serialize_with_header(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        let mut data = vec![format.format_byte()];
        let mut payload = self.serialize_format(format)?;
        data.append(&mut payload);
        Ok(data)
    }

    /// Deserialize from bytes with format header
    fn deserialize_with_header(data: &[u8]) -> Result<(Self, SerializationFormat)> {
        let Some((&first, rest)) = data.split_first() else {
            return Err(CodecError::malformed("empty data"));
        };

        let format = SerializationFormat::from_byte(first)
            .ok_or_else(|| CodecError::Custom(format!("Unknown format byte: {first}")))?;

        let value = Self::deserialize_format(rest, format)?;
        Ok((value, format))
    }
}

impl<M: Message> MultiFormat for M {
    fn serialize_format(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        match format {
            SerializationFormat::Protobuf => Ok(self.encode_to_vec()),
            SerializationFormat::Json => serde_json::to_vec(&self.to_json())
                .map_err(|e| CodecError::invalid_json(M::TYPE_NAME, e.to_string())),
        }
    }

    fn deserialize_format(data: &[u8], format: SerializationFormat) -> Result<Self> {
        match format {
            SerializationFormat::Protobuf => M::decode(data),
            SerializationFormat::Json => {
                let value: serde_json::Value = serde_json::from_slice(data)
                    .map_err(|e| CodecError::invalid_json(M::TYPE_NAME, e.to_string()))?;
                M::from_json(&value)
            }
        }
    }
}
