//! # Message and Enumeration traits
//!
//! A schema type implements the five required methods of [`Message`]; everything else
//! (whole-buffer decode, length-delimited forms, size queries) comes from provided methods.
//!
//! Implementations follow one shape:
//! - `encode` writes populated fields in field-number order and skips zero scalars
//! - `merge_field` matches on `(field_number, wire_type)` and hands anything it does not
//!   recognize to [`Reader::skip_field`]
//! - `from_json`/`to_json` use the helpers in [`crate::core::json`]
//! - `from_partial` fills absent fields with zero values

use bytes::Bytes;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

use crate::core::reader::{DecodeOptions, Reader};
use crate::core::wire::{encode_varint, encoded_len_varint, Tag};
use crate::core::writer::Writer;
use crate::error::{CodecError, Result};

/// A protocol-buffer message with binary and JSON mappings
pub trait Message: Default + Clone + PartialEq + fmt::Debug + Send + Sync + Sized {
    /// Fully-qualified schema name, e.g. `seiprotocol.seichain.dex.Order`
    const TYPE_NAME: &'static str;

    /// All-optional companion used by [`Message::from_partial`]
    type Partial: Default;

    /// Append every populated field to `writer`
    fn encode(&self, writer: &mut Writer);

    /// Consume one field whose key has already been read
    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()>;

    /// Plain JSON object with every field present
    fn to_json(&self) -> Value;

    /// Build from a JSON object, coercing loosely typed values
    fn from_json(value: &Value) -> Result<Self>;

    /// Build from a partial value, defaulting absent fields
    fn from_partial(partial: Self::Partial) -> Self;

    /// `Any` type URL for this message
    fn type_url() -> String {
        format!("/{}", Self::TYPE_NAME)
    }

    /// Read fields until the reader is exhausted
    fn merge(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        while !reader.is_at_end() {
            let tag = reader.read_tag()?;
            self.merge_field(tag, reader)?;
        }
        Ok(())
    }

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        self.encode(&mut writer);
        writer.into_vec()
    }

    fn encode_to_bytes(&self) -> Bytes {
        let mut writer = Writer::new();
        self.encode(&mut writer);
        writer.finish()
    }

    /// Size of the encoded message in bytes
    fn encoded_len(&self) -> usize {
        let mut writer = Writer::new();
        self.encode(&mut writer);
        writer.len()
    }

    /// Encoded message prefixed with its varint length
    fn encode_length_delimited_to_vec(&self) -> Vec<u8> {
        let body = self.encode_to_bytes();
        let mut out = Vec::with_capacity(encoded_len_varint(body.len() as u64) + body.len());
        encode_varint(body.len() as u64, &mut out);
        out.extend_from_slice(&body);
        out
    }

    /// Decode a whole buffer with default limits
    fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with_options(buf, DecodeOptions::default())
    }

    /// Decode a whole buffer with explicit limits
    fn decode_with_options(buf: &[u8], options: DecodeOptions) -> Result<Self> {
        if buf.len() > options.max_message_size {
            debug!(
                type_name = Self::TYPE_NAME,
                len = buf.len(),
                max = options.max_message_size,
                "Rejecting oversized message"
            );
            return Err(CodecError::OversizedMessage(buf.len()));
        }
        let mut reader = Reader::with_options(buf, options);
        Self::decode_from(&mut reader, None).map_err(|e| {
            debug!(type_name = Self::TYPE_NAME, error = %e, "Failed to decode message");
            e
        })
    }

    /// Decode from the reader's cursor, either to the end or for exactly `length` bytes
    fn decode_from(reader: &mut Reader<'_>, length: Option<usize>) -> Result<Self> {
        let mut message = Self::default();
        match length {
            None => message.merge(reader)?,
            Some(len) => {
                let mut bounded = reader.sub_reader(len)?;
                message.merge(&mut bounded)?;
            }
        }
        Ok(message)
    }

    /// Decode a message preceded by its varint length; trailing bytes are left alone
    fn decode_length_delimited(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(buf);
        let len = reader.length_prefix()?;
        Self::decode_from(&mut reader, Some(len))
    }
}

/// A protocol-buffer enum with an `UNRECOGNIZED` sentinel for unknown input
pub trait Enumeration:
    Copy + Default + PartialEq + Eq + fmt::Debug + Send + Sync + 'static
{
    /// Value used for anything outside the declared set
    const UNRECOGNIZED: Self;

    /// Schema name, used in trace output
    const NAME: &'static str;

    /// Known value for `value`, if any
    fn from_i32(value: i32) -> Option<Self>;

    fn as_i32(self) -> i32;

    /// Name as declared in the schema
    fn as_str_name(self) -> &'static str;

    /// Known value for a schema name, if any
    fn from_str_name(name: &str) -> Option<Self>;

    /// Map a decoded integer, falling back to the sentinel
    fn from_wire(value: i32) -> Self {
        Self::from_i32(value).unwrap_or_else(|| {
            trace!(enum_name = Self::NAME, value, "Unrecognized enum value");
            Self::UNRECOGNIZED
        })
    }

    /// Map a JSON integer or name, falling back to the sentinel
    fn from_json_value(value: &Value) -> Self {
        let known = match value {
            Value::Number(n) => crate::core::json::integral(n)
                .and_then(|v| i32::try_from(v).ok())
                .and_then(Self::from_i32),
            Value::String(name) => Self::from_str_name(name),
            _ => None,
        };
        known.unwrap_or_else(|| {
            trace!(enum_name = Self::NAME, value = %value, "Unrecognized enum value");
            Self::UNRECOGNIZED
        })
    }

    fn to_json_value(self) -> Value {
        Value::String(self.as_str_name().to_string())
    }
}
