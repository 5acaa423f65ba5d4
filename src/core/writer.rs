//! # Writer
//!
//! Append-only encoder backed by `BytesMut`.
//!
//! Methods return `&mut Self` so a key and its value read as one statement:
//!
//! ```rust
//! use proto_wire::core::wire::WireType;
//! use proto_wire::core::writer::Writer;
//!
//! let mut writer = Writer::new();
//! writer.tag(1, WireType::LengthDelimited).string("07-tendermint-0");
//! assert_eq!(writer.as_slice()[..2], [0x0a, 0x0f]);
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::core::message::{Enumeration, Message};
use crate::core::wire::{encode_varint, WireType};

/// Growable output buffer for one encode call
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Freeze the output into shared `Bytes`
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    /// Write a field key.
    ///
    /// `field_number` should be within `MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER`. Other values
    /// are written as given without panicking; decoders reject field 0 as malformed.
    #[inline]
    pub fn tag(&mut self, field_number: u32, wire_type: WireType) -> &mut Self {
        let key = (u64::from(field_number) << 3) | u64::from(wire_type.bits());
        self.varint(key)
    }

    #[inline]
    pub fn varint(&mut self, value: u64) -> &mut Self {
        encode_varint(value, &mut self.buf);
        self
    }

    pub fn uint32(&mut self, value: u32) -> &mut Self {
        self.varint(u64::from(value))
    }

    /// Negative values are sign-extended to 64 bits and take 10 bytes.
    pub fn int32(&mut self, value: i32) -> &mut Self {
        self.varint(i64::from(value) as u64)
    }

    pub fn uint64(&mut self, value: u64) -> &mut Self {
        self.varint(value)
    }

    pub fn int64(&mut self, value: i64) -> &mut Self {
        self.varint(value as u64)
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.varint(u64::from(value))
    }

    pub fn fixed32(&mut self, value: u32) -> &mut Self {
        self.buf.put_u32_le(value);
        self
    }

    pub fn fixed64(&mut self, value: u64) -> &mut Self {
        self.buf.put_u64_le(value);
        self
    }

    /// Length prefix followed by the raw bytes
    pub fn bytes(&mut self, value: &[u8]) -> &mut Self {
        self.varint(value.len() as u64);
        self.buf.put_slice(value);
        self
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.bytes(value.as_bytes())
    }

    /// Encode `message` first, then emit it as a length-delimited field
    pub fn message<M: Message>(&mut self, field_number: u32, message: &M) -> &mut Self {
        let mut nested = Writer::new();
        message.encode(&mut nested);
        self.tag(field_number, WireType::LengthDelimited)
            .bytes(&nested.buf)
    }

    /// Concatenate `values` into one length-delimited entry
    pub fn packed<T, F>(&mut self, field_number: u32, values: &[T], mut write: F) -> &mut Self
    where
        T: Copy,
        F: FnMut(&mut Writer, T) -> &mut Writer,
    {
        let mut run = Writer::with_capacity(values.len());
        for &value in values {
            write(&mut run, value);
        }
        self.tag(field_number, WireType::LengthDelimited)
            .bytes(&run.buf)
    }

    // Field writers below skip zero values, so a default message encodes to nothing.

    pub fn string_field(&mut self, field_number: u32, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.tag(field_number, WireType::LengthDelimited).string(value);
        }
        self
    }

    pub fn bytes_field(&mut self, field_number: u32, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            self.tag(field_number, WireType::LengthDelimited).bytes(value);
        }
        self
    }

    pub fn uint64_field(&mut self, field_number: u32, value: u64) -> &mut Self {
        if value != 0 {
            self.tag(field_number, WireType::Varint).uint64(value);
        }
        self
    }

    pub fn int64_field(&mut self, field_number: u32, value: i64) -> &mut Self {
        if value != 0 {
            self.tag(field_number, WireType::Varint).int64(value);
        }
        self
    }

    pub fn bool_field(&mut self, field_number: u32, value: bool) -> &mut Self {
        if value {
            self.tag(field_number, WireType::Varint).bool(true);
        }
        self
    }

    /// Enum as its `int32` value; the sentinel is written as -1
    pub fn enum_field<E: Enumeration>(&mut self, field_number: u32, value: E) -> &mut Self {
        let raw = value.as_i32();
        if raw != 0 {
            self.tag(field_number, WireType::Varint).int32(raw);
        }
        self
    }

    /// Nested message; `None` is omitted, `Some(default)` is a zero-length entry
    pub fn message_field<M: Message>(&mut self, field_number: u32, value: Option<&M>) -> &mut Self {
        if let Some(message) = value {
            self.message(field_number, message);
        }
        self
    }

    pub fn repeated_messages<M: Message>(&mut self, field_number: u32, values: &[M]) -> &mut Self {
        for message in values {
            self.message(field_number, message);
        }
        self
    }

    pub fn repeated_strings(&mut self, field_number: u32, values: &[String]) -> &mut Self {
        for value in values {
            self.tag(field_number, WireType::LengthDelimited).string(value);
        }
        self
    }

    /// Packed `uint64` run; an empty list is omitted
    pub fn packed_uint64(&mut self, field_number: u32, values: &[u64]) -> &mut Self {
        if !values.is_empty() {
            self.packed(field_number, values, Writer::uint64);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_field() {
        let mut writer = Writer::new();
        writer
            .tag(1, WireType::LengthDelimited)
            .string("07-tendermint-0");

        let mut expected = vec![0x0a, 0x0f];
        expected.extend_from_slice(b"07-tendermint-0");
        assert_eq!(writer.into_vec(), expected);
    }

    #[test]
    fn test_packed_field() {
        let mut writer = Writer::new();
        writer.packed(1, &[1u64, 2, 3], Writer::uint64);
        assert_eq!(writer.as_slice(), &[0x0a, 0x03, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_field_writers_skip_zero_values() {
        let mut writer = Writer::new();
        writer
            .string_field(1, "")
            .bytes_field(2, &[])
            .uint64_field(3, 0)
            .int64_field(4, 0)
            .bool_field(5, false)
            .packed_uint64(6, &[])
            .repeated_strings(7, &[]);
        assert!(writer.is_empty());

        writer.uint64_field(3, 1).bool_field(5, true);
        assert_eq!(writer.as_slice(), &[0x18, 0x01, 0x28, 0x01]);
    }

    #[test]
    fn test_field_zero_key_is_written_not_panicking() {
        let mut writer = Writer::new();
        writer.tag(0, WireType::Varint).varint(1);
        assert_eq!(writer.as_slice(), &[0x00, 0x01]);
        assert!(crate::types::cosmos::Coin::decode(writer.as_slice()).is_err());
    }

    #[test]
    fn test_negative_int32_is_ten_bytes() {
        let mut writer = Writer::new();
        writer.int32(-1);
        assert_eq!(writer.len(), 10);
    }

    #[test]
    fn test_fixed_little_endian() {
        let mut writer = Writer::new();
        writer.fixed32(1).fixed64(2);
        assert_eq!(
            writer.as_slice(),
            &[1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]
        );
    }
}
