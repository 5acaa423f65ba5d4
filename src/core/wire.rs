//! # Wire Primitives
//!
//! Varints, wire types and field tags.
//!
//! A varint stores 7 bits of value per byte, least significant group first, with the high
//! bit of each byte set while more bytes follow. A 64-bit value needs at most 10 bytes.
//!
//! A field key is the varint `(field_number << 3) | wire_type`.

use bytes::BufMut;
use std::fmt;

use crate::error::{constants, CodecError, Result};

/// Longest legal varint encoding in bytes
pub const MAX_VARINT_LEN: usize = 10;

/// Smallest legal field number
pub const MIN_FIELD_NUMBER: u32 = 1;

/// Largest legal field number (29 bits)
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How a field's value is framed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// int32, int64, uint32, uint64, bool, enum
    Varint = 0,
    /// fixed64, sfixed64, double
    SixtyFourBit = 1,
    /// string, bytes, nested messages, packed repeated scalars
    LengthDelimited = 2,
    /// fixed32, sfixed32, float
    ThirtyTwoBit = 5,
}

impl WireType {
    /// Map the low three bits of a key to a wire type.
    ///
    /// Group wire types (3, 4) and the unassigned values (6, 7) are malformed input.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::SixtyFourBit),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::ThirtyTwoBit),
            3 | 4 => Err(CodecError::malformed(constants::ERR_GROUP_WIRE_TYPE)),
            other => Err(CodecError::MalformedInput(
                format!("invalid wire type {other}").into(),
            )),
        }
    }

    /// The three-bit value written into a key
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::Varint => "varint",
            WireType::SixtyFourBit => "64-bit",
            WireType::LengthDelimited => "length-delimited",
            WireType::ThirtyTwoBit => "32-bit",
        };
        f.write_str(name)
    }
}

/// Field number and wire type of one field entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    /// Create a tag. The field number must be within `MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER`.
    ///
    /// # Panics
    /// In debug builds, if the field number is out of range.
    #[inline]
    pub fn new(field_number: u32, wire_type: WireType) -> Self {
        debug_assert!(
            (MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&field_number),
            "field number {field_number} out of range"
        );
        Self {
            field_number,
            wire_type,
        }
    }

    /// The key value written before the field's payload
    #[inline]
    pub fn key(self) -> u32 {
        (self.field_number << 3) | self.wire_type.bits()
    }

    /// Split a key read from the wire into field number and wire type
    pub fn from_key(key: u64) -> Result<Self> {
        if key > u64::from(u32::MAX) {
            return Err(CodecError::MalformedInput(
                format!("invalid key value {key}").into(),
            ));
        }
        let key = key as u32;
        let wire_type = WireType::from_bits(key & 0x07)?;
        let field_number = key >> 3;
        if field_number < MIN_FIELD_NUMBER {
            return Err(CodecError::malformed(constants::ERR_ZERO_FIELD_NUMBER));
        }
        Ok(Self {
            field_number,
            wire_type,
        })
    }
}

/// Append `value` as a varint
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Number of bytes `encode_varint` writes for `value`
#[inline]
pub fn encoded_len_varint(value: u64) -> usize {
    // Every 7 significant bits take one byte; zero still takes one.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Try to read a varint from the start of `buf`.
///
/// Returns `Ok(None)` when `buf` ends before the terminating byte, which lets stream
/// decoders wait for more input. Returns the value and the number of bytes consumed
/// otherwise.
pub fn peek_varint(buf: &[u8]) -> Result<Option<(u64, usize)>> {
    let mut value: u64 = 0;
    for (index, &byte) in buf.iter().enumerate() {
        if index == MAX_VARINT_LEN - 1 && byte > 0x01 {
            // Tenth byte may only carry the top bit of a 64-bit value.
            return Err(if byte & 0x80 != 0 {
                CodecError::malformed(constants::ERR_VARINT_TOO_LONG)
            } else {
                CodecError::malformed(constants::ERR_VARINT_OVERFLOW)
            });
        }
        value |= u64::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok(Some((value, index + 1)));
        }
    }
    Ok(None)
}

/// Read a varint from the start of `buf`, failing if it is truncated
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize)> {
    peek_varint(buf)?.ok_or_else(|| CodecError::malformed(constants::ERR_TRUNCATED_VARINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        buf
    }

    #[test]
    fn test_varint_known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(encode(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_varint_decode_matches_encode() {
        for value in [0, 1, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            let bytes = encode(value);
            let (decoded, used) = decode_varint(&bytes).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(used, bytes.len());
            assert_eq!(encoded_len_varint(value), bytes.len());
        }
    }

    #[test]
    fn test_truncated_varint() {
        assert!(matches!(peek_varint(&[0x80, 0x80]), Ok(None)));
        assert!(matches!(
            decode_varint(&[0x80, 0x80]),
            Err(CodecError::MalformedInput(_))
        ));
        assert!(decode_varint(&[]).is_err());
    }

    #[test]
    fn test_overlong_varint() {
        let eleven = [0xFF; 11];
        assert!(decode_varint(&eleven).is_err());

        let mut overflow = vec![0xFF; 9];
        overflow.push(0x02);
        assert!(decode_varint(&overflow).is_err());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_tag_key_roundtrip() {
        let tag = Tag::new(1, WireType::LengthDelimited);
        assert_eq!(tag.key(), 0x0A);
        assert_eq!(Tag::from_key(0x0A).unwrap(), tag);

        let tag = Tag::new(15, WireType::Varint);
        assert_eq!(tag.key(), 120);
    }

    #[test]
    fn test_invalid_keys() {
        // field number 0
        assert!(Tag::from_key(0x02).is_err());
        // start group
        assert!(Tag::from_key((1 << 3) | 3).is_err());
        // wire type 7
        assert!(Tag::from_key((1 << 3) | 7).is_err());
        assert!(Tag::from_key(u64::from(u32::MAX) + 1).is_err());
    }
}
