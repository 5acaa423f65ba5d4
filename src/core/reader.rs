//! # Reader
//!
//! Bounds-checked cursor over an encoded message.
//!
//! Every read validates against the remaining input before touching it, so truncated or
//! inconsistent input surfaces as `MalformedInput` instead of a panic. Nested values are
//! decoded on a sub-reader that covers exactly their declared length, which keeps a
//! corrupt inner message from reading into its parent's fields.

use tracing::trace;

use crate::config::{DEFAULT_RECURSION_LIMIT, MAX_MESSAGE_SIZE};
use crate::core::message::{Enumeration, Message};
use crate::core::numeric::{safe_i64, safe_u64};
use crate::core::wire::{decode_varint, Tag, WireType};
use crate::error::{constants, CodecError, Result};

/// Limits applied while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth of length-delimited messages
    pub recursion_limit: u32,
    /// Reject 64-bit values outside `MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER`
    pub enforce_safe_integers: bool,
    /// Largest buffer accepted by `Message::decode_with_options`
    pub max_message_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            enforce_safe_integers: true,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }
}

/// Read cursor over one encoded message
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: u32,
    options: DecodeOptions,
}

impl<'a> Reader<'a> {
    /// Create a reader with default options
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, DecodeOptions::default())
    }

    /// Create a reader with explicit limits
    pub fn with_options(buf: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            buf,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Options this reader was created with
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Current read offset
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying input
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the underlying input is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether the cursor reached the end of the input
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Current nesting depth
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::malformed(constants::ERR_LENGTH_EXCEEDS_BUFFER));
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    fn take_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        if N > self.remaining() {
            return Err(CodecError::malformed(constants::ERR_TRUNCATED_FIXED));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Reader over the next `len` bytes at the same depth; advances past them
    pub fn sub_reader(&mut self, len: usize) -> Result<Reader<'a>> {
        let body = self.take(len)?;
        Ok(Reader {
            buf: body,
            pos: 0,
            depth: self.depth,
            options: self.options,
        })
    }

    /// Raw varint without any range check
    pub fn varint(&mut self) -> Result<u64> {
        let (value, used) = decode_varint(&self.buf[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    /// Read and split the next field key
    pub fn read_tag(&mut self) -> Result<Tag> {
        Tag::from_key(self.varint()?)
    }

    /// Read a varint length prefix
    pub fn length_prefix(&mut self) -> Result<usize> {
        let len = self.varint()?;
        usize::try_from(len).map_err(|_| CodecError::malformed(constants::ERR_LENGTH_OVERFLOW))
    }

    pub fn uint32(&mut self) -> Result<u32> {
        Ok(self.varint()? as u32)
    }

    /// Negative values arrive sign-extended to 64 bits; the low 32 bits carry the value.
    pub fn int32(&mut self) -> Result<i32> {
        Ok(self.varint()? as u32 as i32)
    }

    /// Unsigned 64-bit value, checked against the safe domain when enforcement is on
    pub fn uint64(&mut self) -> Result<u64> {
        let value = self.varint()?;
        if self.options.enforce_safe_integers {
            safe_u64(value)
        } else {
            Ok(value)
        }
    }

    /// Signed 64-bit value, checked against the safe domain when enforcement is on
    pub fn int64(&mut self) -> Result<i64> {
        let value = self.varint()? as i64;
        if self.options.enforce_safe_integers {
            safe_i64(value)
        } else {
            Ok(value)
        }
    }

    /// Enum value; anything outside the declared set becomes the sentinel
    pub fn enumeration<E: Enumeration>(&mut self) -> Result<E> {
        Ok(E::from_wire(self.int32()?))
    }

    pub fn bool(&mut self) -> Result<bool> {
        Ok(self.varint()? != 0)
    }

    pub fn fixed32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_fixed::<4>()?))
    }

    pub fn fixed64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_fixed::<8>()?))
    }

    /// Length-prefixed byte slice, borrowed from the input
    pub fn bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.length_prefix()?;
        self.take(len)
    }

    /// Length-prefixed UTF-8 text. Invalid sequences decode to U+FFFD.
    pub fn string(&mut self) -> Result<String> {
        let raw = self.bytes()?;
        Ok(String::from_utf8_lossy(raw).into_owned())
    }

    /// Decode a length-delimited nested message
    pub fn message<M: Message>(&mut self) -> Result<M> {
        let depth = self.depth + 1;
        if depth > self.options.recursion_limit {
            return Err(CodecError::malformed(constants::ERR_RECURSION_LIMIT));
        }
        let len = self.length_prefix()?;
        let mut nested = self.sub_reader(len)?;
        nested.depth = depth;

        let mut message = M::default();
        message.merge(&mut nested)?;
        Ok(message)
    }

    /// Read a packed run of scalars into `out`
    pub fn packed<T, F>(&mut self, out: &mut Vec<T>, mut read: F) -> Result<()>
    where
        F: FnMut(&mut Reader<'a>) -> Result<T>,
    {
        let len = self.length_prefix()?;
        let mut packed = self.sub_reader(len)?;
        while !packed.is_at_end() {
            out.push(read(&mut packed)?);
        }
        Ok(())
    }

    /// Skip one value of the given wire type without interpreting it
    pub fn skip_type(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::Varint => {
                self.varint()?;
            }
            WireType::SixtyFourBit => {
                self.take_fixed::<8>()?;
            }
            WireType::LengthDelimited => {
                self.bytes()?;
            }
            WireType::ThirtyTwoBit => {
                self.take_fixed::<4>()?;
            }
        }
        Ok(())
    }

    /// Skip a field the message does not know
    pub fn skip_field(&mut self, tag: Tag) -> Result<()> {
        trace!(
            field_number = tag.field_number,
            wire_type = %tag.wire_type,
            depth = self.depth,
            "Skipping unknown field"
        );
        self.skip_type(tag.wire_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_scalar_reads() {
        let buf = [0x96, 0x01, 0x01, 0x03, b'a', b'b', b'c'];
        let mut reader = Reader::new(&buf);
        assert_eq!(reader.uint32().unwrap(), 150);
        assert!(reader.bool().unwrap());
        assert_eq!(reader.string().unwrap(), "abc");
        assert!(reader.is_at_end());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_negative_int32() {
        // -1 as a sign-extended 10-byte varint
        let buf = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        let mut reader = Reader::new(&buf);
        assert_eq!(reader.int32().unwrap(), -1);
    }

    #[test]
    fn test_bytes_longer_than_buffer() {
        let buf = [0x05, 0x01, 0x02];
        let mut reader = Reader::new(&buf);
        assert!(matches!(
            reader.bytes(),
            Err(CodecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_truncated_fixed() {
        let buf = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&buf);
        assert!(reader.fixed32().is_err());
        assert!(reader.skip_type(WireType::SixtyFourBit).is_err());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_skip_each_wire_type() {
        let mut buf = vec![0xAC, 0x02];
        buf.extend_from_slice(&[0u8; 8]);
        buf.extend_from_slice(&[0x02, 0xAA, 0xBB]);
        buf.extend_from_slice(&[0u8; 4]);

        let mut reader = Reader::new(&buf);
        reader.skip_type(WireType::Varint).unwrap();
        reader.skip_type(WireType::SixtyFourBit).unwrap();
        reader.skip_type(WireType::LengthDelimited).unwrap();
        reader.skip_type(WireType::ThirtyTwoBit).unwrap();
        assert!(reader.is_at_end());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_uint64_safe_bound() {
        let mut buf = Vec::new();
        crate::core::wire::encode_varint(1 << 60, &mut buf);

        let mut reader = Reader::new(&buf);
        assert!(matches!(
            reader.uint64(),
            Err(CodecError::ValueOutOfRange(_))
        ));

        let options = DecodeOptions {
            enforce_safe_integers: false,
            ..DecodeOptions::default()
        };
        let mut reader = Reader::with_options(&buf, options);
        assert_eq!(reader.uint64().unwrap(), 1 << 60);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_packed_reads_until_sub_end() {
        // length 3, values 1, 2, 3, then a trailing byte outside the packed run
        let buf = [0x03, 0x01, 0x02, 0x03, 0x7F];
        let mut reader = Reader::new(&buf);
        let mut out = Vec::new();
        reader.packed(&mut out, Reader::uint64).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(reader.remaining(), 1);
    }
}
