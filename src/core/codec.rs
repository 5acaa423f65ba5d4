//! # Stream framing
//!
//! Tokio codec that carries one message per frame.
//!
//! ## Frame Format
//! ```text
//! [Length(varint)] [Message(N)]
//! ```
//!
//! This is the same layout as `Message::encode_length_delimited_to_vec`, so a file of
//! concatenated length-delimited messages can be read back through a `FramedRead`.
//!
//! The length is checked against `max_frame_size`, capped by the decode options'
//! `max_message_size`, before the body is buffered. A hostile prefix cannot make the
//! decoder reserve gigabytes.

use bytes::{Buf, BytesMut};
use std::marker::PhantomData;
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::config::{CodecConfig, MAX_FRAME_SIZE};
use crate::core::message::Message;
use crate::core::reader::{DecodeOptions, Reader};
use crate::core::wire::{encode_varint, encoded_len_varint, peek_varint};
use crate::error::{CodecError, Result};

/// Varint length-prefixed framing for messages of type `M`
#[derive(Debug, Clone)]
pub struct MessageCodec<M> {
    max_frame_size: usize,
    options: DecodeOptions,
    _message: PhantomData<fn() -> M>,
}

impl<M: Message> MessageCodec<M> {
    /// Codec with default limits
    pub fn new() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
            options: DecodeOptions::default(),
            _message: PhantomData,
        }
    }

    /// Codec using the framing and decode sections of `config`
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            max_frame_size: config.framing.max_frame_size,
            options: config.decode.options(),
            _message: PhantomData,
        }
    }

    /// Override the maximum frame body size
    pub fn with_max_frame_size(mut self, max_frame_size: usize) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// Largest body accepted in either direction: the frame limit capped by the
    /// decode options' message size
    pub fn frame_limit(&self) -> usize {
        self.max_frame_size.min(self.options.max_message_size)
    }

    fn encode_message(&self, item: &M, dst: &mut BytesMut) -> Result<()> {
        let body = item.encode_to_bytes();
        if body.len() > self.frame_limit() {
            return Err(CodecError::OversizedMessage(body.len()));
        }

        dst.reserve(encoded_len_varint(body.len() as u64) + body.len());
        encode_varint(body.len() as u64, dst);
        dst.extend_from_slice(&body);
        Ok(())
    }
}

impl<M: Message> Default for MessageCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Message> Decoder for MessageCodec<M> {
    type Item = M;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<M>> {
        // Length prefix may itself be split across reads
        let Some((length, prefix_len)) = peek_varint(src)? else {
            return Ok(None);
        };

        let length = usize::try_from(length).map_err(|_| CodecError::OversizedMessage(usize::MAX))?;
        let limit = self.frame_limit();
        if length > limit {
            debug!(
                length,
                max = limit,
                "Rejecting oversized frame"
            );
            return Err(CodecError::OversizedMessage(length));
        }

        let total = prefix_len + length;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        src.advance(prefix_len);
        let body = src.split_to(length);

        let mut reader = Reader::with_options(&body, self.options);
        M::decode_from(&mut reader, None).map(Some)
    }
}

impl<M: Message> Encoder<M> for MessageCodec<M> {
    type Error = CodecError;

    fn encode(&mut self, item: M, dst: &mut BytesMut) -> Result<()> {
        self.encode_message(&item, dst)
    }
}

impl<'a, M: Message> Encoder<&'a M> for MessageCodec<M> {
    type Error = CodecError;

    fn encode(&mut self, item: &'a M, dst: &mut BytesMut) -> Result<()> {
        self.encode_message(item, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cosmos::Coin;

    fn coin(amount: &str) -> Coin {
        Coin {
            denom: "usei".to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_frame_round_trip() {
        let mut codec = MessageCodec::<Coin>::new();
        let mut buf = BytesMut::new();
        codec.encode(coin("10"), &mut buf).unwrap();
        codec.encode(&coin("20"), &mut buf).unwrap();

        assert_eq!(codec.decode(&mut buf).unwrap(), Some(coin("10")));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(coin("20")));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_partial_frame_waits() {
        let mut codec = MessageCodec::<Coin>::new();
        let mut full = BytesMut::new();
        codec.encode(coin("12345"), &mut full).unwrap();

        let mut buf = BytesMut::from(&full[..3]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(buf.len(), 3);

        buf.extend_from_slice(&full[3..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(coin("12345")));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut codec = MessageCodec::<Coin>::new().with_max_frame_size(4);
        let mut buf = BytesMut::new();
        encode_varint(100, &mut buf);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(CodecError::OversizedMessage(100))
        ));

        let mut out = BytesMut::new();
        assert!(codec.encode(coin("123456789"), &mut out).is_err());
    }

    #[test]
    fn test_message_size_caps_frame_limit() {
        let options = DecodeOptions {
            max_message_size: 8,
            ..DecodeOptions::default()
        };
        let codec = MessageCodec::<Coin> {
            max_frame_size: 1024,
            options,
            _message: PhantomData,
        };
        assert_eq!(codec.frame_limit(), 8);
        assert_eq!(MessageCodec::<Coin>::new().frame_limit(), MAX_FRAME_SIZE);
    }
}
