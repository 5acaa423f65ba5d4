//! Integration tests for stream framing
//!
//! These tests drive the message codec over in-memory byte streams, checking that frames
//! survive arbitrary read splits and that size limits hold before any buffering.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use proto_wire::config::CodecConfig;
use proto_wire::core::wire::encode_varint;
use proto_wire::error::CodecError;
use proto_wire::types::cosmos::Coin;
use proto_wire::types::dex::{MsgPlaceOrders, Order, OrderType};
use proto_wire::{Message, MessageCodec};
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{Decoder, Encoder, FramedRead, FramedWrite};

fn order(id: u64) -> Order {
    Order {
        id,
        account: format!("sei1account{id}"),
        price: "1.5".to_string(),
        quantity: "10".to_string(),
        order_type: OrderType::Limit,
        ..Order::default()
    }
}

#[test]
fn test_decode_byte_by_byte() {
    let mut codec = MessageCodec::<Order>::new();
    let mut encoded = BytesMut::new();
    codec.encode(order(1), &mut encoded).expect("Failed to encode");

    let mut buffer = BytesMut::new();
    let mut decoded = None;
    for (index, byte) in encoded.iter().enumerate() {
        buffer.extend_from_slice(&[*byte]);
        decoded = codec.decode(&mut buffer).expect("Decode should not error");
        if index + 1 < encoded.len() {
            assert!(decoded.is_none(), "frame completed early at byte {index}");
        }
    }
    assert_eq!(decoded, Some(order(1)));
    assert!(buffer.is_empty());
}

#[test]
fn test_partial_decode_preserves_buffer() {
    let mut codec = MessageCodec::<Order>::new();

    // A two-byte length prefix that is not finished yet
    let mut buffer = BytesMut::from(&[0x80][..]);
    assert!(codec.decode(&mut buffer).unwrap().is_none());
    assert_eq!(buffer.len(), 1);
}

#[test]
fn test_frame_layout_matches_length_delimited() {
    let mut codec = MessageCodec::<Order>::new();
    let mut buffer = BytesMut::new();
    codec.encode(&order(7), &mut buffer).expect("Failed to encode");
    assert_eq!(&buffer[..], &order(7).encode_length_delimited_to_vec()[..]);
}

#[test]
fn test_oversized_frame_rejected_before_buffering() {
    let config = CodecConfig::default_with_overrides(|c| c.framing.max_frame_size = 1024);
    let mut codec = MessageCodec::<Order>::from_config(&config);

    let mut buffer = BytesMut::new();
    encode_varint(10 * 1024 * 1024, &mut buffer);

    assert!(matches!(
        codec.decode(&mut buffer),
        Err(CodecError::OversizedMessage(10_485_760))
    ));
    assert!(buffer.capacity() < 1024);
}

#[test]
fn test_decode_message_size_applies_to_frames() {
    let config = CodecConfig::default_with_overrides(|c| {
        c.decode.max_message_size = 4;
        c.framing.max_frame_size = 1024;
    });
    let mut codec = MessageCodec::<Coin>::from_config(&config);

    let coin = Coin {
        denom: "usei".to_string(),
        amount: "123456".to_string(),
    };
    let mut buffer = BytesMut::from(&coin.encode_length_delimited_to_vec()[..]);
    assert!(matches!(
        codec.decode(&mut buffer),
        Err(CodecError::OversizedMessage(14))
    ));

    let mut out = BytesMut::new();
    assert!(matches!(
        codec.encode(&coin, &mut out),
        Err(CodecError::OversizedMessage(14))
    ));
    assert!(out.is_empty());
}

#[test]
fn test_malformed_body_is_an_error() {
    let mut codec = MessageCodec::<Order>::new();
    // length 2, body is a tag with wire type 7
    let mut buffer = BytesMut::from(&[0x02, 0x0f, 0x00][..]);
    assert!(matches!(
        codec.decode(&mut buffer),
        Err(CodecError::MalformedInput(_))
    ));
}

#[test]
fn test_empty_message_frame() {
    let mut codec = MessageCodec::<Order>::new();
    let mut buffer = BytesMut::new();
    codec.encode(Order::default(), &mut buffer).unwrap();
    assert_eq!(&buffer[..], &[0x00]);
    assert_eq!(codec.decode(&mut buffer).unwrap(), Some(Order::default()));
}

#[tokio::test]
async fn test_framed_over_duplex_stream() {
    let (client, server) = tokio::io::duplex(64);

    let writer = tokio::spawn(async move {
        let mut sink = FramedWrite::new(client, MessageCodec::<MsgPlaceOrders>::new());
        for batch in 0..20u64 {
            let msg = MsgPlaceOrders {
                creator: "sei1creator".to_string(),
                orders: (0..batch).map(order).collect(),
                contract_addr: "sei1contract".to_string(),
                funds: Vec::new(),
            };
            sink.send(msg).await.expect("Failed to send");
        }
    });

    let mut stream = FramedRead::new(server, MessageCodec::<MsgPlaceOrders>::new());
    let mut received = 0u64;
    while let Some(frame) = stream.next().await {
        let msg = frame.expect("Failed to decode frame");
        assert_eq!(msg.orders.len() as u64, received);
        assert_eq!(msg.orders.last().map(|o| o.id), received.checked_sub(1));
        received += 1;
    }
    assert_eq!(received, 20);
    writer.await.unwrap();
}

#[tokio::test]
async fn test_truncated_stream_reports_error() {
    let (mut client, server) = tokio::io::duplex(64);

    let bytes = order(3).encode_length_delimited_to_vec();
    client.write_all(&bytes[..bytes.len() - 2]).await.unwrap();
    drop(client);

    let mut stream = FramedRead::new(server, MessageCodec::<Order>::new());
    let result = stream.next().await.expect("stream should yield an error");
    assert!(result.is_err());
}
