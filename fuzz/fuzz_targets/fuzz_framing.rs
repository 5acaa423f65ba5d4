#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use proto_wire::types::dex::Order;
use proto_wire::MessageCodec;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut codec = MessageCodec::<Order>::new().with_max_frame_size(64 * 1024);
    let mut buf = BytesMut::from(data);
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
});
