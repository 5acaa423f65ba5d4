#![no_main]

use libfuzzer_sys::fuzz_target;
use proto_wire::types::dex::{MsgPlaceOrders, Settlements};
use proto_wire::types::ibc::ConnectionEnd;
use proto_wire::Message;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive a second trip unchanged
    if let Ok(msg) = MsgPlaceOrders::decode(data) {
        let again = MsgPlaceOrders::decode(&msg.encode_to_vec());
        assert_eq!(again.ok(), Some(msg));
    }

    let _ = Settlements::decode(data);

    if let Ok(conn) = ConnectionEnd::decode(data) {
        let _ = ConnectionEnd::from_json(&conn.to_json());
    }
});
