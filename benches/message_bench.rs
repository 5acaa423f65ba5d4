use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use proto_wire::types::cosmos::Coin;
use proto_wire::types::dex::{MsgPlaceOrders, Order, OrderType, PositionDirection};
use proto_wire::Message;

fn order(id: u64) -> Order {
    Order {
        id,
        account: "sei1qv6tx3mtxf5k2f6w3d7lp4ykq2k0l5rtz3u6ea".into(),
        contract_addr: "sei1ghd753shjuwexxywmgs4xz7x2q732vcnkm6h2pyv9s6ah3hylvrqladqwc".into(),
        price: "12.345".into(),
        quantity: "100".into(),
        price_denom: "USDC".into(),
        asset_denom: "SEI".into(),
        order_type: OrderType::Limit,
        position_direction: PositionDirection::Long,
        data: "{\"leverage\":\"1\"}".into(),
        ..Order::default()
    }
}

fn place_orders(count: usize) -> MsgPlaceOrders {
    MsgPlaceOrders {
        creator: "sei1qv6tx3mtxf5k2f6w3d7lp4ykq2k0l5rtz3u6ea".into(),
        orders: (0..count as u64).map(order).collect(),
        contract_addr: "sei1ghd753shjuwexxywmgs4xz7x2q732vcnkm6h2pyv9s6ah3hylvrqladqwc".into(),
        funds: vec![Coin {
            denom: "uusdc".into(),
            amount: "1000000".into(),
        }],
    }
}

#[allow(clippy::unwrap_used)]
fn bench_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_binary");

    for &count in &[1usize, 16, 256] {
        let msg = place_orders(count);
        let bytes = msg.encode_to_vec();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_function(format!("encode_{count}_orders"), |b| {
            b.iter(|| black_box(msg.encode_to_vec()))
        });
        group.bench_function(format!("decode_{count}_orders"), |b| {
            b.iter(|| MsgPlaceOrders::decode(black_box(&bytes)).unwrap())
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_json");
    let msg = place_orders(16);
    let value = msg.to_json();

    group.bench_function("to_json", |b| b.iter(|| black_box(msg.to_json())));
    group.bench_function("from_json", |b| {
        b.iter_batched(
            || value.clone(),
            |value| MsgPlaceOrders::from_json(&value).unwrap(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_binary, bench_json);
criterion_main!(benches);
