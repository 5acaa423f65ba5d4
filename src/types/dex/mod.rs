//! # Dex Module Types
//!
//! Orders, cancellations, order books, settlements and the transactions that carry them.
//! Schema package `seiprotocol.seichain.dex`.

mod enums;
mod order;
mod order_entry;
mod settlement;
mod tx;

pub use enums::{CancellationInitiator, OrderStatus, OrderType, PositionDirection};
pub use order::{ActiveOrders, ActiveOrdersPartial, Cancellation, CancellationPartial, Order, OrderPartial};
pub use order_entry::{
    Allocation, AllocationPartial, LongBook, LongBookPartial, OrderEntry, OrderEntryPartial,
    ShortBook, ShortBookPartial,
};
pub use settlement::{
    MatchResult, MatchResultPartial, SettlementEntry, SettlementEntryPartial, Settlements,
    SettlementsPartial,
};
pub use tx::{
    MsgCancelOrders, MsgCancelOrdersPartial, MsgCancelOrdersResponse,
    MsgCancelOrdersResponsePartial, MsgPlaceOrders, MsgPlaceOrdersPartial,
    MsgPlaceOrdersResponse, MsgPlaceOrdersResponsePartial,
};
