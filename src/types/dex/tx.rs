//! Transaction messages for placing and cancelling orders.

use serde_json::{json, Value};

use super::order::{Cancellation, CancellationPartial, Order, OrderPartial};
use crate::core::json;
use crate::core::message::Message;
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::Result;
use crate::types::cosmos::{Coin, CoinPartial};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgPlaceOrders {
    pub creator: String,
    pub orders: Vec<Order>,
    pub contract_addr: String,
    /// Deposit sent along with the orders
    pub funds: Vec<Coin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgPlaceOrdersPartial {
    pub creator: Option<String>,
    pub orders: Option<Vec<OrderPartial>>,
    pub contract_addr: Option<String>,
    pub funds: Option<Vec<CoinPartial>>,
}

impl Message for MsgPlaceOrders {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.MsgPlaceOrders";
    type Partial = MsgPlaceOrdersPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.creator)
            .repeated_messages(2, &self.orders)
            .string_field(3, &self.contract_addr)
            .repeated_messages(4, &self.funds);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::LengthDelimited;

        match (tag.field_number, tag.wire_type) {
            (1, LengthDelimited) => self.creator = reader.string()?,
            (2, LengthDelimited) => self.orders.push(reader.message()?),
            (3, LengthDelimited) => self.contract_addr = reader.string()?,
            (4, LengthDelimited) => self.funds.push(reader.message()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "creator": self.creator,
            "orders": self.orders.iter().map(Message::to_json).collect::<Vec<_>>(),
            "contractAddr": self.contract_addr,
            "funds": self.funds.iter().map(Message::to_json).collect::<Vec<_>>(),
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            creator: json::string(object, "creator")?,
            orders: json::repeated_message(object, "orders")?,
            contract_addr: json::string(object, "contractAddr")?,
            funds: json::repeated_message(object, "funds")?,
        })
    }

    fn from_partial(partial: MsgPlaceOrdersPartial) -> Self {
        Self {
            creator: partial.creator.unwrap_or_default(),
            orders: partial
                .orders
                .unwrap_or_default()
                .into_iter()
                .map(Order::from_partial)
                .collect(),
            contract_addr: partial.contract_addr.unwrap_or_default(),
            funds: partial
                .funds
                .unwrap_or_default()
                .into_iter()
                .map(Coin::from_partial)
                .collect(),
        }
    }
}

/// Ids assigned to the placed orders, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgPlaceOrdersResponse {
    pub order_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgPlaceOrdersResponsePartial {
    pub order_ids: Option<Vec<u64>>,
}

impl Message for MsgPlaceOrdersResponse {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.MsgPlaceOrdersResponse";
    type Partial = MsgPlaceOrdersResponsePartial;

    fn encode(&self, writer: &mut Writer) {
        writer.packed_uint64(1, &self.order_ids);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => reader.packed(&mut self.order_ids, Reader::uint64)?,
            (1, WireType::Varint) => self.order_ids.push(reader.uint64()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({ "orderIds": self.order_ids })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            order_ids: json::repeated_uint64(object, "orderIds")?,
        })
    }

    fn from_partial(partial: MsgPlaceOrdersResponsePartial) -> Self {
        Self {
            order_ids: partial.order_ids.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgCancelOrders {
    pub creator: String,
    pub cancellations: Vec<Cancellation>,
    pub contract_addr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgCancelOrdersPartial {
    pub creator: Option<String>,
    pub cancellations: Option<Vec<CancellationPartial>>,
    pub contract_addr: Option<String>,
}

impl Message for MsgCancelOrders {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.MsgCancelOrders";
    type Partial = MsgCancelOrdersPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.creator)
            .repeated_messages(2, &self.cancellations)
            .string_field(3, &self.contract_addr);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::LengthDelimited;

        match (tag.field_number, tag.wire_type) {
            (1, LengthDelimited) => self.creator = reader.string()?,
            (2, LengthDelimited) => self.cancellations.push(reader.message()?),
            (3, LengthDelimited) => self.contract_addr = reader.string()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "creator": self.creator,
            "cancellations": self.cancellations.iter().map(Message::to_json).collect::<Vec<_>>(),
            "contractAddr": self.contract_addr,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            creator: json::string(object, "creator")?,
            cancellations: json::repeated_message(object, "cancellations")?,
            contract_addr: json::string(object, "contractAddr")?,
        })
    }

    fn from_partial(partial: MsgCancelOrdersPartial) -> Self {
        Self {
            creator: partial.creator.unwrap_or_default(),
            cancellations: partial
                .cancellations
                .unwrap_or_default()
                .into_iter()
                .map(Cancellation::from_partial)
                .collect(),
            contract_addr: partial.contract_addr.unwrap_or_default(),
        }
    }
}

/// Empty acknowledgement of a `MsgCancelOrders`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgCancelOrdersResponse {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgCancelOrdersResponsePartial {}

impl Message for MsgCancelOrdersResponse {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.MsgCancelOrdersResponse";
    type Partial = MsgCancelOrdersResponsePartial;

    fn encode(&self, _writer: &mut Writer) {}

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        reader.skip_field(tag)
    }

    fn to_json(&self) -> Value {
        json!({})
    }

    fn from_json(value: &Value) -> Result<Self> {
        json::object(value, Self::TYPE_NAME)?;
        Ok(Self {})
    }

    fn from_partial(_partial: MsgCancelOrdersResponsePartial) -> Self {
        Self {}
    }
}
