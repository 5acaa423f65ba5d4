use serde_json::{json, Value};

use super::enums::{CancellationInitiator, OrderStatus, OrderType, PositionDirection};
use crate::core::json;
use crate::core::message::{Enumeration, Message};
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::Result;

/// An order as stored by the dex module
///
/// Prices and quantities are decimal text and are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    pub id: u64,
    pub status: OrderStatus,
    pub account: String,
    pub contract_addr: String,
    pub price: String,
    pub quantity: String,
    pub price_denom: String,
    pub asset_denom: String,
    pub order_type: OrderType,
    pub position_direction: PositionDirection,
    /// Contract-specific payload, usually JSON text
    pub data: String,
    pub status_description: String,
    pub nominal: String,
    pub trigger_price: String,
    pub trigger_status: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPartial {
    pub id: Option<u64>,
    pub status: Option<OrderStatus>,
    pub account: Option<String>,
    pub contract_addr: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub price_denom: Option<String>,
    pub asset_denom: Option<String>,
    pub order_type: Option<OrderType>,
    pub position_direction: Option<PositionDirection>,
    pub data: Option<String>,
    pub status_description: Option<String>,
    pub nominal: Option<String>,
    pub trigger_price: Option<String>,
    pub trigger_status: Option<bool>,
}

impl Message for Order {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.Order";
    type Partial = OrderPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .uint64_field(1, self.id)
            .enum_field(2, self.status)
            .string_field(3, &self.account)
            .string_field(4, &self.contract_addr)
            .string_field(5, &self.price)
            .string_field(6, &self.quantity)
            .string_field(7, &self.price_denom)
            .string_field(8, &self.asset_denom)
            .enum_field(9, self.order_type)
            .enum_field(10, self.position_direction)
            .string_field(11, &self.data)
            .string_field(12, &self.status_description)
            .string_field(13, &self.nominal)
            .string_field(14, &self.trigger_price)
            .bool_field(15, self.trigger_status);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::{LengthDelimited, Varint};

        match (tag.field_number, tag.wire_type) {
            (1, Varint) => self.id = reader.uint64()?,
            (2, Varint) => self.status = reader.enumeration()?,
            (3, LengthDelimited) => self.account = reader.string()?,
            (4, LengthDelimited) => self.contract_addr = reader.string()?,
            (5, LengthDelimited) => self.price = reader.string()?,
            (6, LengthDelimited) => self.quantity = reader.string()?,
            (7, LengthDelimited) => self.price_denom = reader.string()?,
            (8, LengthDelimited) => self.asset_denom = reader.string()?,
            (9, Varint) => self.order_type = reader.enumeration()?,
            (10, Varint) => self.position_direction = reader.enumeration()?,
            (11, LengthDelimited) => self.data = reader.string()?,
            (12, LengthDelimited) => self.status_description = reader.string()?,
            (13, LengthDelimited) => self.nominal = reader.string()?,
            (14, LengthDelimited) => self.trigger_price = reader.string()?,
            (15, Varint) => self.trigger_status = reader.bool()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "status": self.status.to_json_value(),
            "account": self.account,
            "contractAddr": self.contract_addr,
            "price": self.price,
            "quantity": self.quantity,
            "priceDenom": self.price_denom,
            "assetDenom": self.asset_denom,
            "orderType": self.order_type.to_json_value(),
            "positionDirection": self.position_direction.to_json_value(),
            "data": self.data,
            "statusDescription": self.status_description,
            "nominal": self.nominal,
            "triggerPrice": self.trigger_price,
            "triggerStatus": self.trigger_status,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            id: json::uint64(object, "id")?,
            status: json::enumeration(object, "status"),
            account: json::string(object, "account")?,
            contract_addr: json::string(object, "contractAddr")?,
            price: json::string(object, "price")?,
            quantity: json::string(object, "quantity")?,
            price_denom: json::string(object, "priceDenom")?,
            asset_denom: json::string(object, "assetDenom")?,
            order_type: json::enumeration(object, "orderType"),
            position_direction: json::enumeration(object, "positionDirection"),
            data: json::string(object, "data")?,
            status_description: json::string(object, "statusDescription")?,
            nominal: json::string(object, "nominal")?,
            trigger_price: json::string(object, "triggerPrice")?,
            trigger_status: json::boolean(object, "triggerStatus"),
        })
    }

    fn from_partial(partial: OrderPartial) -> Self {
        Self {
            id: partial.id.unwrap_or_default(),
            status: partial.status.unwrap_or_default(),
            account: partial.account.unwrap_or_default(),
            contract_addr: partial.contract_addr.unwrap_or_default(),
            price: partial.price.unwrap_or_default(),
            quantity: partial.quantity.unwrap_or_default(),
            price_denom: partial.price_denom.unwrap_or_default(),
            asset_denom: partial.asset_denom.unwrap_or_default(),
            order_type: partial.order_type.unwrap_or_default(),
            position_direction: partial.position_direction.unwrap_or_default(),
            data: partial.data.unwrap_or_default(),
            status_description: partial.status_description.unwrap_or_default(),
            nominal: partial.nominal.unwrap_or_default(),
            trigger_price: partial.trigger_price.unwrap_or_default(),
            trigger_status: partial.trigger_status.unwrap_or_default(),
        }
    }
}

/// Request to cancel a resting order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cancellation {
    pub id: u64,
    pub initiator: CancellationInitiator,
    pub creator: String,
    pub contract_addr: String,
    pub price_denom: String,
    pub asset_denom: String,
    pub position_direction: PositionDirection,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancellationPartial {
    pub id: Option<u64>,
    pub initiator: Option<CancellationInitiator>,
    pub creator: Option<String>,
    pub contract_addr: Option<String>,
    pub price_denom: Option<String>,
    pub asset_denom: Option<String>,
    pub position_direction: Option<PositionDirection>,
    pub price: Option<String>,
}

impl Message for Cancellation {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.Cancellation";
    type Partial = CancellationPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .uint64_field(1, self.id)
            .enum_field(2, self.initiator)
            .string_field(3, &self.creator)
            .string_field(4, &self.contract_addr)
            .string_field(5, &self.price_denom)
            .string_field(6, &self.asset_denom)
            .enum_field(7, self.position_direction)
            .string_field(8, &self.price);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::{LengthDelimited, Varint};

        match (tag.field_number, tag.wire_type) {
            (1, Varint) => self.id = reader.uint64()?,
            (2, Varint) => self.initiator = reader.enumeration()?,
            (3, LengthDelimited) => self.creator = reader.string()?,
            (4, LengthDelimited) => self.contract_addr = reader.string()?,
            (5, LengthDelimited) => self.price_denom = reader.string()?,
            (6, LengthDelimited) => self.asset_denom = reader.string()?,
            (7, Varint) => self.position_direction = reader.enumeration()?,
            (8, LengthDelimited) => self.price = reader.string()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "initiator": self.initiator.to_json_value(),
            "creator": self.creator,
            "contractAddr": self.contract_addr,
            "priceDenom": self.price_denom,
            "assetDenom": self.asset_denom,
            "positionDirection": self.position_direction.to_json_value(),
            "price": self.price,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            id: json::uint64(object, "id")?,
            initiator: json::enumeration(object, "initiator"),
            creator: json::string(object, "creator")?,
            contract_addr: json::string(object, "contractAddr")?,
            price_denom: json::string(object, "priceDenom")?,
            asset_denom: json::string(object, "assetDenom")?,
            position_direction: json::enumeration(object, "positionDirection"),
            price: json::string(object, "price")?,
        })
    }

    fn from_partial(partial: CancellationPartial) -> Self {
        Self {
            id: partial.id.unwrap_or_default(),
            initiator: partial.initiator.unwrap_or_default(),
            creator: partial.creator.unwrap_or_default(),
            contract_addr: partial.contract_addr.unwrap_or_default(),
            price_denom: partial.price_denom.unwrap_or_default(),
            asset_denom: partial.asset_denom.unwrap_or_default(),
            position_direction: partial.position_direction.unwrap_or_default(),
            price: partial.price.unwrap_or_default(),
        }
    }
}

/// Ids of the orders still resting on a book level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOrders {
    pub ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOrdersPartial {
    pub ids: Option<Vec<u64>>,
}

impl Message for ActiveOrders {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.ActiveOrders";
    type Partial = ActiveOrdersPartial;

    fn encode(&self, writer: &mut Writer) {
        writer.packed_uint64(1, &self.ids);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => reader.packed(&mut self.ids, Reader::uint64)?,
            (1, WireType::Varint) => self.ids.push(reader.uint64()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({ "ids": self.ids })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            ids: json::repeated_uint64(object, "ids")?,
        })
    }

    fn from_partial(partial: ActiveOrdersPartial) -> Self {
        Self {
            ids: partial.ids.unwrap_or_default(),
        }
    }
}
