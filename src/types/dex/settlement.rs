use serde_json::{json, Value};

use super::order::{Cancellation, CancellationPartial, Order, OrderPartial};
use crate::core::json;
use crate::core::message::Message;
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::Result;

/// One executed fill, as reported back to the contract
///
/// `position_direction` and `order_type` are the enum names as text, not enum values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementEntry {
    pub account: String,
    pub price_denom: String,
    pub asset_denom: String,
    pub quantity: String,
    pub execution_cost_or_proceed: String,
    pub expected_cost_or_proceed: String,
    pub position_direction: String,
    pub order_type: String,
    pub order_id: u64,
    pub timestamp: u64,
    pub height: u64,
    pub settlement_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementEntryPartial {
    pub account: Option<String>,
    pub price_denom: Option<String>,
    pub asset_denom: Option<String>,
    pub quantity: Option<String>,
    pub execution_cost_or_proceed: Option<String>,
    pub expected_cost_or_proceed: Option<String>,
    pub position_direction: Option<String>,
    pub order_type: Option<String>,
    pub order_id: Option<u64>,
    pub timestamp: Option<u64>,
    pub height: Option<u64>,
    pub settlement_id: Option<u64>,
}

impl Message for SettlementEntry {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.SettlementEntry";
    type Partial = SettlementEntryPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.account)
            .string_field(2, &self.price_denom)
            .string_field(3, &self.asset_denom)
            .string_field(4, &self.quantity)
            .string_field(5, &self.execution_cost_or_proceed)
            .string_field(6, &self.expected_cost_or_proceed)
            .string_field(7, &self.position_direction)
            .string_field(8, &self.order_type)
            .uint64_field(9, self.order_id)
            .uint64_field(10, self.timestamp)
            .uint64_field(11, self.height)
            .uint64_field(12, self.settlement_id);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::{LengthDelimited, Varint};

        match (tag.field_number, tag.wire_type) {
            (1, LengthDelimited) => self.account = reader.string()?,
            (2, LengthDelimited) => self.price_denom = reader.string()?,
            (3, LengthDelimited) => self.asset_denom = reader.string()?,
            (4, LengthDelimited) => self.quantity = reader.string()?,
            (5, LengthDelimited) => self.execution_cost_or_proceed = reader.string()?,
            (6, LengthDelimited) => self.expected_cost_or_proceed = reader.string()?,
            (7, LengthDelimited) => self.position_direction = reader.string()?,
            (8, LengthDelimited) => self.order_type = reader.string()?,
            (9, Varint) => self.order_id = reader.uint64()?,
            (10, Varint) => self.timestamp = reader.uint64()?,
            (11, Varint) => self.height = reader.uint64()?,
            (12, Varint) => self.settlement_id = reader.uint64()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "account": self.account,
            "priceDenom": self.price_denom,
            "assetDenom": self.asset_denom,
            "quantity": self.quantity,
            "executionCostOrProceed": self.execution_cost_or_proceed,
            "expectedCostOrProceed": self.expected_cost_or_proceed,
            "positionDirection": self.position_direction,
            "orderType": self.order_type,
            "orderId": self.order_id,
            "timestamp": self.timestamp,
            "height": self.height,
            "settlementId": self.settlement_id,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            account: json::string(object, "account")?,
            price_denom: json::string(object, "priceDenom")?,
            asset_denom: json::string(object, "assetDenom")?,
            quantity: json::string(object, "quantity")?,
            execution_cost_or_proceed: json::string(object, "executionCostOrProceed")?,
            expected_cost_or_proceed: json::string(object, "expectedCostOrProceed")?,
            position_direction: json::string(object, "positionDirection")?,
            order_type: json::string(object, "orderType")?,
            order_id: json::uint64(object, "orderId")?,
            timestamp: json::uint64(object, "timestamp")?,
            height: json::uint64(object, "height")?,
            settlement_id: json::uint64(object, "settlementId")?,
        })
    }

    fn from_partial(partial: SettlementEntryPartial) -> Self {
        Self {
            account: partial.account.unwrap_or_default(),
            price_denom: partial.price_denom.unwrap_or_default(),
            asset_denom: partial.asset_denom.unwrap_or_default(),
            quantity: partial.quantity.unwrap_or_default(),
            execution_cost_or_proceed: partial.execution_cost_or_proceed.unwrap_or_default(),
            expected_cost_or_proceed: partial.expected_cost_or_proceed.unwrap_or_default(),
            position_direction: partial.position_direction.unwrap_or_default(),
            order_type: partial.order_type.unwrap_or_default(),
            order_id: partial.order_id.unwrap_or_default(),
            timestamp: partial.timestamp.unwrap_or_default(),
            height: partial.height.unwrap_or_default(),
            settlement_id: partial.settlement_id.unwrap_or_default(),
        }
    }
}

/// Settlement entries produced in one epoch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlements {
    pub epoch: i64,
    pub entries: Vec<SettlementEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementsPartial {
    pub epoch: Option<i64>,
    pub entries: Option<Vec<SettlementEntryPartial>>,
}

impl Message for Settlements {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.Settlements";
    type Partial = SettlementsPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .int64_field(1, self.epoch)
            .repeated_messages(2, &self.entries);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::Varint) => self.epoch = reader.int64()?,
            (2, WireType::LengthDelimited) => self.entries.push(reader.message()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "epoch": self.epoch,
            "entries": self.entries.iter().map(Message::to_json).collect::<Vec<_>>(),
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            epoch: json::int64(object, "epoch")?,
            entries: json::repeated_message(object, "entries")?,
        })
    }

    fn from_partial(partial: SettlementsPartial) -> Self {
        Self {
            epoch: partial.epoch.unwrap_or_default(),
            entries: partial
                .entries
                .unwrap_or_default()
                .into_iter()
                .map(SettlementEntry::from_partial)
                .collect(),
        }
    }
}

/// Everything one contract's matching round produced at a block height
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub height: i64,
    pub contract_addr: String,
    pub orders: Vec<Order>,
    pub settlements: Vec<SettlementEntry>,
    pub cancellations: Vec<Cancellation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResultPartial {
    pub height: Option<i64>,
    pub contract_addr: Option<String>,
    pub orders: Option<Vec<OrderPartial>>,
    pub settlements: Option<Vec<SettlementEntryPartial>>,
    pub cancellations: Option<Vec<CancellationPartial>>,
}

impl Message for MatchResult {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.MatchResult";
    type Partial = MatchResultPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .int64_field(1, self.height)
            .string_field(2, &self.contract_addr)
            .repeated_messages(3, &self.orders)
            .repeated_messages(4, &self.settlements)
            .repeated_messages(5, &self.cancellations);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::{LengthDelimited, Varint};

        match (tag.field_number, tag.wire_type) {
            (1, Varint) => self.height = reader.int64()?,
            (2, LengthDelimited) => self.contract_addr = reader.string()?,
            (3, LengthDelimited) => self.orders.push(reader.message()?),
            (4, LengthDelimited) => self.settlements.push(reader.message()?),
            (5, LengthDelimited) => self.cancellations.push(reader.message()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "height": self.height,
            "contractAddr": self.contract_addr,
            "orders": self.orders.iter().map(Message::to_json).collect::<Vec<_>>(),
            "settlements": self.settlements.iter().map(Message::to_json).collect::<Vec<_>>(),
            "cancellations": self.cancellations.iter().map(Message::to_json).collect::<Vec<_>>(),
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            height: json::int64(object, "height")?,
            contract_addr: json::string(object, "contractAddr")?,
            orders: json::repeated_message(object, "orders")?,
            settlements: json::repeated_message(object, "settlements")?,
            cancellations: json::repeated_message(object, "cancellations")?,
        })
    }

    fn from_partial(partial: MatchResultPartial) -> Self {
        Self {
            height: partial.height.unwrap_or_default(),
            contract_addr: partial.contract_addr.unwrap_or_default(),
            orders: partial
                .orders
                .unwrap_or_default()
                .into_iter()
                .map(Order::from_partial)
                .collect(),
            settlements: partial
                .settlements
                .unwrap_or_default()
                .into_iter()
                .map(SettlementEntry::from_partial)
                .collect(),
            cancellations: partial
                .cancellations
                .unwrap_or_default()
                .into_iter()
                .map(Cancellation::from_partial)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dex::{OrderStatus, PositionDirection};

    fn entry(order_id: u64) -> SettlementEntry {
        SettlementEntry {
            account: "sei1acct".to_string(),
            price_denom: "USDC".to_string(),
            asset_denom: "SEI".to_string(),
            quantity: "1".to_string(),
            execution_cost_or_proceed: "10".to_string(),
            expected_cost_or_proceed: "10".to_string(),
            position_direction: "LONG".to_string(),
            order_type: "LIMIT".to_string(),
            order_id,
            timestamp: 1_700_000_000,
            height: 100,
            settlement_id: order_id + 1000,
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_negative_epoch_round_trip() {
        let settlements = Settlements {
            epoch: -3,
            entries: vec![entry(1), entry(2)],
        };
        let bytes = settlements.encode_to_vec();
        // int64 -3 takes a 10-byte sign-extended varint after the key
        assert_eq!(bytes[0], 0x08);
        assert_eq!(bytes[10], 0x01);
        assert_eq!(Settlements::decode(&bytes).unwrap(), settlements);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_match_result_round_trip() {
        let result = MatchResult {
            height: 12,
            contract_addr: "sei1contract".to_string(),
            orders: vec![Order {
                id: 1,
                status: OrderStatus::Placed,
                ..Order::default()
            }],
            settlements: vec![entry(1)],
            cancellations: vec![Cancellation {
                id: 2,
                position_direction: PositionDirection::Short,
                ..Cancellation::default()
            }],
        };
        assert_eq!(MatchResult::decode(&result.encode_to_vec()).unwrap(), result);
        assert_eq!(MatchResult::from_json(&result.to_json()).unwrap(), result);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_settlement_json_names() {
        let out = entry(5).to_json();
        assert_eq!(out["executionCostOrProceed"], json!("10"));
        assert_eq!(out["settlementId"], json!(1005));
        assert_eq!(out["timestamp"], json!(1_700_000_000u64));
    }
}
