use serde_json::{json, Value};

use crate::core::json;
use crate::core::message::Message;
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::Result;

/// Share of a book level owned by one order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    pub order_id: u64,
    pub quantity: String,
    pub account: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationPartial {
    pub order_id: Option<u64>,
    pub quantity: Option<String>,
    pub account: Option<String>,
}

impl Message for Allocation {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.Allocation";
    type Partial = AllocationPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .uint64_field(1, self.order_id)
            .string_field(2, &self.quantity)
            .string_field(3, &self.account);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::Varint) => self.order_id = reader.uint64()?,
            (2, WireType::LengthDelimited) => self.quantity = reader.string()?,
            (3, WireType::LengthDelimited) => self.account = reader.string()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "orderId": self.order_id,
            "quantity": self.quantity,
            "account": self.account,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            order_id: json::uint64(object, "orderId")?,
            quantity: json::string(object, "quantity")?,
            account: json::string(object, "account")?,
        })
    }

    fn from_partial(partial: AllocationPartial) -> Self {
        Self {
            order_id: partial.order_id.unwrap_or_default(),
            quantity: partial.quantity.unwrap_or_default(),
            account: partial.account.unwrap_or_default(),
        }
    }
}

/// Aggregate of all resting orders at one price
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderEntry {
    pub price: String,
    pub quantity: String,
    pub allocations: Vec<Allocation>,
    pub price_denom: String,
    pub asset_denom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderEntryPartial {
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub allocations: Option<Vec<AllocationPartial>>,
    pub price_denom: Option<String>,
    pub asset_denom: Option<String>,
}

impl Message for OrderEntry {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.OrderEntry";
    type Partial = OrderEntryPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.price)
            .string_field(2, &self.quantity)
            .repeated_messages(3, &self.allocations)
            .string_field(4, &self.price_denom)
            .string_field(5, &self.asset_denom);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::LengthDelimited;

        match (tag.field_number, tag.wire_type) {
            (1, LengthDelimited) => self.price = reader.string()?,
            (2, LengthDelimited) => self.quantity = reader.string()?,
            (3, LengthDelimited) => self.allocations.push(reader.message()?),
            (4, LengthDelimited) => self.price_denom = reader.string()?,
            (5, LengthDelimited) => self.asset_denom = reader.string()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "price": self.price,
            "quantity": self.quantity,
            "allocations": self.allocations.iter().map(Message::to_json).collect::<Vec<_>>(),
            "priceDenom": self.price_denom,
            "assetDenom": self.asset_denom,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            price: json::string(object, "price")?,
            quantity: json::string(object, "quantity")?,
            allocations: json::repeated_message(object, "allocations")?,
            price_denom: json::string(object, "priceDenom")?,
            asset_denom: json::string(object, "assetDenom")?,
        })
    }

    fn from_partial(partial: OrderEntryPartial) -> Self {
        Self {
            price: partial.price.unwrap_or_default(),
            quantity: partial.quantity.unwrap_or_default(),
            allocations: partial
                .allocations
                .unwrap_or_default()
                .into_iter()
                .map(Allocation::from_partial)
                .collect(),
            price_denom: partial.price_denom.unwrap_or_default(),
            asset_denom: partial.asset_denom.unwrap_or_default(),
        }
    }
}

/// Shared encoding for the two sides of the book; both are `{1 price, 2 entry}`.
fn encode_book(writer: &mut Writer, price: &str, entry: Option<&OrderEntry>) {
    writer.string_field(1, price).message_field(2, entry);
}

fn merge_book_field(
    price: &mut String,
    entry: &mut Option<OrderEntry>,
    tag: Tag,
    reader: &mut Reader<'_>,
) -> Result<()> {
    match (tag.field_number, tag.wire_type) {
        (1, WireType::LengthDelimited) => *price = reader.string()?,
        (2, WireType::LengthDelimited) => *entry = Some(reader.message()?),
        _ => reader.skip_field(tag)?,
    }
    Ok(())
}

fn book_to_json(price: &str, entry: Option<&OrderEntry>) -> Value {
    let mut out = json!({ "price": price });
    if let Some(entry) = entry {
        out["entry"] = entry.to_json();
    }
    out
}

/// Bid side book level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongBook {
    pub price: String,
    pub entry: Option<OrderEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongBookPartial {
    pub price: Option<String>,
    pub entry: Option<OrderEntryPartial>,
}

impl Message for LongBook {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.LongBook";
    type Partial = LongBookPartial;

    fn encode(&self, writer: &mut Writer) {
        encode_book(writer, &self.price, self.entry.as_ref());
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        merge_book_field(&mut self.price, &mut self.entry, tag, reader)
    }

    fn to_json(&self) -> Value {
        book_to_json(&self.price, self.entry.as_ref())
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            price: json::string(object, "price")?,
            entry: json::message(object, "entry")?,
        })
    }

    fn from_partial(partial: LongBookPartial) -> Self {
        Self {
            price: partial.price.unwrap_or_default(),
            entry: partial.entry.map(OrderEntry::from_partial),
        }
    }
}

/// Ask side book level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortBook {
    pub price: String,
    pub entry: Option<OrderEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortBookPartial {
    pub price: Option<String>,
    pub entry: Option<OrderEntryPartial>,
}

impl Message for ShortBook {
    const TYPE_NAME: &'static str = "seiprotocol.seichain.dex.ShortBook";
    type Partial = ShortBookPartial;

    fn encode(&self, writer: &mut Writer) {
        encode_book(writer, &self.price, self.entry.as_ref());
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        merge_book_field(&mut self.price, &mut self.entry, tag, reader)
    }

    fn to_json(&self) -> Value {
        book_to_json(&self.price, self.entry.as_ref())
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            price: json::string(object, "price")?,
            entry: json::message(object, "entry")?,
        })
    }

    fn from_partial(partial: ShortBookPartial) -> Self {
        Self {
            price: partial.price.unwrap_or_default(),
            entry: partial.entry.map(OrderEntry::from_partial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> OrderEntry {
        OrderEntry {
            price: "10".to_string(),
            quantity: "5".to_string(),
            allocations: vec![
                Allocation {
                    order_id: 1,
                    quantity: "2".to_string(),
                    account: "sei1a".to_string(),
                },
                Allocation {
                    order_id: 2,
                    quantity: "3".to_string(),
                    account: "sei1b".to_string(),
                },
            ],
            price_denom: "USDC".to_string(),
            asset_denom: "SEI".to_string(),
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_entry_round_trip_keeps_allocation_order() {
        let decoded = OrderEntry::decode(&entry().encode_to_vec()).unwrap();
        assert_eq!(decoded, entry());
        assert_eq!(decoded.allocations[1].order_id, 2);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_book_nested_presence() {
        let empty = LongBook {
            price: "1".to_string(),
            entry: None,
        };
        assert_eq!(empty.encode_to_vec(), vec![0x0a, 0x01, b'1']);
        assert!(empty.to_json().get("entry").is_none());

        let zero_entry = ShortBook {
            price: String::new(),
            entry: Some(OrderEntry::default()),
        };
        assert_eq!(zero_entry.encode_to_vec(), vec![0x12, 0x00]);
        assert_eq!(ShortBook::decode(&[0x12, 0x00]).unwrap(), zero_entry);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_book_json_round_trip() {
        let book = LongBook {
            price: "10".to_string(),
            entry: Some(entry()),
        };
        let out = book.to_json();
        assert_eq!(out["entry"]["allocations"][0]["orderId"], json!(1));
        assert_eq!(LongBook::from_json(&out).unwrap(), book);
    }

    #[test]
    fn test_nested_partial() {
        let book = ShortBook::from_partial(ShortBookPartial {
            price: None,
            entry: Some(OrderEntryPartial {
                allocations: Some(vec![AllocationPartial {
                    order_id: Some(8),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
        });
        let entry = book.entry.unwrap_or_default();
        assert_eq!(entry.allocations.len(), 1);
        assert_eq!(entry.allocations[0].order_id, 8);
        assert_eq!(entry.allocations[0].account, "");
    }
}
