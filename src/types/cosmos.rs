//! Cosmos SDK base types: coins and query pagination.

use serde_json::{json, Value};

use crate::core::json;
use crate::core::message::Message;
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::Result;

/// Token amount in a single denomination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    /// Decimal integer text; never interpreted by the codec
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinPartial {
    pub denom: Option<String>,
    pub amount: Option<String>,
}

impl Message for Coin {
    const TYPE_NAME: &'static str = "cosmos.base.v1beta1.Coin";
    type Partial = CoinPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.denom)
            .string_field(2, &self.amount);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.denom = reader.string()?,
            (2, WireType::LengthDelimited) => self.amount = reader.string()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "denom": self.denom,
            "amount": self.amount,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            denom: json::string(object, "denom")?,
            amount: json::string(object, "amount")?,
        })
    }

    fn from_partial(partial: CoinPartial) -> Self {
        Self {
            denom: partial.denom.unwrap_or_default(),
            amount: partial.amount.unwrap_or_default(),
        }
    }
}

/// Pagination parameters for list queries
///
/// Only one of `key` or `offset` should be set. `key` is the opaque cursor returned as
/// `PageResponse::next_key` by the previous page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub key: Vec<u8>,
    pub offset: u64,
    pub limit: u64,
    pub count_total: bool,
    pub reverse: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequestPartial {
    pub key: Option<Vec<u8>>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub count_total: Option<bool>,
    pub reverse: Option<bool>,
}

impl Message for PageRequest {
    const TYPE_NAME: &'static str = "cosmos.base.query.v1beta1.PageRequest";
    type Partial = PageRequestPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .bytes_field(1, &self.key)
            .uint64_field(2, self.offset)
            .uint64_field(3, self.limit)
            .bool_field(4, self.count_total)
            .bool_field(5, self.reverse);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.key = reader.bytes()?.to_vec(),
            (2, WireType::Varint) => self.offset = reader.uint64()?,
            (3, WireType::Varint) => self.limit = reader.uint64()?,
            (4, WireType::Varint) => self.count_total = reader.bool()?,
            (5, WireType::Varint) => self.reverse = reader.bool()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "key": json::base64(&self.key),
            "offset": self.offset,
            "limit": self.limit,
            "countTotal": self.count_total,
            "reverse": self.reverse,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            key: json::bytes(object, "key")?,
            offset: json::uint64(object, "offset")?,
            limit: json::uint64(object, "limit")?,
            count_total: json::boolean(object, "countTotal"),
            reverse: json::boolean(object, "reverse"),
        })
    }

    fn from_partial(partial: PageRequestPartial) -> Self {
        Self {
            key: partial.key.unwrap_or_default(),
            offset: partial.offset.unwrap_or_default(),
            limit: partial.limit.unwrap_or_default(),
            count_total: partial.count_total.unwrap_or_default(),
            reverse: partial.reverse.unwrap_or_default(),
        }
    }
}

/// Pagination result returned alongside a page of items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResponse {
    /// Cursor for the next page; empty when there are no more results
    pub next_key: Vec<u8>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResponsePartial {
    pub next_key: Option<Vec<u8>>,
    pub total: Option<u64>,
}

impl Message for PageResponse {
    const TYPE_NAME: &'static str = "cosmos.base.query.v1beta1.PageResponse";
    type Partial = PageResponsePartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .bytes_field(1, &self.next_key)
            .uint64_field(2, self.total);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.next_key = reader.bytes()?.to_vec(),
            (2, WireType::Varint) => self.total = reader.uint64()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "nextKey": json::base64(&self.next_key),
            "total": self.total,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            next_key: json::bytes(object, "nextKey")?,
            total: json::uint64(object, "total")?,
        })
    }

    fn from_partial(partial: PageResponsePartial) -> Self {
        Self {
            next_key: partial.next_key.unwrap_or_default(),
            total: partial.total.unwrap_or_default(),
        }
    }
}
