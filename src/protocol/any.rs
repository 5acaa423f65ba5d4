use serde_json::{json, Value};

use crate::core::json;
use crate::core::message::Message;
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::{CodecError, Result};

/// `google.protobuf.Any`: an encoded message tagged with its type URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnyPartial {
    pub type_url: Option<String>,
    pub value: Option<Vec<u8>>,
}

impl Any {
    /// Wrap `message` under its own type URL
    pub fn pack<M: Message>(message: &M) -> Self {
        Self {
            type_url: M::type_url(),
            value: message.encode_to_vec(),
        }
    }

    /// Decode the payload as `M`, checking the type URL first
    pub fn unpack<M: Message>(&self) -> Result<M> {
        let expected = M::type_url();
        if self.type_url != expected {
            return Err(CodecError::TypeMismatch {
                expected,
                found: self.type_url.clone(),
            });
        }
        M::decode(&self.value)
    }

    /// Whether the payload claims to be an `M`
    pub fn is<M: Message>(&self) -> bool {
        self.type_url == M::type_url()
    }
}

impl Message for Any {
    const TYPE_NAME: &'static str = "google.protobuf.Any";
    type Partial = AnyPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.type_url)
            .bytes_field(2, &self.value);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.type_url = reader.string()?,
            (2, WireType::LengthDelimited) => self.value = reader.bytes()?.to_vec(),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "typeUrl": self.type_url,
            "value": json::base64(&self.value),
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            type_url: json::string(object, "typeUrl")?,
            value: json::bytes(object, "value")?,
        })
    }

    fn from_partial(partial: AnyPartial) -> Self {
        Self {
            type_url: partial.type_url.unwrap_or_default(),
            value: partial.value.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cosmos::Coin;
    use crate::types::dex::Order;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_pack_unpack() {
        let coin = Coin {
            denom: "usei".to_string(),
            amount: "1".to_string(),
        };
        let any = Any::pack(&coin);
        assert_eq!(any.type_url, "/cosmos.base.v1beta1.Coin");
        assert!(any.is::<Coin>());
        assert_eq!(any.unpack::<Coin>().unwrap(), coin);
    }

    #[test]
    fn test_unpack_wrong_type() {
        let any = Any::pack(&Order::default());
        match any.unpack::<Coin>() {
            Err(CodecError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "/cosmos.base.v1beta1.Coin");
                assert_eq!(found, "/seiprotocol.seichain.dex.Order");
            }
            other => panic!("expected a type mismatch, got {other:?}"),
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_any_is_itself_a_message() {
        let any = Any::pack(&Order {
            id: 9,
            ..Order::default()
        });
        let bytes = any.encode_to_vec();
        assert_eq!(Any::decode(&bytes).unwrap(), any);
        assert_eq!(Any::from_json(&any.to_json()).unwrap(), any);
    }
}
