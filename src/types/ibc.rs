//! # IBC Connection Types
//!
//! Connection ends as returned by the `ibc.core.connection.v1` queries.
//!
//! A connection is negotiated by two chains, each keeping one [`ConnectionEnd`] that
//! points at the other side through its [`Counterparty`].

use serde_json::{json, Value};

use crate::core::json;
use crate::core::message::{Enumeration, Message};
use crate::core::reader::Reader;
use crate::core::wire::{Tag, WireType};
use crate::core::writer::Writer;
use crate::error::Result;

proto_enum! {
    /// Handshake state of a connection end
    pub enum State = "ibc.core.connection.v1.State" {
        /// Default state, not a valid connection state
        UninitializedUnspecified = 0 => "STATE_UNINITIALIZED_UNSPECIFIED",
        /// Chain A is in `Init` after `OpenInit`
        Init = 1 => "STATE_INIT",
        /// Chain B is in `TryOpen` after `OpenTry`
        TryOpen = 2 => "STATE_TRYOPEN",
        /// Handshake complete
        Open = 3 => "STATE_OPEN",
    }
}

/// Store prefix under which the counterparty keeps its commitments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerklePrefix {
    pub key_prefix: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerklePrefixPartial {
    pub key_prefix: Option<Vec<u8>>,
}

impl Message for MerklePrefix {
    const TYPE_NAME: &'static str = "ibc.core.commitment.v1.MerklePrefix";
    type Partial = MerklePrefixPartial;

    fn encode(&self, writer: &mut Writer) {
        writer.bytes_field(1, &self.key_prefix);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.key_prefix = reader.bytes()?.to_vec(),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({ "keyPrefix": json::base64(&self.key_prefix) })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            key_prefix: json::bytes(object, "keyPrefix")?,
        })
    }

    fn from_partial(partial: MerklePrefixPartial) -> Self {
        Self {
            key_prefix: partial.key_prefix.unwrap_or_default(),
        }
    }
}

/// The other chain's side of a connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counterparty {
    pub client_id: String,
    /// Empty until the counterparty has answered the handshake
    pub connection_id: String,
    pub prefix: Option<MerklePrefix>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterpartyPartial {
    pub client_id: Option<String>,
    pub connection_id: Option<String>,
    pub prefix: Option<MerklePrefixPartial>,
}

impl Message for Counterparty {
    const TYPE_NAME: &'static str = "ibc.core.connection.v1.Counterparty";
    type Partial = CounterpartyPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.client_id)
            .string_field(2, &self.connection_id)
            .message_field(3, self.prefix.as_ref());
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.client_id = reader.string()?,
            (2, WireType::LengthDelimited) => self.connection_id = reader.string()?,
            (3, WireType::LengthDelimited) => self.prefix = Some(reader.message()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let mut out = json!({
            "clientId": self.client_id,
            "connectionId": self.connection_id,
        });
        if let Some(prefix) = &self.prefix {
            out["prefix"] = prefix.to_json();
        }
        out
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            client_id: json::string(object, "clientId")?,
            connection_id: json::string(object, "connectionId")?,
            prefix: json::message(object, "prefix")?,
        })
    }

    fn from_partial(partial: CounterpartyPartial) -> Self {
        Self {
            client_id: partial.client_id.unwrap_or_default(),
            connection_id: partial.connection_id.unwrap_or_default(),
            prefix: partial.prefix.map(MerklePrefix::from_partial),
        }
    }
}

/// IBC version negotiated during the connection handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Version {
    pub identifier: String,
    /// Features compatible with `identifier`, e.g. `ORDER_ORDERED`
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPartial {
    pub identifier: Option<String>,
    pub features: Option<Vec<String>>,
}

impl Message for Version {
    const TYPE_NAME: &'static str = "ibc.core.connection.v1.Version";
    type Partial = VersionPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.identifier)
            .repeated_strings(2, &self.features);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        match (tag.field_number, tag.wire_type) {
            (1, WireType::LengthDelimited) => self.identifier = reader.string()?,
            (2, WireType::LengthDelimited) => self.features.push(reader.string()?),
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "identifier": self.identifier,
            "features": self.features,
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            identifier: json::string(object, "identifier")?,
            features: json::repeated_string(object, "features")?,
        })
    }

    fn from_partial(partial: VersionPartial) -> Self {
        Self {
            identifier: partial.identifier.unwrap_or_default(),
            features: partial.features.unwrap_or_default(),
        }
    }
}

/// One chain's view of a connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionEnd {
    pub client_id: String,
    pub versions: Vec<Version>,
    pub state: State,
    pub counterparty: Option<Counterparty>,
    /// Delay, in nanoseconds, before a packet commitment may be proven
    pub delay_period: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionEndPartial {
    pub client_id: Option<String>,
    pub versions: Option<Vec<VersionPartial>>,
    pub state: Option<State>,
    pub counterparty: Option<CounterpartyPartial>,
    pub delay_period: Option<u64>,
}

impl Message for ConnectionEnd {
    const TYPE_NAME: &'static str = "ibc.core.connection.v1.ConnectionEnd";
    type Partial = ConnectionEndPartial;

    fn encode(&self, writer: &mut Writer) {
        writer
            .string_field(1, &self.client_id)
            .repeated_messages(2, &self.versions)
            .enum_field(3, self.state)
            .message_field(4, self.counterparty.as_ref())
            .uint64_field(5, self.delay_period);
    }

    fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
        use WireType::{LengthDelimited, Varint};

        match (tag.field_number, tag.wire_type) {
            (1, LengthDelimited) => self.client_id = reader.string()?,
            (2, LengthDelimited) => self.versions.push(reader.message()?),
            (3, Varint) => self.state = reader.enumeration()?,
            (4, LengthDelimited) => self.counterparty = Some(reader.message()?),
            (5, Varint) => self.delay_period = reader.uint64()?,
            _ => reader.skip_field(tag)?,
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let mut out = json!({
            "clientId": self.client_id,
            "versions": self.versions.iter().map(Message::to_json).collect::<Vec<_>>(),
            "state": self.state.to_json_value(),
            "delayPeriod": self.delay_period,
        });
        if let Some(counterparty) = &self.counterparty {
            out["counterparty"] = counterparty.to_json();
        }
        out
    }

    fn from_json(value: &Value) -> Result<Self> {
        let object = json::object(value, Self::TYPE_NAME)?;
        Ok(Self {
            client_id: json::string(object, "clientId")?,
            versions: json::repeated_message(object, "versions")?,
            state: json::enumeration(object, "state"),
            counterparty: json::message(object, "counterparty")?,
            delay_period: json::uint64(object, "delayPeriod")?,
        })
    }

    fn from_partial(partial: ConnectionEndPartial) -> Self {
        Self {
            client_id: partial.client_id.unwrap_or_default(),
            versions: partial
                .versions
                .unwrap_or_default()
                .into_iter()
                .map(Version::from_partial)
                .collect(),
            state: partial.state.unwrap_or_default(),
            counterparty: partial.counterparty.map(Counterparty::from_partial),
            delay_period: partial.delay_period.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> ConnectionEnd {
        ConnectionEnd {
            client_id: "07-tendermint-0".to_string(),
            versions: vec![Version {
                identifier: "1".to_string(),
                features: vec!["ORDER_ORDERED".to_string(), "ORDER_UNORDERED".to_string()],
            }],
            state: State::Open,
            counterparty: Some(Counterparty {
                client_id: "07-tendermint-5".to_string(),
                connection_id: "connection-3".to_string(),
                prefix: Some(MerklePrefix {
                    key_prefix: b"ibc".to_vec(),
                }),
            }),
            delay_period: 0,
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_connection_end_round_trip() {
        let conn = connection();
        let bytes = conn.encode_to_vec();
        assert_eq!(bytes[..2], [0x0a, 0x0f]);
        assert_eq!(&bytes[2..17], b"07-tendermint-0");
        assert_eq!(ConnectionEnd::decode(&bytes).unwrap(), conn);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_connection_end_json() {
        let out = connection().to_json();
        assert_eq!(out["state"], json!("STATE_OPEN"));
        assert_eq!(out["counterparty"]["prefix"]["keyPrefix"], json!("aWJj"));
        assert_eq!(out["versions"][0]["features"][1], json!("ORDER_UNORDERED"));
        assert_eq!(out["delayPeriod"], json!(0));
        assert_eq!(ConnectionEnd::from_json(&out).unwrap(), connection());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_absent_counterparty_stays_none() {
        let conn = ConnectionEnd::from_json(&json!({ "clientId": "x", "counterparty": null })).unwrap();
        assert!(conn.counterparty.is_none());
        assert!(conn.to_json().get("counterparty").is_none());
        assert_eq!(conn.state, State::UninitializedUnspecified);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_unknown_state_is_unrecognized() {
        // field 3 = 9
        let conn = ConnectionEnd::decode(&[0x18, 0x09]).unwrap();
        assert_eq!(conn.state, State::Unrecognized);
        assert_eq!(conn.to_json()["state"], json!("UNRECOGNIZED"));
    }

    #[test]
    fn test_partial_nested() {
        let conn = ConnectionEnd::from_partial(ConnectionEndPartial {
            counterparty: Some(CounterpartyPartial {
                connection_id: Some("connection-0".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let counterparty = conn.counterparty.unwrap_or_default();
        assert_eq!(counterparty.connection_id, "connection-0");
        assert!(counterparty.prefix.is_none());
        assert!(conn.versions.is_empty());
    }
}
