use crate::core::message::Message;
use crate::error::{constants, CodecError, Result};
use crate::protocol::any::Any;
use crate::types::{cosmos, dex, ibc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

type DecodeFn = dyn Fn(&[u8]) -> Result<Value> + Send + Sync + 'static;

/// Type URL to decoder map for `Any` payloads.
/// Clones share the same table, so a registry built at startup can be handed to every task.
#[derive(Clone)]
pub struct TypeRegistry {
    decoders: Arc<RwLock<HashMap<String, Box<DecodeFn>>>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("type_urls", &self.type_urls().unwrap_or_default())
            .finish()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            decoders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry preloaded with every schema type in this crate
    pub fn with_defaults() -> Result<Self> {
        let registry = Self::new();
        registry.register::<Any>()?;

        registry.register::<cosmos::Coin>()?;
        registry.register::<cosmos::PageRequest>()?;
        registry.register::<cosmos::PageResponse>()?;

        registry.register::<dex::Order>()?;
        registry.register::<dex::Cancellation>()?;
        registry.register::<dex::ActiveOrders>()?;
        registry.register::<dex::Allocation>()?;
        registry.register::<dex::OrderEntry>()?;
        registry.register::<dex::LongBook>()?;
        registry.register::<dex::ShortBook>()?;
        registry.register::<dex::SettlementEntry>()?;
        registry.register::<dex::Settlements>()?;
        registry.register::<dex::MatchResult>()?;
        registry.register::<dex::MsgPlaceOrders>()?;
        registry.register::<dex::MsgPlaceOrdersResponse>()?;
        registry.register::<dex::MsgCancelOrders>()?;
        registry.register::<dex::MsgCancelOrdersResponse>()?;

        registry.register::<ibc::MerklePrefix>()?;
        registry.register::<ibc::Counterparty>()?;
        registry.register::<ibc::Version>()?;
        registry.register::<ibc::ConnectionEnd>()?;

        Ok(registry)
    }

    /// Register `M` under its type URL, replacing any earlier entry
    pub fn register<M: Message + 'static>(&self) -> Result<()> {
        let mut decoders = self
            .decoders
            .write()
            .map_err(|_| CodecError::Custom(constants::ERR_REGISTRY_WRITE_LOCK.to_string()))?;

        let url = M::type_url();
        trace!(type_url = %url, "Registering message type");
        decoders.insert(
            url,
            Box::new(|bytes: &[u8]| M::decode(bytes).map(|message| message.to_json())),
        );
        Ok(())
    }

    pub fn contains(&self, type_url: &str) -> Result<bool> {
        let decoders = self
            .decoders
            .read()
            .map_err(|_| CodecError::Custom(constants::ERR_REGISTRY_READ_LOCK.to_string()))?;
        Ok(decoders.contains_key(type_url))
    }

    /// Registered type URLs, sorted
    pub fn type_urls(&self) -> Result<Vec<String>> {
        let decoders = self
            .decoders
            .read()
            .map_err(|_| CodecError::Custom(constants::ERR_REGISTRY_READ_LOCK.to_string()))?;
        let mut urls: Vec<String> = decoders.keys().cloned().collect();
        urls.sort();
        Ok(urls)
    }

    /// Decode an `Any` payload to JSON, tagged with an `"@type"` key
    pub fn decode_to_json(&self, any: &Any) -> Result<Value> {
        let decoders = self
            .decoders
            .read()
            .map_err(|_| CodecError::Custom(constants::ERR_REGISTRY_READ_LOCK.to_string()))?;

        let decode = decoders.get(any.type_url.as_str()).ok_or_else(|| {
            debug!(type_url = %any.type_url, "No decoder registered");
            CodecError::UnknownType(any.type_url.clone())
        })?;

        let mut value = decode(&any.value)?;
        if let Value::Object(map) = &mut value {
            map.insert("@type".to_string(), Value::String(any.type_url.clone()));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_decode_registered_type() {
        let registry = TypeRegistry::new();
        registry.register::<cosmos::Coin>().unwrap();

        let any = Any::pack(&cosmos::Coin {
            denom: "usei".to_string(),
            amount: "7".to_string(),
        });
        let value = registry.decode_to_json(&any).unwrap();
        assert_eq!(
            value,
            json!({
                "@type": "/cosmos.base.v1beta1.Coin",
                "denom": "usei",
                "amount": "7",
            })
        );
    }

    #[test]
    fn test_unknown_type_url() {
        let registry = TypeRegistry::new();
        let any = Any {
            type_url: "/nope.Missing".to_string(),
            value: Vec::new(),
        };
        assert!(matches!(
            registry.decode_to_json(&any),
            Err(CodecError::UnknownType(url)) if url == "/nope.Missing"
        ));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_defaults_cover_schema() {
        let registry = TypeRegistry::with_defaults().unwrap();
        assert!(registry.contains("/seiprotocol.seichain.dex.MsgPlaceOrders").unwrap());
        assert!(registry.contains("/ibc.core.connection.v1.ConnectionEnd").unwrap());
        assert!(!registry.contains("/seiprotocol.seichain.dex.Unknown").unwrap());

        let urls = registry.type_urls().unwrap();
        assert_eq!(urls.len(), 22);
        assert!(urls.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let registry = TypeRegistry::new();
        registry.register::<dex::Order>().ok();
        let any = Any {
            type_url: dex::Order::type_url(),
            value: vec![0x0a, 0x05, b'a'],
        };
        assert!(registry.decode_to_json(&any).is_err());
    }
}
