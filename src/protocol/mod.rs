//! # Protocol Layer
//!
//! Type-erased messages: the `Any` envelope and a registry that decodes it by type URL.
//!
//! A transaction carries its messages as `Any` values. A transport that only sees the
//! envelope can still render the payload through [`TypeRegistry::decode_to_json`] once the
//! type has been registered.
//!
//! ```rust
//! use proto_wire::protocol::{Any, TypeRegistry};
//! use proto_wire::types::dex::MsgCancelOrders;
//!
//! let registry = TypeRegistry::with_defaults().unwrap();
//! let any = Any::pack(&MsgCancelOrders {
//!     creator: "sei1creator".into(),
//!     ..Default::default()
//! });
//! let value = registry.decode_to_json(&any).unwrap();
//! assert_eq!(value["@type"], "/seiprotocol.seichain.dex.MsgCancelOrders");
//! assert_eq!(value["creator"], "sei1creator");
//! ```

pub mod any;
pub mod registry;

pub use any::{Any, AnyPartial};
pub use registry::TypeRegistry;
