//! # proto-wire
//!
//! Stateless protocol-buffer wire codec with typed messages, a loose JSON mapping and
//! length-delimited stream framing.
//!
//! This crate contains:
//! - Wire primitives (varints, tags, bounded reader, writer)
//! - The `Message` and `Enumeration` traits and their JSON coercion rules
//! - Schema types for the dex, cosmos and IBC packages
//! - `Any` envelopes and a type registry
//! - Tokio framing, configuration and logging setup
//!
//! ## Quick Start
//! ```rust
//! use proto_wire::types::dex::{Order, OrderType};
//! use proto_wire::Message;
//!
//! let order = Order {
//!     id: 1,
//!     price: "10".into(),
//!     order_type: OrderType::Market,
//!     ..Default::default()
//! };
//! let bytes = order.encode_to_vec();
//! assert_eq!(Order::decode(&bytes).unwrap(), order);
//! assert_eq!(order.to_json()["orderType"], "MARKET");
//! ```
//!
//! ## Guarantees
//! Every operation is a pure function of its input. Unknown fields are skipped and unknown
//! enum values become `Unrecognized`, so readers keep working against newer writers. Only
//! malformed bytes, out-of-range 64-bit values and size limits produce decode errors.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::CodecConfig;
pub use crate::core::codec::MessageCodec;
pub use crate::core::message::{Enumeration, Message};
pub use crate::core::reader::{DecodeOptions, Reader};
pub use crate::core::serialization::{MultiFormat, SerializationFormat};
pub use crate::core::writer::Writer;
pub use error::{CodecError, Result};
pub use protocol::{Any, TypeRegistry};
