//! # Core Codec Components
//!
//! Wire primitives, the message traits, and stream framing.
//!
//! This module provides the foundation every schema type is built on: varints and tags,
//! bounds-checked reading, append-only writing, and the JSON coercion rules.
//!
//! ## Components
//! - **Wire**: varints, wire types, field keys
//! - **Reader / Writer**: cursor-based decode and encode of scalar and nested fields
//! - **Message / Enumeration**: the traits generated-style types implement
//! - **Json**: loose JSON field readers shared by `from_json` implementations
//! - **Codec**: Tokio codec for framing messages over byte streams
//!
//! ## Wire Format
//! ```text
//! [Key(varint) = field_number << 3 | wire_type] [Value] ...
//! ```
//!
//! ## Security
//! - Length prefixes are validated against the remaining input before use
//! - Nesting depth is capped (default 100)
//! - Maximum message and frame size: 16MB

pub mod codec;
pub mod json;
pub mod message;
pub mod numeric;
pub mod reader;
pub mod serialization;
pub mod wire;
pub mod writer;
