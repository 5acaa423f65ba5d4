//! # Utility Modules
//!
//! Supporting utilities shared by applications embedding the codec.
//!
//! ## Components
//! - **Logging**: Structured logging configuration

pub mod logging;

pub use logging::init_logging;
