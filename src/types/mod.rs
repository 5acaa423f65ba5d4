//! # Schema Types
//!
//! Message and enum types for the chain's client surface, built on [`crate::core`].
//!
//! ## Packages
//! - **cosmos**: coins and query pagination
//! - **dex**: orders, cancellations, order books, settlements, match results, transactions
//! - **ibc**: connection ends and their counterparties
//!
//! Every message implements [`crate::Message`] and has a companion `XxxPartial` struct for
//! `from_partial`. Every enum implements [`crate::Enumeration`] and carries an
//! `Unrecognized` variant for values this build does not know.

/// Declare a protocol-buffer enum with its `Enumeration` impl.
///
/// Each variant lists its wire value and schema name. An `Unrecognized = -1` variant is
/// appended, and the zero-valued variant is the default.
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident = $full_name:literal {
            $( $(#[$variant_meta:meta])* $variant:ident = $value:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant = $value, )+
            /// Value outside the declared set
            Unrecognized = -1,
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::core::message::Enumeration>::from_wire(0)
            }
        }

        impl $crate::core::message::Enumeration for $name {
            const UNRECOGNIZED: Self = Self::Unrecognized;
            const NAME: &'static str = $full_name;

            fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn as_i32(self) -> i32 {
                self as i32
            }

            fn as_str_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                    Self::Unrecognized => "UNRECOGNIZED",
                }
            }

            fn from_str_name(name: &str) -> Option<Self> {
                match name {
                    $( $text => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::message::Enumeration::as_str_name(*self))
            }
        }
    };
}

pub mod cosmos;
pub mod dex;
pub mod ibc;
