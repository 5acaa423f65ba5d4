//! Safe-integer conversion for 64-bit wire values.
//!
//! JSON consumers of these messages hold numbers as IEEE doubles, which represent every
//! integer exactly only up to 2^53 - 1. Values past that bound are rejected rather than
//! silently rounded.

use crate::error::{CodecError, Result};

/// Largest integer a double represents exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Smallest integer a double represents exactly (-(2^53 - 1))
pub const MIN_SAFE_INTEGER: i64 = -((1 << 53) - 1);

/// Check an unsigned 64-bit value against the safe domain
#[inline]
pub fn safe_u64(value: u64) -> Result<u64> {
    if value > MAX_SAFE_INTEGER {
        return Err(CodecError::ValueOutOfRange(i128::from(value)));
    }
    Ok(value)
}

/// Check a signed 64-bit value against the safe domain
#[inline]
pub fn safe_i64(value: i64) -> Result<i64> {
    if !(MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER as i64).contains(&value) {
        return Err(CodecError::ValueOutOfRange(i128::from(value)));
    }
    Ok(value)
}
