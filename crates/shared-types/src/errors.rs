//! # Error Types
//!
//! Parse errors for the shared value types.

use thiserror::Error;

/// Errors raised while decoding hex-encoded values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length is wrong for the target type.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Recovery byte is not one of 0, 1, 27 or 28.
    #[error("Invalid recovery byte: {0}")]
    InvalidRecoveryByte(u8),

    /// Quantity string is not a valid `0x`-prefixed number.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}
