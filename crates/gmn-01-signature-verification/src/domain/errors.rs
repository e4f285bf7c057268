//! # Signature Errors

use shared_types::{Address, ParseError};
use thiserror::Error;

/// Errors that can occur while recovering a `personal_sign` signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature encoding is invalid (zero or out-of-range scalar, R not on the curve)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// The signature could not be decoded from its hex form
    #[error("Invalid signature encoding: {0}")]
    Encoding(#[from] ParseError),

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match expected signer
    #[error("Signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch { expected: Address, actual: Address },
}
