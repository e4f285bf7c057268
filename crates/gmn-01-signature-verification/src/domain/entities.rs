//! # Domain Entities

use super::errors::SignatureError;
use shared_types::Address;

/// Result of checking a signature against an expected signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the signature recovers to the expected signer
    pub valid: bool,
    /// The recovered address, when recovery itself succeeded
    pub recovered_address: Option<Address>,
    /// Error details (if verification failed)
    pub error: Option<SignatureError>,
}

impl VerificationResult {
    /// Create a successful verification result.
    pub fn valid(recovered_address: Address) -> Self {
        Self {
            valid: true,
            recovered_address: Some(recovered_address),
            error: None,
        }
    }

    /// Create a failed verification result.
    pub fn invalid(error: SignatureError) -> Self {
        let recovered_address = match &error {
            SignatureError::SignerMismatch { actual, .. } => Some(*actual),
            _ => None,
        };
        Self {
            valid: false,
            recovered_address,
            error: Some(error),
        }
    }

    /// True when recovery worked but produced a different address.
    pub fn is_mismatch(&self) -> bool {
        matches!(self.error, Some(SignatureError::SignerMismatch { .. }))
    }
}
