//! # Signature Verification Service
//!
//! Implements the `SignatureVerifier` port by delegating to the EIP-191
//! domain functions.

use crate::domain::eip191;
use crate::domain::entities::VerificationResult;
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureVerifier;
use shared_types::{Address, Hash, PersonalSignature};
use tracing::debug;

/// Default `personal_sign` verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalSignVerifier;

impl PersonalSignVerifier {
    /// Create a new verifier.
    pub fn new() -> Self {
        Self
    }

    /// Recover from a hex-encoded signature as returned by wallets.
    pub fn recover_hex(&self, message: &str, signature: &str) -> Result<Address, SignatureError> {
        let signature: PersonalSignature = signature.parse()?;
        self.recover_address(message, &signature)
    }
}

impl SignatureVerifier for PersonalSignVerifier {
    fn hash_message(&self, message: &str) -> Hash {
        eip191::hash_personal_message(message.as_bytes())
    }

    fn recover_address(
        &self,
        message: &str,
        signature: &PersonalSignature,
    ) -> Result<Address, SignatureError> {
        eip191::recover_address(message.as_bytes(), signature)
    }

    fn verify_signer(
        &self,
        message: &str,
        signature: &PersonalSignature,
        expected: Address,
    ) -> VerificationResult {
        let result = eip191::verify_signer(message.as_bytes(), signature, expected);
        if !result.valid {
            debug!(
                expected = %expected,
                recovered = ?result.recovered_address,
                error = ?result.error,
                "Signature does not recover to expected signer"
            );
        }
        result
    }
}
