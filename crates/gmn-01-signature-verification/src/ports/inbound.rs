//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::VerificationResult;
use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash, PersonalSignature};

/// Signature Verifier API.
///
/// Recovery is a pure function of `(message, signature)`; implementations
/// must be thread-safe (`Send + Sync`) and must not perform I/O.
pub trait SignatureVerifier: Send + Sync {
    /// Digest a wallet signs for `message` under `personal_sign`.
    fn hash_message(&self, message: &str) -> Hash;

    /// Recover the address that produced `signature` over `message`.
    ///
    /// # Errors
    /// Fails only on malformed signature encodings.
    fn recover_address(
        &self,
        message: &str,
        signature: &PersonalSignature,
    ) -> Result<Address, SignatureError>;

    /// Recover the signer and check it equals `expected`.
    fn verify_signer(
        &self,
        message: &str,
        signature: &PersonalSignature,
        expected: Address,
    ) -> VerificationResult;
}
