//! # Signature Verification Subsystem (GMN-01)
//!
//! Recovers the signer of a wallet `personal_sign` message.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): EIP-191 hashing and secp256k1 recovery, no I/O
//! - **Ports Layer** (`ports/`): the `SignatureVerifier` driving port
//! - **Service Layer** (`service.rs`): `PersonalSignVerifier`, the default implementation
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Scalar Range**: R and S must be in `[1, n-1]`, R must be an x-coordinate on the curve
//! - Recovery is pure and deterministic; it fails only on malformed encodings

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::eip191::{
    address_from_pubkey, hash_personal_message, keccak256, recover_address, signature_from_parts,
    verify_signer, PERSONAL_MESSAGE_PREFIX,
};
pub use domain::entities::VerificationResult;
pub use domain::errors::SignatureError;
pub use ports::inbound::SignatureVerifier;
pub use service::PersonalSignVerifier;
