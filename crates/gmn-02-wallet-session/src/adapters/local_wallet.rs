//! # Local Wallet (secp256k1)
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2)
//! - Key material zeroized on drop

use crate::domain::errors::WalletError;
use crate::ports::inbound::WalletSigner;
use async_trait::async_trait;
use gmn_01_signature_verification::{
    address_from_pubkey, hash_personal_message, signature_from_parts,
};
use k256::ecdsa::SigningKey;
use shared_types::{decode_hex, Address, ChainId, PersonalSignature};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// Wallet backed by a private key in process memory.
pub struct LocalWallet {
    signing_key: SigningKey,
    address: Address,
    chain_id: ChainId,
}

impl LocalWallet {
    /// Wrap an existing key.
    pub fn from_signing_key(signing_key: SigningKey, chain_id: ChainId) -> Self {
        let address = address_from_pubkey(signing_key.verifying_key());
        Self {
            signing_key,
            address,
            chain_id,
        }
    }

    /// Parse a 32-byte hex private key (with or without `0x`).
    pub fn from_hex(private_key: &str, chain_id: ChainId) -> Result<Self, WalletError> {
        let bytes = Zeroizing::new(
            decode_hex(private_key).map_err(|e| WalletError::InvalidKey(e.to_string()))?,
        );
        if bytes.len() != 32 {
            return Err(WalletError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(&bytes)
            .map_err(|_| WalletError::InvalidKey("scalar out of range".to_string()))?;
        Ok(Self::from_signing_key(signing_key, chain_id))
    }

    /// Fresh random key.
    pub fn random(chain_id: ChainId) -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::thread_rng()), chain_id)
    }

    /// Sign synchronously; the async trait method wraps this.
    pub fn sign_sync(&self, message: &str) -> Result<PersonalSignature, WalletError> {
        let digest = hash_personal_message(message.as_bytes());
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| WalletError::Provider(e.to_string()))?;

        let mut rs = [0u8; 64];
        rs.copy_from_slice(&sig.to_bytes());
        Ok(signature_from_parts(&rs, recid.to_byte()))
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for LocalWallet {
    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn sign_message(&self, message: &str) -> Result<PersonalSignature, WalletError> {
        debug!(signer = %self.address, len = message.len(), "Signing personal message");
        self.sign_sync(message)
    }

    fn kind(&self) -> &'static str {
        "local"
    }
}
