//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::WalletError;
use async_trait::async_trait;
use shared_types::{Address, ChainId, PersonalSignature};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A connected signing identity.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address the wallet signs with.
    fn address(&self) -> Address;

    /// Chain the wallet was connected on.
    fn chain_id(&self) -> ChainId;

    /// `personal_sign` over the UTF-8 bytes of `message`.
    ///
    /// # Errors
    /// `WalletError::Rejected` when the user declines.
    async fn sign_message(&self, message: &str) -> Result<PersonalSignature, WalletError>;

    /// Short provider name for logs.
    fn kind(&self) -> &'static str {
        "wallet"
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scriptable signer.
#[derive(Default)]
pub struct MockWallet {
    /// Address reported by `address()`.
    pub address: Address,
    pub chain_id: ChainId,
    /// Signature returned by `sign_message`.
    pub signature: Option<PersonalSignature>,
    /// Decline every signature request.
    pub reject: bool,
    /// Wait this long before answering a signature request.
    pub delay: Option<Duration>,
    sign_calls: AtomicUsize,
}

impl MockWallet {
    /// Wallet that claims `address` and answers with `signature`.
    pub fn new(address: Address, signature: PersonalSignature) -> Self {
        Self {
            address,
            chain_id: 137,
            signature: Some(signature),
            ..Self::default()
        }
    }

    /// Wallet whose user declines every request.
    pub fn rejecting(address: Address) -> Self {
        Self {
            address,
            chain_id: 137,
            reject: true,
            ..Self::default()
        }
    }

    /// Answer only after `delay`, as a user reading the prompt would.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of signature requests received.
    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn sign_message(&self, _message: &str) -> Result<PersonalSignature, WalletError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject {
            return Err(WalletError::Rejected(
                "User denied message signature".to_string(),
            ));
        }
        self.signature
            .ok_or_else(|| WalletError::Provider("Mock has no signature".to_string()))
    }

    fn kind(&self) -> &'static str {
        "mock"
    }
}
