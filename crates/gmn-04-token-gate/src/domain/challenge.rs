//! # Sign-In Challenges
//!
//! The message the wallet is asked to sign.

use parking_lot::Mutex;
use shared_bus::{NonceError, TimeBoundedNonceCache};
use shared_types::{Address, ChainId};
use std::time::Duration;
use uuid::Uuid;

/// Constant challenge used by the static policy.
pub const STATIC_CHALLENGE: &str = "GMN Verify";

/// How challenges are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengePolicy {
    /// Same text on every attempt. Replayable.
    Static(String),

    /// Fresh per attempt, bound to `domain`, the address, the chain and a
    /// single-use nonce that expires after `ttl`.
    Nonce { domain: String, ttl: Duration },
}

impl Default for ChallengePolicy {
    fn default() -> Self {
        Self::Static(STATIC_CHALLENGE.to_string())
    }
}

impl ChallengePolicy {
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

/// An issued challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Exact text handed to `personal_sign`.
    pub message: String,
    nonce: Option<Uuid>,
    issued_at: u64,
}

impl Challenge {
    pub fn nonce(&self) -> Option<Uuid> {
        self.nonce
    }

    pub fn issued_at(&self) -> u64 {
        self.issued_at
    }
}

/// Issues and redeems challenges under one policy.
pub struct ChallengeIssuer {
    policy: ChallengePolicy,
    nonces: Mutex<TimeBoundedNonceCache>,
}

impl ChallengeIssuer {
    pub fn new(policy: ChallengePolicy) -> Self {
        let window = match &policy {
            ChallengePolicy::Nonce { ttl, .. } => ttl.as_secs().max(1),
            ChallengePolicy::Static(_) => TimeBoundedNonceCache::DEFAULT_VALIDITY_WINDOW,
        };
        Self {
            policy,
            nonces: Mutex::new(TimeBoundedNonceCache::with_config(
                window,
                TimeBoundedNonceCache::DEFAULT_GC_INTERVAL,
            )),
        }
    }

    pub fn policy(&self) -> &ChallengePolicy {
        &self.policy
    }

    /// Build the challenge for `address` on `chain_id`.
    pub fn issue(&self, address: Address, chain_id: ChainId) -> Challenge {
        match &self.policy {
            ChallengePolicy::Static(text) => Challenge {
                message: text.clone(),
                nonce: None,
                issued_at: TimeBoundedNonceCache::current_timestamp(),
            },
            ChallengePolicy::Nonce { domain, .. } => {
                let (nonce, issued_at) = self.nonces.lock().issue();
                Challenge {
                    message: nonce_message(domain, address, chain_id, nonce, issued_at),
                    nonce: Some(nonce),
                    issued_at,
                }
            }
        }
    }

    /// Spend the challenge's nonce. Static challenges always redeem.
    ///
    /// # Errors
    /// Replayed, unknown or expired nonces.
    pub fn redeem(&self, challenge: &Challenge) -> Result<(), NonceError> {
        match challenge.nonce {
            Some(nonce) => self.nonces.lock().consume(nonce, challenge.issued_at),
            None => Ok(()),
        }
    }
}

fn nonce_message(
    domain: &str,
    address: Address,
    chain_id: ChainId,
    nonce: Uuid,
    issued_at: u64,
) -> String {
    format!(
        "{domain} wants you to sign in with your wallet:\n{address}\n\n\
         Sign in to view gated content.\n\n\
         Chain ID: {chain_id}\nNonce: {}\nIssued At: {issued_at}",
        nonce.simple()
    )
}
