//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::ChainError;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, U256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Token Balance Reader.
///
/// Read-only `balanceOf` against a chain node. May fail on network or
/// node errors, or when the call reverts.
#[async_trait]
pub trait TokenBalanceReader: Send + Sync {
    /// Balance of `owner` on the ERC-20 at `token`, in base units.
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory balance table.
#[derive(Default)]
pub struct MockBalanceReader {
    /// Balance per owner; missing owners hold zero.
    pub balances: Mutex<HashMap<Address, U256>>,
    /// Fail every query with a connection error.
    pub should_fail: bool,
    calls: AtomicUsize,
}

impl MockBalanceReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader where `owner` holds `amount`.
    pub fn with_balance(owner: Address, amount: u64) -> Self {
        let reader = Self::default();
        reader.set_balance(owner, amount);
        reader
    }

    /// Reader whose every query fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn set_balance(&self, owner: Address, amount: u64) {
        self.balances.lock().insert(owner, U256::from(amount));
    }

    /// Number of `balance_of` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenBalanceReader for MockBalanceReader {
    async fn balance_of(&self, _token: Address, owner: Address) -> Result<U256, ChainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(ChainError::Connection("Mock failure".to_string()));
        }
        Ok(self
            .balances
            .lock()
            .get(&owner)
            .copied()
            .unwrap_or_default())
    }
}
