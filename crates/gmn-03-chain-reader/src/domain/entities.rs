//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{format_units, Address, ChainId, Network, U256};
use std::fmt;
use std::time::Duration;

/// `0x`-prefixed transaction hash as returned by the node.
pub type TxHash = String;

// =============================================================================
// NETWORK CHECK
// =============================================================================

/// Outcome of comparing the wallet's chain with the target network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// Wallet is on the target network.
    Match,
    /// Wallet is on another chain.
    WrongNetwork { expected: ChainId, actual: ChainId },
}

impl NetworkStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, NetworkStatus::Match)
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkStatus::Match => f.write_str("connected to the expected network"),
            NetworkStatus::WrongNetwork { expected, actual } => {
                let expected_name = Network::by_chain_id(*expected).map_or("unknown", |n| n.name);
                let actual_name = Network::by_chain_id(*actual).map_or("unknown", |n| n.name);
                write!(
                    f,
                    "wrong network: you are on {actual_name} ({actual}), switch to {expected_name} ({expected})"
                )
            }
        }
    }
}

/// Compares chain ids against the configured target network.
#[derive(Debug, Clone, Copy)]
pub struct NetworkCheck {
    target: &'static Network,
}

impl NetworkCheck {
    pub fn new(target: &'static Network) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'static Network {
        self.target
    }

    pub fn check(&self, actual: ChainId) -> NetworkStatus {
        if actual == self.target.chain_id {
            NetworkStatus::Match
        } else {
            NetworkStatus::WrongNetwork {
                expected: self.target.chain_id,
                actual,
            }
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Transaction for `eth_sendTransaction`; the node or wallet fills gas and nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
}

/// The parts of a receipt the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// `status == 1`
    pub success: bool,
}

/// Progress of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionUpdate {
    Submitted { tx_hash: TxHash },
    Confirmed { tx_hash: TxHash, block_number: u64 },
    Failed { tx_hash: TxHash, reason: String },
}

/// Receipt polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolling {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}

// =============================================================================
// ACCOUNT OVERVIEW
// =============================================================================

/// What the header of the app shows for the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOverview {
    pub address: Address,
    pub network: &'static Network,
    pub status: NetworkStatus,
    pub block_number: u64,
    /// Native balance in wei.
    pub native_balance: U256,
    /// Gas price in wei.
    pub gas_price: U256,
    /// Gating token balance in base units.
    pub token_balance: U256,
}

impl fmt::Display for AccountOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "account:  {}", self.address)?;
        writeln!(f, "network:  {} ({})", self.network.name, self.status)?;
        writeln!(f, "block:    {}", self.block_number)?;
        writeln!(
            f,
            "balance:  {} {}",
            format_units(self.native_balance, 18),
            self.network.native_symbol
        )?;
        writeln!(f, "gas:      {} gwei", format_units(self.gas_price, 9))?;
        write!(f, "tokens:   {}", self.token_balance)
    }
}
