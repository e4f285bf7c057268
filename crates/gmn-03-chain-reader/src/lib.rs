//! # Chain Reader Subsystem (GMN-03)
//!
//! Everything the token gate needs from an EVM node:
//!
//! - `balanceOf(owner)` on the gating ERC-20 (the Token Balance Reader)
//! - chain id, gas price and native balance for the account overview
//! - the `mint` transaction on the gating contract, with receipt polling
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): ABI encoding, network check, receipts
//! - **Ports Layer** (`ports/`): `TokenBalanceReader` (driving), `EthRpc` (driven)
//! - **Adapters** (`adapters/`): `RpcClient`, JSON-RPC 2.0 over HTTP
//! - **Service Layer** (`service.rs`): balance reader, mint service, account overview

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::rpc_client::RpcClient;
pub use domain::abi;
pub use domain::entities::{
    AccountOverview, NetworkCheck, NetworkStatus, ReceiptPolling, TransactionReceipt,
    TransactionRequest, TransactionUpdate, TxHash,
};
pub use domain::errors::ChainError;
pub use ports::inbound::{MockBalanceReader, TokenBalanceReader};
pub use ports::outbound::{EthRpc, MockEthRpc};
pub use service::{ChainService, Erc20BalanceReader, MintService};
