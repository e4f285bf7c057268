//! # Chain Reader Services
//!
//! - [`Erc20BalanceReader`]: the `TokenBalanceReader` used by the token gate
//! - [`MintService`]: buys one gating token (`mint(1)` paying `cost()`)
//! - [`ChainService`]: network check and account overview

use crate::domain::abi;
use crate::domain::entities::{
    AccountOverview, NetworkCheck, NetworkStatus, ReceiptPolling, TransactionReceipt,
    TransactionRequest, TransactionUpdate, TxHash,
};
use crate::domain::errors::ChainError;
use crate::ports::inbound::TokenBalanceReader;
use crate::ports::outbound::EthRpc;
use async_trait::async_trait;
use shared_types::{Address, U256};
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// BALANCE READER
// =============================================================================

/// `balanceOf` over any [`EthRpc`].
pub struct Erc20BalanceReader<R: EthRpc> {
    rpc: Arc<R>,
}

impl<R: EthRpc> Erc20BalanceReader<R> {
    pub fn new(rpc: Arc<R>) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl<R: EthRpc> TokenBalanceReader for Erc20BalanceReader<R> {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        let data = self.rpc.call(token, abi::balance_of_call(&owner)).await?;
        let balance = abi::decode_uint(&data)?;
        debug!(token = %token, owner = %owner, %balance, "balanceOf");
        Ok(balance)
    }
}

// =============================================================================
// MINT
// =============================================================================

/// Buys gating tokens from the gating contract.
pub struct MintService<R: EthRpc> {
    rpc: Arc<R>,
    contract: Address,
    polling: ReceiptPolling,
}

impl<R: EthRpc> MintService<R> {
    pub fn new(rpc: Arc<R>, contract: Address) -> Self {
        Self::with_polling(rpc, contract, ReceiptPolling::default())
    }

    pub fn with_polling(rpc: Arc<R>, contract: Address, polling: ReceiptPolling) -> Self {
        Self {
            rpc,
            contract,
            polling,
        }
    }

    /// Current price of one token, in wei.
    pub async fn cost(&self) -> Result<U256, ChainError> {
        let data = self
            .rpc
            .call(self.contract, abi::encode_call(abi::COST, &[]))
            .await?;
        abi::decode_uint(&data)
    }

    /// Send `mint(quantity)` from `from`, paying `cost() * quantity`.
    pub async fn mint(&self, from: Address, quantity: u64) -> Result<TxHash, ChainError> {
        let cost = self.cost().await?;
        let amount = U256::from(quantity);
        let value = cost
            .checked_mul(amount)
            .ok_or_else(|| ChainError::MalformedReturn("mint value overflows".to_string()))?;

        let tx = TransactionRequest {
            from,
            to: self.contract,
            value,
            data: abi::encode_call(abi::MINT, &[abi::encode_uint(amount)]),
        };

        let tx_hash = self.rpc.send_transaction(&tx).await?;
        info!(tx_hash = %tx_hash, from = %from, quantity, %value, "Mint submitted");
        Ok(tx_hash)
    }

    /// Poll for a receipt until it appears or the budget runs out.
    pub async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt, ChainError> {
        for attempt in 1..=self.polling.max_attempts {
            if let Some(receipt) = self.rpc.transaction_receipt(tx_hash).await? {
                debug!(tx_hash, attempt, block = receipt.block_number, "Receipt found");
                return Ok(receipt);
            }
            tokio::time::sleep(self.polling.interval).await;
        }

        Err(ChainError::ReceiptTimeout {
            tx_hash: tx_hash.to_string(),
            attempts: self.polling.max_attempts,
        })
    }

    /// Mint and follow the transaction to its receipt, reporting each step.
    ///
    /// Returns the terminal update (`Confirmed` or `Failed`).
    pub async fn mint_and_wait<F>(
        &self,
        from: Address,
        quantity: u64,
        mut on_update: F,
    ) -> Result<TransactionUpdate, ChainError>
    where
        F: FnMut(&TransactionUpdate) + Send,
    {
        let tx_hash = self.mint(from, quantity).await?;
        on_update(&TransactionUpdate::Submitted {
            tx_hash: tx_hash.clone(),
        });

        let terminal = match self.wait_for_receipt(&tx_hash).await {
            Ok(receipt) if receipt.success => TransactionUpdate::Confirmed {
                tx_hash,
                block_number: receipt.block_number,
            },
            Ok(receipt) => TransactionUpdate::Failed {
                tx_hash,
                reason: format!("reverted in block {}", receipt.block_number),
            },
            Err(e @ ChainError::ReceiptTimeout { .. }) => TransactionUpdate::Failed {
                tx_hash,
                reason: e.to_string(),
            },
            Err(e) => return Err(e),
        };

        if let TransactionUpdate::Failed { reason, .. } = &terminal {
            warn!(reason = %reason, "Mint failed");
        }
        on_update(&terminal);
        Ok(terminal)
    }
}

// =============================================================================
// ACCOUNT OVERVIEW
// =============================================================================

/// Network status and balances for the connected account.
pub struct ChainService<R: EthRpc, B: TokenBalanceReader> {
    rpc: Arc<R>,
    balances: Arc<B>,
    check: NetworkCheck,
    token: Address,
}

impl<R: EthRpc, B: TokenBalanceReader> ChainService<R, B> {
    pub fn new(rpc: Arc<R>, balances: Arc<B>, check: NetworkCheck, token: Address) -> Self {
        Self {
            rpc,
            balances,
            check,
            token,
        }
    }

    /// Compare the node's chain with the target network.
    pub async fn network_status(&self) -> Result<NetworkStatus, ChainError> {
        let chain_id = self.rpc.chain_id().await?;
        let status = self.check.check(chain_id);
        if !status.is_match() {
            warn!(%status, "Connected to an unexpected network");
        }
        Ok(status)
    }

    /// Gather everything the account header shows.
    pub async fn account_overview(&self, address: Address) -> Result<AccountOverview, ChainError> {
        let status = self.network_status().await?;
        let block_number = self.rpc.block_number().await?;
        let native_balance = self.rpc.get_balance(address).await?;
        let gas_price = self.rpc.gas_price().await?;
        let token_balance = self.balances.balance_of(self.token, address).await?;

        Ok(AccountOverview {
            address,
            network: self.check.target(),
            status,
            block_number,
            native_balance,
            gas_price,
            token_balance,
        })
    }
}
