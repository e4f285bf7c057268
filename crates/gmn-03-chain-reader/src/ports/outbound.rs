//! # Outbound Ports
//!
//! The slice of the Ethereum JSON-RPC surface this subsystem uses.

use crate::domain::abi;
use crate::domain::entities::{TransactionReceipt, TransactionRequest, TxHash};
use crate::domain::errors::ChainError;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, ChainId, U256};
use std::collections::{HashMap, VecDeque};

/// Ethereum node client - outbound port.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// `eth_chainId`
    async fn chain_id(&self) -> Result<ChainId, ChainError>;

    /// `eth_blockNumber`
    async fn block_number(&self) -> Result<u64, ChainError>;

    /// `eth_gasPrice`
    async fn gas_price(&self) -> Result<U256, ChainError>;

    /// `eth_getBalance` at `latest`
    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError>;

    /// `eth_call` at `latest`, returning the raw return data.
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError>;

    /// `eth_sendTransaction`
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ChainError>;

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, ChainError>;
}

/// A shared client is still a client.
#[async_trait]
impl<T: EthRpc + ?Sized> EthRpc for std::sync::Arc<T> {
    async fn chain_id(&self) -> Result<ChainId, ChainError> {
        (**self).chain_id().await
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        (**self).block_number().await
    }

    async fn gas_price(&self) -> Result<U256, ChainError> {
        (**self).gas_price().await
    }

    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError> {
        (**self).get_balance(owner).await
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        (**self).call(to, data).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ChainError> {
        (**self).send_transaction(tx).await
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, ChainError> {
        (**self).transaction_receipt(tx_hash).await
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scriptable node.
pub struct MockEthRpc {
    pub chain_id: ChainId,
    pub block_number: u64,
    pub gas_price: U256,
    /// Native balances.
    pub balances: HashMap<Address, U256>,
    /// Return data per 4-byte selector for `eth_call`.
    pub call_results: HashMap<[u8; 4], Vec<u8>>,
    /// Receipt answers, popped per poll; empty means pending.
    pub receipts: Mutex<VecDeque<Option<TransactionReceipt>>>,
    /// Transactions passed to `send_transaction`.
    pub sent: Mutex<Vec<TransactionRequest>>,
    /// Fail every request with a connection error.
    pub should_fail: bool,
}

impl Default for MockEthRpc {
    fn default() -> Self {
        Self {
            chain_id: 137,
            block_number: 100,
            gas_price: U256::from(30_000_000_000u64),
            balances: HashMap::new(),
            call_results: HashMap::new(),
            receipts: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }
}

impl MockEthRpc {
    /// Answer calls to `signature` with a single `uint256` word.
    pub fn with_uint_result(mut self, signature: &str, value: U256) -> Self {
        self.call_results
            .insert(abi::selector(signature), abi::encode_uint(value).to_vec());
        self
    }

    /// Queue a receipt answer.
    pub fn push_receipt(&self, receipt: Option<TransactionReceipt>) {
        self.receipts.lock().push_back(receipt);
    }

    fn check(&self) -> Result<(), ChainError> {
        if self.should_fail {
            return Err(ChainError::Connection("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EthRpc for MockEthRpc {
    async fn chain_id(&self) -> Result<ChainId, ChainError> {
        self.check()?;
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        self.check()?;
        Ok(self.block_number)
    }

    async fn gas_price(&self) -> Result<U256, ChainError> {
        self.check()?;
        Ok(self.gas_price)
    }

    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError> {
        self.check()?;
        Ok(self.balances.get(&owner).copied().unwrap_or_default())
    }

    async fn call(&self, _to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        self.check()?;
        if data.len() < 4 {
            return Ok(Vec::new());
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        Ok(self.call_results.get(&selector).cloned().unwrap_or_default())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ChainError> {
        self.check()?;
        let mut sent = self.sent.lock();
        sent.push(tx.clone());
        Ok(format!("0x{:064x}", sent.len()))
    }

    async fn transaction_receipt(
        &self,
        _tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, ChainError> {
        self.check()?;
        Ok(self.receipts.lock().pop_front().flatten())
    }
}
