//! Port decorators that record Prometheus metrics around the wrapped
//! adapter.

use async_trait::async_trait;
use gmn_03_chain_reader::{
    ChainError, EthRpc, TokenBalanceReader, TransactionReceipt, TransactionRequest, TxHash,
};
use gmn_telemetry::{RpcTimer, BALANCE_QUERY_FAILURES};
use shared_types::{Address, ChainId, U256};
use std::future::Future;

async fn observe<T>(
    method: &'static str,
    call: impl Future<Output = Result<T, ChainError>>,
) -> Result<T, ChainError> {
    let timer = RpcTimer::start(method);
    let result = call.await;
    if result.is_ok() {
        timer.succeed();
    }
    result
}

/// Counts and times every JSON-RPC call by method.
pub struct MeteredRpc<R: EthRpc> {
    inner: R,
}

impl<R: EthRpc> MeteredRpc<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: EthRpc> EthRpc for MeteredRpc<R> {
    async fn chain_id(&self) -> Result<ChainId, ChainError> {
        observe("eth_chainId", self.inner.chain_id()).await
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        observe("eth_blockNumber", self.inner.block_number()).await
    }

    async fn gas_price(&self) -> Result<U256, ChainError> {
        observe("eth_gasPrice", self.inner.gas_price()).await
    }

    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError> {
        observe("eth_getBalance", self.inner.get_balance(owner)).await
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        observe("eth_call", self.inner.call(to, data)).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ChainError> {
        observe("eth_sendTransaction", self.inner.send_transaction(tx)).await
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, ChainError> {
        observe(
            "eth_getTransactionReceipt",
            self.inner.transaction_receipt(tx_hash),
        )
        .await
    }
}

/// Counts failed balance reads.
pub struct MeteredBalances<B: TokenBalanceReader> {
    inner: B,
}

impl<B: TokenBalanceReader> MeteredBalances<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: TokenBalanceReader> TokenBalanceReader for MeteredBalances<B> {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        let result = self.inner.balance_of(token, owner).await;
        if result.is_err() {
            BALANCE_QUERY_FAILURES.inc();
        }
        result
    }
}
