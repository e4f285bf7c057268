//! JSON-RPC client for an Ethereum node.

use crate::domain::entities::{TransactionReceipt, TransactionRequest, TxHash};
use crate::domain::errors::ChainError;
use crate::ports::outbound::EthRpc;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{
    decode_hex, parse_quantity, to_quantity, Address, ChainId, PersonalSignature, U256,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Receipt as the node serializes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    block_number: Option<String>,
    status: Option<String>,
}

/// RPC client for an Ethereum node.
pub struct RpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client with the default timeout.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, ChainError> {
        Self::with_timeout(rpc_url, DEFAULT_TIMEOUT)
    }

    /// Create a new RPC client with a custom timeout.
    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ChainError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Make a JSON-RPC call.
    pub async fn request<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ChainError> {
        let id = self.next_id();
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        trace!(method, id, url = %self.rpc_url, "RPC request");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let rpc_response: JsonRpcResponse = response.json().await?;

        if let Some(error) = rpc_response.error {
            debug!(method, id, code = error.code, message = %error.message, "RPC error");
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(rpc_response.result)
            .map_err(|e| ChainError::Parse(format!("{method}: {e}")))
    }

    async fn quantity(&self, method: &str, params: Value) -> Result<U256, ChainError> {
        let raw: String = self.request(method, params).await?;
        Ok(parse_quantity(&raw)?)
    }

    /// `eth_accounts` - accounts the node unlocks for signing.
    pub async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.request("eth_accounts", json!([])).await
    }

    /// `personal_sign` - sign `message` with an unlocked node account.
    pub async fn personal_sign(
        &self,
        message: &str,
        account: Address,
    ) -> Result<PersonalSignature, ChainError> {
        let data = format!("0x{}", hex::encode(message.as_bytes()));
        let raw: String = self
            .request("personal_sign", json!([data, account.to_lower_hex()]))
            .await?;
        Ok(raw.parse()?)
    }
}

/// Narrow a quantity to `u64`.
fn quantity_to_u64(value: U256, what: &str) -> Result<u64, ChainError> {
    if value.bits() > 64 {
        return Err(ChainError::Parse(format!("{what} does not fit in u64")));
    }
    Ok(value.low_u64())
}

#[async_trait]
impl EthRpc for RpcClient {
    async fn chain_id(&self) -> Result<ChainId, ChainError> {
        let value = self.quantity("eth_chainId", json!([])).await?;
        quantity_to_u64(value, "chain id")
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        let value = self.quantity("eth_blockNumber", json!([])).await?;
        quantity_to_u64(value, "block number")
    }

    async fn gas_price(&self) -> Result<U256, ChainError> {
        self.quantity("eth_gasPrice", json!([])).await
    }

    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError> {
        self.quantity("eth_getBalance", json!([owner.to_lower_hex(), "latest"]))
            .await
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        let params = json!([
            {
                "to": to.to_lower_hex(),
                "data": format!("0x{}", hex::encode(data)),
            },
            "latest"
        ]);
        let raw: String = self.request("eth_call", params).await?;
        Ok(decode_hex(&raw)?)
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ChainError> {
        let params = json!([{
            "from": tx.from.to_lower_hex(),
            "to": tx.to.to_lower_hex(),
            "value": to_quantity(tx.value),
            "data": format!("0x{}", hex::encode(&tx.data)),
        }]);
        self.request("eth_sendTransaction", params).await
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, ChainError> {
        let raw: Option<RawReceipt> = self
            .request("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        // A receipt without a block number is still pending on some nodes
        let Some(block) = raw.block_number else {
            return Ok(None);
        };

        let block_number = quantity_to_u64(parse_quantity(&block)?, "block number")?;
        let success = match raw.status {
            Some(status) => !parse_quantity(&status)?.is_zero(),
            None => true,
        };

        Ok(Some(TransactionReceipt {
            tx_hash: raw.transaction_hash,
            block_number,
            success,
        }))
    }
}
