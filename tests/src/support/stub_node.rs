//! # Stub Node
//!
//! Minimal Ethereum JSON-RPC node on an ephemeral port. It holds one
//! gating ERC-20 with a mint function, answers `personal_sign` for a set
//! of unlocked accounts, and mines every transaction into the next block.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use gmn_02_wallet_session::{LocalWallet, WalletSigner};
use gmn_03_chain_reader::abi;
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared_types::{decode_hex, to_quantity, Address, ChainId, U256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const STUB_CHAIN_ID: ChainId = 31337;

/// Price of one token in wei.
pub const MINT_COST: u64 = 10_000_000_000_000_000;

struct Mined {
    block_number: u64,
    success: bool,
}

struct NodeState {
    chain_id: ChainId,
    token: Address,
    block_number: AtomicU64,
    accounts: Vec<LocalWallet>,
    token_balances: Mutex<HashMap<Address, U256>>,
    receipts: Mutex<HashMap<String, Mined>>,
    sent: Mutex<Vec<Value>>,
    fail_balance_of: AtomicBool,
    reject_signatures: AtomicBool,
    revert_mints: AtomicBool,
    requests: Mutex<Vec<String>>,
}

/// Handle to a running stub node. The server stops when dropped.
pub struct StubNode {
    pub url: String,
    pub token: Address,
    state: Arc<NodeState>,
    server: JoinHandle<()>,
}

impl StubNode {
    /// Start a node with `accounts` unlocked for signing.
    pub async fn start(accounts: Vec<LocalWallet>) -> Self {
        let token = Address::new([0x6d; 20]);
        let state = Arc::new(NodeState {
            chain_id: STUB_CHAIN_ID,
            token,
            block_number: AtomicU64::new(100),
            accounts,
            token_balances: Mutex::new(HashMap::new()),
            receipts: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            fail_balance_of: AtomicBool::new(false),
            reject_signatures: AtomicBool::new(false),
            revert_mints: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/", post(handle_json_rpc))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub node");
        let addr = listener.local_addr().expect("stub node address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            url: format!("http://{addr}"),
            token,
            state,
            server,
        }
    }

    /// Set the gating-token balance of `owner`.
    pub fn set_token_balance(&self, owner: Address, amount: u64) {
        self.state
            .token_balances
            .lock()
            .insert(owner, U256::from(amount));
    }

    pub fn token_balance(&self, owner: Address) -> U256 {
        self.state
            .token_balances
            .lock()
            .get(&owner)
            .copied()
            .unwrap_or_default()
    }

    pub fn fail_balance_of(&self, fail: bool) {
        self.state.fail_balance_of.store(fail, Ordering::SeqCst);
    }

    pub fn reject_signatures(&self, reject: bool) {
        self.state.reject_signatures.store(reject, Ordering::SeqCst);
    }

    pub fn revert_mints(&self, revert: bool) {
        self.state.revert_mints.store(revert, Ordering::SeqCst);
    }

    /// Transactions received by `eth_sendTransaction`.
    pub fn sent(&self) -> Vec<Value> {
        self.state.sent.lock().clone()
    }

    /// Number of requests received for `method`.
    pub fn request_count(&self, method: &str) -> usize {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }
}

impl Drop for StubNode {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle_json_rpc(
    State(state): State<Arc<NodeState>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();
    state.requests.lock().push(method.clone());

    let response = match dispatch(&state, &method, &params) {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": code, "message": message}
        }),
    };
    Json(response)
}

type RpcResult = Result<Value, (i64, String)>;

fn dispatch(state: &NodeState, method: &str, params: &Value) -> RpcResult {
    match method {
        "eth_chainId" => Ok(json!(to_quantity(U256::from(state.chain_id)))),
        "eth_blockNumber" => Ok(json!(to_quantity(U256::from(
            state.block_number.load(Ordering::SeqCst)
        )))),
        "eth_gasPrice" => Ok(json!(to_quantity(U256::from(30_000_000_000u64)))),
        "eth_getBalance" => Ok(json!(to_quantity(U256::exp10(18)))),
        "eth_accounts" => Ok(json!(state
            .accounts
            .iter()
            .map(|w| w.address().to_lower_hex())
            .collect::<Vec<_>>())),
        "eth_call" => eth_call(state, &params[0]),
        "personal_sign" => personal_sign(state, params),
        "eth_sendTransaction" => send_transaction(state, &params[0]),
        "eth_getTransactionReceipt" => receipt(state, params[0].as_str().unwrap_or_default()),
        other => Err((-32601, format!("Method not found: {other}"))),
    }
}

fn hex_param(value: &Value) -> Result<Vec<u8>, (i64, String)> {
    decode_hex(value.as_str().unwrap_or_default()).map_err(|e| (-32602, e.to_string()))
}

fn address_param(value: &Value) -> Result<Address, (i64, String)> {
    value
        .as_str()
        .unwrap_or_default()
        .parse()
        .map_err(|e: shared_types::ParseError| (-32602, e.to_string()))
}

fn eth_call(state: &NodeState, call: &Value) -> RpcResult {
    if address_param(&call["to"])? != state.token {
        return Ok(json!("0x"));
    }
    let data = hex_param(&call["data"])?;
    if data.len() < 4 {
        return Err((-32000, "execution reverted".into()));
    }
    let selector: [u8; 4] = [data[0], data[1], data[2], data[3]];

    let word = if selector == abi::selector(abi::BALANCE_OF) {
        if state.fail_balance_of.load(Ordering::SeqCst) {
            return Err((-32000, "header not found".into()));
        }
        if data.len() < 36 {
            return Err((-32000, "execution reverted".into()));
        }
        let mut owner = [0u8; 20];
        owner.copy_from_slice(&data[16..36]);
        let balance = state
            .token_balances
            .lock()
            .get(&Address::new(owner))
            .copied()
            .unwrap_or_default();
        abi::encode_uint(balance)
    } else if selector == abi::selector(abi::COST) {
        abi::encode_uint(U256::from(MINT_COST))
    } else {
        return Err((-32000, "execution reverted".into()));
    };
    Ok(json!(format!("0x{}", hex::encode(word))))
}

fn personal_sign(state: &NodeState, params: &Value) -> RpcResult {
    if state.reject_signatures.load(Ordering::SeqCst) {
        return Err((4001, "User denied message signature.".into()));
    }
    let message = hex_param(&params[0])?;
    let account = address_param(&params[1])?;
    let wallet = state
        .accounts
        .iter()
        .find(|w| w.address() == account)
        .ok_or((-32000, format!("unknown account {account}")))?;
    let text = String::from_utf8(message).map_err(|e| (-32602, e.to_string()))?;
    let signature = wallet
        .sign_sync(&text)
        .map_err(|e| (-32000, e.to_string()))?;
    Ok(json!(signature.to_hex()))
}

fn send_transaction(state: &NodeState, tx: &Value) -> RpcResult {
    let from = address_param(&tx["from"])?;
    let data = hex_param(&tx["data"])?;
    state.sent.lock().push(tx.clone());

    let block_number = state.block_number.fetch_add(1, Ordering::SeqCst) + 1;
    let tx_hash = format!("0x{:064x}", block_number);
    let reverted = state.revert_mints.load(Ordering::SeqCst);

    let is_mint = data.len() >= 36 && data[..4] == abi::selector(abi::MINT);
    if is_mint && !reverted {
        let quantity = abi::decode_uint(&data[4..36]).map_err(|e| (-32602, e.to_string()))?;
        let mut balances = state.token_balances.lock();
        let entry = balances.entry(from).or_default();
        *entry = entry.saturating_add(quantity);
    }

    state.receipts.lock().insert(
        tx_hash.clone(),
        Mined {
            block_number,
            success: !reverted,
        },
    );
    Ok(json!(tx_hash))
}

fn receipt(state: &NodeState, tx_hash: &str) -> RpcResult {
    Ok(match state.receipts.lock().get(tx_hash) {
        Some(mined) => json!({
            "transactionHash": tx_hash,
            "blockNumber": to_quantity(U256::from(mined.block_number)),
            "status": if mined.success { "0x1" } else { "0x0" },
        }),
        None => Value::Null,
    })
}
