//! # Adapters
//!
//! - `local_wallet`: in-process secp256k1 key
//! - `rpc_wallet`: unlocked account on a JSON-RPC node

pub mod local_wallet;
pub mod rpc_wallet;
