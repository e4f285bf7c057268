//! # Adapters
//!
//! - `rpc_client`: JSON-RPC 2.0 over HTTP, implements `EthRpc`

pub mod rpc_client;
