//! # Network Table
//!
//! The chains the front end knows how to talk to. The gating token lives on
//! `polygon`; the others are kept for local development and testing.

use crate::entities::ChainId;

/// A known EVM network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    /// Short lookup name (`polygon`, `localhost`, ...).
    pub name: &'static str,
    /// EIP-155 chain id.
    pub chain_id: ChainId,
    /// Default public RPC endpoint.
    pub rpc_url: &'static str,
    /// Block explorer base URL (empty for local chains).
    pub block_explorer: &'static str,
    /// Symbol of the native currency.
    pub native_symbol: &'static str,
}

/// Every network the client can target.
pub const NETWORKS: &[Network] = &[
    Network {
        name: "localhost",
        chain_id: 31337,
        rpc_url: "http://127.0.0.1:8545",
        block_explorer: "",
        native_symbol: "ETH",
    },
    Network {
        name: "mainnet",
        chain_id: 1,
        rpc_url: "https://eth.llamarpc.com",
        block_explorer: "https://etherscan.io/",
        native_symbol: "ETH",
    },
    Network {
        name: "goerli",
        chain_id: 5,
        rpc_url: "https://rpc.ankr.com/eth_goerli",
        block_explorer: "https://goerli.etherscan.io/",
        native_symbol: "ETH",
    },
    Network {
        name: "polygon",
        chain_id: 137,
        rpc_url: "https://polygon-rpc.com",
        block_explorer: "https://polygonscan.com/",
        native_symbol: "MATIC",
    },
    Network {
        name: "mumbai",
        chain_id: 80001,
        rpc_url: "https://rpc-mumbai.maticvigil.com",
        block_explorer: "https://mumbai.polygonscan.com/",
        native_symbol: "MATIC",
    },
];

impl Network {
    /// Look a network up by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Network> {
        NETWORKS.iter().find(|n| n.name.eq_ignore_ascii_case(name))
    }

    /// Look a network up by chain id.
    pub fn by_chain_id(chain_id: ChainId) -> Option<&'static Network> {
        NETWORKS.iter().find(|n| n.chain_id == chain_id)
    }

    /// Explorer link for a transaction hash, if the network has an explorer.
    pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
        if self.block_explorer.is_empty() {
            None
        } else {
            Some(format!("{}tx/{}", self.block_explorer, tx_hash))
        }
    }
}
