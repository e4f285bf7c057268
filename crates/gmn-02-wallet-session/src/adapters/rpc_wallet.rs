//! # RPC Wallet
//!
//! Signs through an unlocked account on a JSON-RPC node, the same request
//! shape a browser-injected provider answers (`eth_accounts`,
//! `eth_chainId`, `personal_sign`).

use crate::domain::errors::WalletError;
use crate::ports::inbound::WalletSigner;
use async_trait::async_trait;
use gmn_03_chain_reader::{EthRpc, RpcClient};
use shared_types::{Address, ChainId, PersonalSignature};
use std::sync::Arc;
use tracing::{debug, info};

/// Wallet backed by a node-managed account.
pub struct RpcWallet {
    rpc: Arc<RpcClient>,
    address: Address,
    chain_id: ChainId,
}

impl RpcWallet {
    /// Connect to the provider and select an account.
    ///
    /// With `account = None` the provider's first account is used, as a
    /// browser wallet does for the selected account.
    pub async fn connect(rpc: Arc<RpcClient>, account: Option<Address>) -> Result<Self, WalletError> {
        let accounts = rpc.accounts().await?;
        let address = match account {
            Some(wanted) if accounts.contains(&wanted) => wanted,
            Some(wanted) => return Err(WalletError::UnknownAccount(wanted.to_string())),
            None => *accounts.first().ok_or(WalletError::NoAccounts)?,
        };
        let chain_id = rpc.chain_id().await?;

        info!(address = %address, chain_id, url = rpc.url(), "RPC wallet connected");
        Ok(Self {
            rpc,
            address,
            chain_id,
        })
    }
}

#[async_trait]
impl WalletSigner for RpcWallet {
    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn sign_message(&self, message: &str) -> Result<PersonalSignature, WalletError> {
        debug!(signer = %self.address, "Requesting personal_sign from provider");
        Ok(self.rpc.personal_sign(message, self.address).await?)
    }

    fn kind(&self) -> &'static str {
        "rpc"
    }
}
