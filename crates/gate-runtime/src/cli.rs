//! Command-line surface of `gmn-gate`.

use crate::container::{AppConfig, ChallengeMode, ConfigError, WalletKind, WalletSource};
use clap::{Parser, Subcommand};

/// GMN Gate: token-gated content reader
#[derive(Parser, Debug)]
#[command(name = "gmn-gate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target network (polygon, mainnet, localhost, ...)
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// JSON-RPC endpoint URL; defaults to the network's public endpoint
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Gating ERC-20 contract address
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Sign-in challenge scheme
    #[arg(long, value_enum, global = true)]
    pub challenge: Option<ChallengeMode>,

    /// Domain named in nonce challenges
    #[arg(long, global = true)]
    pub challenge_domain: Option<String>,

    /// Wallet used for signing; `local` reads GMN_PRIVATE_KEY
    #[arg(long, value_enum, global = true)]
    pub wallet: Option<WalletKind>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print Prometheus metrics after the command
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compare the node's chain with the target network
    Network,
    /// Show balances for the connected wallet
    Account,
    /// Sign the challenge and check the token balance
    Verify,
    /// List posts
    Posts {
        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,
        /// Sign in first so entries carry view links
        #[arg(long)]
        verify: bool,
    },
    /// Sign in and read one post
    Post {
        /// Post slug
        slug: String,
    },
    /// Mint gating tokens to the connected wallet
    Mint {
        #[arg(long, default_value_t = 1)]
        quantity: u64,
        /// Wait for the receipt
        #[arg(long)]
        wait: bool,
    },
}

impl Cli {
    /// Overlay the flags on an environment-derived configuration.
    pub fn apply(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(network) = &self.network {
            config.network = network.clone();
        }
        if let Some(url) = &self.rpc_url {
            config.rpc_url = Some(url.clone());
        }
        if let Some(token) = &self.token {
            config.token_address = token.clone();
        }
        if let Some(mode) = self.challenge {
            config.challenge = mode;
        }
        if let Some(domain) = &self.challenge_domain {
            config.challenge_domain = domain.clone();
        }
        match self.wallet {
            Some(WalletKind::None) => config.wallet = WalletSource::None,
            Some(WalletKind::Rpc) => config.wallet = WalletSource::Rpc,
            Some(WalletKind::Local) if !matches!(config.wallet, WalletSource::Local(_)) => {
                return Err(ConfigError::MissingPrivateKey)
            }
            _ => {}
        }
        Ok(())
    }
}
