//! # Application Configuration
//!
//! Defaults, overridden by `GMN_*` environment variables, overridden by
//! CLI flags.
//!
//! ## Security Requirements
//!
//! - The private key is only read from `GMN_PRIVATE_KEY`, never from a flag
//! - The key is held in a zeroizing buffer and never printed

use gmn_03_chain_reader::ReceiptPolling;
use gmn_04_token_gate::ChallengePolicy;
use gmn_05_content::{ContentError, SanityConfig};
use shared_types::{Address, Network};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use zeroize::Zeroizing;

/// Gating contract on Polygon.
pub const DEFAULT_TOKEN_ADDRESS: &str = "0xA7D61E3533E64C4c3882dA14994d5Fe4cbD20D6c";
pub const DEFAULT_NETWORK: &str = "polygon";
pub const DEFAULT_CHALLENGE_DOMAIN: &str = "gmn.app";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("Invalid token address '{value}': {reason}")]
    InvalidTokenAddress { value: String, reason: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("RPC URL must be http(s): '{0}'")]
    InvalidRpcUrl(String),

    #[error("Nonce challenges need a domain")]
    MissingChallengeDomain,

    #[error("Local wallet selected but GMN_PRIVATE_KEY is not set")]
    MissingPrivateKey,

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Challenge kind selectable from env or CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChallengeMode {
    #[default]
    Static,
    Nonce,
}

/// Where signatures come from.
#[derive(Clone, Default)]
pub enum WalletSource {
    /// No wallet; gated commands fail with `NoWalletConnected`.
    #[default]
    None,
    /// In-process key.
    Local(Zeroizing<String>),
    /// Unlocked account on the RPC node.
    Rpc,
}

impl fmt::Debug for WalletSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Local(_) => f.write_str("Local(<redacted>)"),
            Self::Rpc => f.write_str("Rpc"),
        }
    }
}

/// Wallet kind selectable from env or CLI. The key itself is env-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WalletKind {
    None,
    Local,
    Rpc,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Target network name (see `shared_types::NETWORKS`).
    pub network: String,
    /// Overrides the network's public endpoint.
    pub rpc_url: Option<String>,
    pub rpc_timeout_secs: u64,
    /// ERC-20 gating contract, also the mint contract.
    pub token_address: String,
    pub challenge: ChallengeMode,
    pub challenge_domain: String,
    pub challenge_ttl_secs: u64,
    pub wallet: WalletSource,
    pub content: SanityConfig,
    pub receipt_polling: ReceiptPolling,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            rpc_url: None,
            rpc_timeout_secs: 10,
            token_address: DEFAULT_TOKEN_ADDRESS.to_string(),
            challenge: ChallengeMode::Static,
            challenge_domain: DEFAULT_CHALLENGE_DOMAIN.to_string(),
            challenge_ttl_secs: 300,
            wallet: WalletSource::None,
            content: SanityConfig::default(),
            receipt_polling: ReceiptPolling::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`.
    ///
    /// # Environment Variables
    ///
    /// - `GMN_NETWORK`, `GMN_RPC_URL`, `GMN_RPC_TIMEOUT_SECS`
    /// - `GMN_TOKEN_ADDRESS`
    /// - `GMN_CHALLENGE` (`static`|`nonce`), `GMN_CHALLENGE_DOMAIN`,
    ///   `GMN_CHALLENGE_TTL_SECS`
    /// - `GMN_WALLET` (`none`|`local`|`rpc`), `GMN_PRIVATE_KEY`
    /// - `GMN_SANITY_PROJECT`, `GMN_SANITY_DATASET`, `GMN_SANITY_API_VERSION`,
    ///   `GMN_SANITY_CDN`, `GMN_SANITY_ENDPOINT`
    /// - `GMN_RECEIPT_POLL_SECS`, `GMN_RECEIPT_MAX_ATTEMPTS`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(network) = lookup("GMN_NETWORK") {
            config.network = network;
        }
        if let Some(url) = lookup("GMN_RPC_URL") {
            config.rpc_url = Some(url);
        }
        if let Some(secs) = lookup("GMN_RPC_TIMEOUT_SECS") {
            config.rpc_timeout_secs = parse_number("GMN_RPC_TIMEOUT_SECS", &secs)?;
        }
        if let Some(token) = lookup("GMN_TOKEN_ADDRESS") {
            config.token_address = token;
        }
        if let Some(mode) = lookup("GMN_CHALLENGE") {
            config.challenge = match mode.trim().to_lowercase().as_str() {
                "static" => ChallengeMode::Static,
                "nonce" => ChallengeMode::Nonce,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "GMN_CHALLENGE",
                        value: mode,
                    })
                }
            };
        }
        if let Some(domain) = lookup("GMN_CHALLENGE_DOMAIN") {
            config.challenge_domain = domain;
        }
        if let Some(secs) = lookup("GMN_CHALLENGE_TTL_SECS") {
            config.challenge_ttl_secs = parse_number("GMN_CHALLENGE_TTL_SECS", &secs)?;
        }

        let key = lookup("GMN_PRIVATE_KEY").map(Zeroizing::new);
        config.wallet = match (lookup("GMN_WALLET").as_deref().map(str::trim), key) {
            (Some("rpc"), _) => WalletSource::Rpc,
            (Some("none"), _) => WalletSource::None,
            (Some("local") | None, Some(key)) => WalletSource::Local(key),
            (Some("local"), None) => return Err(ConfigError::MissingPrivateKey),
            (None, None) => WalletSource::None,
            (Some(other), _) => {
                return Err(ConfigError::InvalidValue {
                    key: "GMN_WALLET",
                    value: other.to_string(),
                })
            }
        };

        if let Some(project) = lookup("GMN_SANITY_PROJECT") {
            config.content.project_id = project;
        }
        if let Some(dataset) = lookup("GMN_SANITY_DATASET") {
            config.content.dataset = dataset;
        }
        if let Some(version) = lookup("GMN_SANITY_API_VERSION") {
            config.content.api_version = version;
        }
        if let Some(cdn) = lookup("GMN_SANITY_CDN") {
            config.content.use_cdn = gmn_telemetry::parse_flag(&cdn, true);
        }
        if let Some(endpoint) = lookup("GMN_SANITY_ENDPOINT") {
            config.content.endpoint = Some(endpoint);
        }

        if let Some(secs) = lookup("GMN_RECEIPT_POLL_SECS") {
            config.receipt_polling.interval =
                Duration::from_secs(parse_number("GMN_RECEIPT_POLL_SECS", &secs)?);
        }
        if let Some(attempts) = lookup("GMN_RECEIPT_MAX_ATTEMPTS") {
            config.receipt_polling.max_attempts =
                parse_number("GMN_RECEIPT_MAX_ATTEMPTS", &attempts)?;
        }

        Ok(config)
    }

    /// Reject configurations that cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_network()?;
        self.token()?;

        let url = self.rpc_endpoint()?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidRpcUrl(url));
        }
        if self.rpc_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "GMN_RPC_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        if self.challenge == ChallengeMode::Nonce && self.challenge_domain.trim().is_empty() {
            return Err(ConfigError::MissingChallengeDomain);
        }
        self.content.validate()?;
        Ok(())
    }

    pub fn target_network(&self) -> Result<&'static Network, ConfigError> {
        Network::by_name(&self.network).ok_or_else(|| ConfigError::UnknownNetwork(self.network.clone()))
    }

    pub fn token(&self) -> Result<Address, ConfigError> {
        self.token_address
            .parse()
            .map_err(|e: shared_types::ParseError| ConfigError::InvalidTokenAddress {
                value: self.token_address.clone(),
                reason: e.to_string(),
            })
    }

    /// Explicit RPC URL, else the target network's public endpoint.
    pub fn rpc_endpoint(&self) -> Result<String, ConfigError> {
        match &self.rpc_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.target_network()?.rpc_url.to_string()),
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn challenge_policy(&self) -> ChallengePolicy {
        match self.challenge {
            ChallengeMode::Static => ChallengePolicy::default(),
            ChallengeMode::Nonce => ChallengePolicy::Nonce {
                domain: self.challenge_domain.clone(),
                ttl: Duration::from_secs(self.challenge_ttl_secs),
            },
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
