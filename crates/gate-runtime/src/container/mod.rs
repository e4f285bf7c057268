//! # Gate Container
//!
//! Builds every subsystem once and wires them together.
//!
//! ```text
//! RpcClient ─→ MeteredRpc ─┬─→ Erc20BalanceReader ─→ MeteredBalances ─┐
//!                          ├─→ MintService                            │
//!                          └─→ ChainService ←─────────────────────────┤
//! InMemoryEventBus ←─ SessionManager ──→ TokenGate ←──────────────────┘
//!        │                                   ↑  │ ContentGate
//!        └──── session events ───────────────┘  ↓
//!                                      ContentService ←─ SanityClient
//! ```

pub mod config;

pub use config::{AppConfig, ChallengeMode, ConfigError, WalletKind, WalletSource};

use crate::adapters::{ConsoleNotifier, MeteredBalances, MeteredRpc};
use anyhow::{Context, Result};
use gmn_01_signature_verification::PersonalSignVerifier;
use gmn_02_wallet_session::{LocalWallet, RpcWallet, SessionManager, WalletSigner};
use gmn_03_chain_reader::{
    ChainService, Erc20BalanceReader, EthRpc, MintService, NetworkCheck, RpcClient,
};
use gmn_04_token_gate::{GateConfig, NotificationSink, TokenGate};
use gmn_05_content::{ContentService, ContentSource, SanityClient};
use gmn_telemetry::SESSION_EVENTS;
use shared_bus::{EventFilter, InMemoryEventBus};
use shared_types::{Address, Network};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// RPC stack used by every chain consumer.
pub type Rpc = MeteredRpc<Arc<RpcClient>>;
/// Balance reader used by the gate and the account overview.
pub type Balances = MeteredBalances<Erc20BalanceReader<Rpc>>;

/// Central container holding all subsystem instances.
pub struct GateContainer {
    pub config: AppConfig,
    pub network: &'static Network,
    pub token: Address,

    // =========================================================================
    // CHAIN
    // =========================================================================
    pub client: Arc<RpcClient>,
    pub rpc: Arc<Rpc>,
    pub balances: Arc<Balances>,
    pub chain: ChainService<Rpc, Balances>,
    pub mint: MintService<Rpc>,

    // =========================================================================
    // SESSION + GATE
    // =========================================================================
    pub bus: Arc<InMemoryEventBus>,
    pub session: Arc<SessionManager>,
    pub gate: Arc<TokenGate>,

    // =========================================================================
    // CONTENT
    // =========================================================================
    pub content: ContentService,

    watchers: Vec<JoinHandle<()>>,
}

impl GateContainer {
    /// Wire everything with the console as notification sink.
    pub fn build(config: AppConfig) -> Result<Self> {
        Self::build_with(config, Arc::new(ConsoleNotifier), None)
    }

    /// Wire everything, optionally replacing the notification sink and
    /// the CMS source.
    ///
    /// Must run inside a Tokio runtime: session watchers are spawned here.
    pub fn build_with(
        config: AppConfig,
        notifier: Arc<dyn NotificationSink>,
        content_source: Option<Arc<dyn ContentSource>>,
    ) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let network = config.target_network()?;
        let token = config.token()?;
        let endpoint = config.rpc_endpoint()?;

        let client = Arc::new(
            RpcClient::with_timeout(&endpoint, config.rpc_timeout())
                .with_context(|| format!("creating RPC client for {endpoint}"))?,
        );
        let rpc = Arc::new(MeteredRpc::new(client.clone()));
        let balances = Arc::new(MeteredBalances::new(Erc20BalanceReader::new(rpc.clone())));
        let chain = ChainService::new(
            rpc.clone(),
            balances.clone(),
            NetworkCheck::new(network),
            token,
        );
        let mint = MintService::with_polling(rpc.clone(), token, config.receipt_polling);

        let bus = Arc::new(InMemoryEventBus::new());
        let session = Arc::new(SessionManager::new(bus.clone()));
        let gate = Arc::new(TokenGate::new(
            session.clone(),
            Arc::new(PersonalSignVerifier::new()),
            balances.clone(),
            notifier,
            GateConfig::new(token).with_challenge(config.challenge_policy()),
        ));

        let content_source = match content_source {
            Some(source) => source,
            None => Arc::new(
                SanityClient::new(config.content.clone()).context("creating CMS client")?,
            ),
        };
        let content = ContentService::new(content_source, gate.clone());

        let watchers = vec![
            gate.spawn_session_watch(bus.subscribe(EventFilter::all())),
            spawn_session_metrics(&bus),
        ];

        info!(
            network = network.name,
            rpc = %endpoint,
            token = %token,
            challenge = ?config.challenge,
            "Gate container ready"
        );

        Ok(Self {
            config,
            network,
            token,
            client,
            rpc,
            balances,
            chain,
            mint,
            bus,
            session,
            gate,
            content,
            watchers,
        })
    }

    /// Connect the configured wallet and return its address.
    pub async fn connect_wallet(&self) -> Result<Address> {
        let signer: Arc<dyn WalletSigner> = match &self.config.wallet {
            WalletSource::None => anyhow::bail!(
                "no wallet configured: set GMN_PRIVATE_KEY or GMN_WALLET=rpc"
            ),
            WalletSource::Local(key) => {
                let chain_id = self
                    .rpc
                    .chain_id()
                    .await
                    .context("reading chain id for the local wallet")?;
                Arc::new(
                    LocalWallet::from_hex(key.as_str(), chain_id)
                        .context("loading GMN_PRIVATE_KEY")?,
                )
            }
            WalletSource::Rpc => Arc::new(
                RpcWallet::connect(self.client.clone(), None)
                    .await
                    .context("connecting to the node's wallet")?,
            ),
        };
        let address = signer.address();
        self.session.connect(signer).await;
        Ok(address)
    }
}

impl Drop for GateContainer {
    fn drop(&mut self) {
        for watcher in &self.watchers {
            watcher.abort();
        }
    }
}

fn spawn_session_metrics(bus: &InMemoryEventBus) -> JoinHandle<()> {
    let mut subscription = bus.subscribe(EventFilter::all());
    tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            let kind = format!("{:?}", event.kind());
            SESSION_EVENTS.with_label_values(&[kind.as_str()]).inc();
        }
    })
}
