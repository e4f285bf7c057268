//! In-process stand-ins for the services the gate talks to, plus a
//! helper that wires a full [`GateContainer`] against them.

pub mod stub_cms;
pub mod stub_node;

pub use stub_cms::StubCms;
pub use stub_node::StubNode;

use gate_runtime::container::{AppConfig, ChallengeMode, WalletSource};
use gate_runtime::GateContainer;
use gmn_04_token_gate::MemoryNotifier;
use std::sync::Arc;
use std::time::Duration;

/// Config pointing every subsystem at the stubs.
pub fn stub_config(node: &StubNode, cms: &StubCms) -> AppConfig {
    let mut config = AppConfig {
        network: "localhost".into(),
        rpc_url: Some(node.url.clone()),
        token_address: node.token.to_lower_hex(),
        wallet: WalletSource::Rpc,
        ..AppConfig::default()
    };
    config.content.endpoint = Some(cms.url.clone());
    config.content.use_cdn = false;
    config.receipt_polling.interval = Duration::from_millis(10);
    config.receipt_polling.max_attempts = 20;
    config
}

/// Same, with single-use nonce challenges.
pub fn nonce_config(node: &StubNode, cms: &StubCms) -> AppConfig {
    AppConfig {
        challenge: ChallengeMode::Nonce,
        challenge_domain: "gmn.test".into(),
        ..stub_config(node, cms)
    }
}

/// Build a container that records notifications instead of printing them.
pub fn container(config: AppConfig) -> (GateContainer, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let container = GateContainer::build_with(config, notifier.clone(), None)
        .expect("container should build against stubs");
    (container, notifier)
}
