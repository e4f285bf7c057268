//! # Session Manager
//!
//! Owns the active signer and its lifecycle. State and generation change
//! under one lock; the matching event is published after the lock is
//! released.

use crate::domain::session::SessionSnapshot;
use crate::ports::inbound::WalletSigner;
use parking_lot::RwLock;
use shared_bus::{EventPublisher, SessionEvent};
use shared_types::{Address, ChainId};
use std::sync::Arc;
use tracing::{info, warn};

/// EIP-1193 "user disconnected" close code.
pub const USER_DISCONNECT_CODE: u16 = 1000;

struct ActiveSession {
    signer: Arc<dyn WalletSigner>,
    chain_id: ChainId,
}

struct SessionState {
    active: Option<ActiveSession>,
    generation: u64,
}

/// Wallet Session Provider.
pub struct SessionManager {
    state: RwLock<SessionState>,
    bus: Arc<dyn EventPublisher>,
}

impl SessionManager {
    pub fn new(bus: Arc<dyn EventPublisher>) -> Self {
        Self {
            state: RwLock::new(SessionState {
                active: None,
                generation: 0,
            }),
            bus,
        }
    }

    /// Connect (or reconnect) a wallet. Returns the new generation.
    pub async fn connect(&self, signer: Arc<dyn WalletSigner>) -> u64 {
        let address = signer.address();
        let chain_id = signer.chain_id();
        let kind = signer.kind();

        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            state.active = Some(ActiveSession { signer, chain_id });
            state.generation
        };

        info!(address = %address, chain_id, kind, generation, "Wallet connected");
        self.bus
            .publish(SessionEvent::Connected {
                address,
                chain_id,
                generation,
            })
            .await;
        generation
    }

    /// The wallet switched to another account.
    pub async fn account_changed(&self, signer: Arc<dyn WalletSigner>) -> u64 {
        let address = signer.address();

        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            let chain_id = state
                .active
                .as_ref()
                .map_or_else(|| signer.chain_id(), |a| a.chain_id);
            state.active = Some(ActiveSession { signer, chain_id });
            state.generation
        };

        info!(address = %address, generation, "Wallet account changed");
        self.bus
            .publish(SessionEvent::AccountChanged {
                address,
                generation,
            })
            .await;
        generation
    }

    /// The wallet switched chains. The signer stays, its chain moves.
    pub async fn chain_changed(&self, chain_id: ChainId) -> u64 {
        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            match state.active.as_mut() {
                Some(active) => active.chain_id = chain_id,
                None => warn!(chain_id, "Chain changed without an active session"),
            }
            state.generation
        };

        info!(chain_id, generation, "Wallet chain changed");
        self.bus
            .publish(SessionEvent::ChainChanged {
                chain_id,
                generation,
            })
            .await;
        generation
    }

    /// Close the session and forget the cached provider.
    pub async fn disconnect(&self, code: u16, reason: impl Into<String>) -> u64 {
        let reason = reason.into();

        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            state.active = None;
            state.generation
        };

        info!(code, reason = %reason, generation, "Wallet disconnected");
        self.bus
            .publish(SessionEvent::Disconnected {
                code,
                reason,
                generation,
            })
            .await;
        generation
    }

    /// Whether a wallet session is established.
    pub fn has_cached_provider(&self) -> bool {
        self.state.read().active.is_some()
    }

    /// Current signer, if connected.
    pub fn signer(&self) -> Option<Arc<dyn WalletSigner>> {
        self.state.read().active.as_ref().map(|a| a.signer.clone())
    }

    pub fn address(&self) -> Option<Address> {
        self.state.read().active.as_ref().map(|a| a.signer.address())
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.state.read().active.as_ref().map(|a| a.chain_id)
    }

    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Signer together with the generation it belongs to, read atomically.
    pub fn current(&self) -> Option<(Arc<dyn WalletSigner>, SessionSnapshot)> {
        let state = self.state.read();
        state.active.as_ref().map(|a| {
            (
                a.signer.clone(),
                SessionSnapshot {
                    address: a.signer.address(),
                    chain_id: a.chain_id,
                    generation: state.generation,
                },
            )
        })
    }
}
