//! # Session Events
//!
//! Lifecycle events emitted by the wallet session provider. Every event
//! carries the session generation it produced; consumers compare
//! generations to detect that the identity they started with is gone.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId};

/// Wallet session lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A wallet was connected (or reconnected from a cached provider).
    Connected {
        address: Address,
        chain_id: ChainId,
        generation: u64,
    },

    /// The wallet switched to another account.
    AccountChanged { address: Address, generation: u64 },

    /// The wallet switched to another chain.
    ChainChanged { chain_id: ChainId, generation: u64 },

    /// The session was closed by the user or the provider.
    Disconnected {
        code: u16,
        reason: String,
        generation: u64,
    },
}

/// Discriminant of [`SessionEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionEventKind {
    Connected,
    AccountChanged,
    ChainChanged,
    Disconnected,
}

impl SessionEvent {
    /// Kind of this event.
    #[must_use]
    pub fn kind(&self) -> SessionEventKind {
        match self {
            SessionEvent::Connected { .. } => SessionEventKind::Connected,
            SessionEvent::AccountChanged { .. } => SessionEventKind::AccountChanged,
            SessionEvent::ChainChanged { .. } => SessionEventKind::ChainChanged,
            SessionEvent::Disconnected { .. } => SessionEventKind::Disconnected,
        }
    }

    /// Session generation this event produced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            SessionEvent::Connected { generation, .. }
            | SessionEvent::AccountChanged { generation, .. }
            | SessionEvent::ChainChanged { generation, .. }
            | SessionEvent::Disconnected { generation, .. } => *generation,
        }
    }

    /// Whether the event invalidates an identity established earlier.
    ///
    /// A fresh `Connected` does not by itself revoke anything: a previous
    /// session, if any, was already ended by its own `Disconnected`.
    #[must_use]
    pub fn invalidates_identity(&self) -> bool {
        !matches!(self, SessionEvent::Connected { .. })
    }
}

/// Filter for subscribing to specific event kinds.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Kinds to include. Empty means all kinds.
    pub kinds: Vec<SessionEventKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<SessionEventKind>) -> Self {
        Self { kinds }
    }

    /// Only the events that end an identity.
    #[must_use]
    pub fn identity_changes() -> Self {
        Self::kinds(vec![
            SessionEventKind::AccountChanged,
            SessionEventKind::ChainChanged,
            SessionEventKind::Disconnected,
        ])
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SessionEvent) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&event.kind())
    }
}
