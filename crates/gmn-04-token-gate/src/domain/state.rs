//! # Authorization State Machine
//!
//! ```text
//! Idle ──────┐
//! Authorized ├──begin──→ Signing ──→ Verifying ──→ Authorized | Denied
//! Denied ────┘              │            │
//!                           └────────────┴──abort──→ Idle
//!                                        └──rollback──→ state before begin
//! Authorized | Denied ──revoke──→ Idle
//! ```
//!
//! The busy flag is derived from the state, so "busy" and "authorized"
//! can never both hold.

use crate::domain::errors::InvalidTransition;
use shared_types::Address;

/// Gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    /// Waiting for the wallet to sign.
    Signing,
    /// Recovering the signer and reading the balance.
    Verifying,
    /// Granted to `address` within session `generation`.
    Authorized { address: Address, generation: u64 },
    /// Definitive denial within session `generation`.
    Denied { generation: u64 },
}

impl AuthState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Signing | Self::Verifying)
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Signing => "signing",
            Self::Verifying => "verifying",
            Self::Authorized { .. } => "authorized",
            Self::Denied { .. } => "denied",
        }
    }

    fn allows(&self, to: &AuthState) -> bool {
        use AuthState::*;
        matches!(
            (self, to),
            (Idle | Authorized { .. } | Denied { .. }, Signing)
                | (Signing, Verifying)
                | (Signing | Verifying, Idle)
                | (Verifying, Authorized { .. } | Denied { .. })
                | (Authorized { .. } | Denied { .. }, Idle)
        )
    }
}

/// Owns the current state and the state to fall back to when an attempt
/// ends without a decision.
#[derive(Debug, Default)]
pub struct AuthMachine {
    state: AuthState,
    rollback: AuthState,
    busy_exits: u64,
}

impl AuthMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// State a rollback would restore.
    pub fn rollback_target(&self) -> AuthState {
        self.rollback
    }

    /// Number of times the machine has left a busy state.
    pub fn busy_exits(&self) -> u64 {
        self.busy_exits
    }

    /// Apply a transition from the table.
    pub fn transition(&mut self, to: AuthState) -> Result<AuthState, InvalidTransition> {
        if !self.state.allows(&to) {
            return Err(InvalidTransition {
                from: self.state.name(),
                to: to.name(),
            });
        }
        if to == AuthState::Signing {
            self.rollback = self.state;
        }
        Ok(self.set(to))
    }

    /// Return to the state held before the current attempt began.
    /// No-op when not busy.
    pub fn rollback(&mut self) -> AuthState {
        if self.state.is_busy() {
            let target = self.rollback;
            self.set(target);
        }
        self.state
    }

    /// Drop any decision not granted in `generation` or later.
    ///
    /// Returns `true` when a settled decision was cleared. A busy machine
    /// is left running, but the state it would roll back to is cleared.
    pub fn revoke(&mut self, generation: u64) -> bool {
        let stale = |s: &AuthState| match s {
            AuthState::Authorized { generation: g, .. } | AuthState::Denied { generation: g } => {
                *g < generation
            }
            _ => false,
        };

        if self.state.is_busy() {
            if stale(&self.rollback) {
                self.rollback = AuthState::Idle;
            }
            return false;
        }
        if stale(&self.state) {
            self.set(AuthState::Idle);
            return true;
        }
        false
    }

    fn set(&mut self, to: AuthState) -> AuthState {
        if self.state.is_busy() && !to.is_busy() {
            self.busy_exits += 1;
        }
        self.state = to;
        to
    }
}
