//! # Token Gate Subsystem (GMN-04)
//!
//! Decides whether the connected wallet may view gated content.
//!
//! ## Sign-In Flow
//!
//! ```text
//! [Idle|Authorized|Denied] ──begin──→ [Signing] ──signature──→ [Verifying]
//!                                         │                        │
//!                               rejected / identity changed        ├──balance > 0──→ [Authorized]
//!                                         │                        ├──mismatch / 0──→ [Denied]
//!                                         ▼                        └──transient────→ rollback
//!                                     rollback
//! ```
//!
//! Busy (`Signing | Verifying`) is cleared on every exit path by a drop
//! guard. A second sign-in while busy fails with `AlreadyInProgress`
//! before the wallet is touched.
//!
//! ## Challenges
//!
//! - `ChallengePolicy::Static`: the constant `"GMN Verify"`. Any captured
//!   signature over it stays valid forever, for anyone who holds it.
//! - `ChallengePolicy::Nonce`: a per-attempt challenge bound to domain,
//!   address, chain and a single-use nonce with a time window.
//!
//! ## Revocation
//!
//! Authorization is bound to the session generation it was granted in.
//! Any account change, chain change or disconnect revokes it.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::tracing_notifier::TracingNotifier;
pub use domain::challenge::{Challenge, ChallengeIssuer, ChallengePolicy, STATIC_CHALLENGE};
pub use domain::errors::{InvalidTransition, SignInError};
pub use domain::notification::{Notification, NotificationKind};
pub use domain::outcome::GateOutcome;
pub use domain::state::{AuthMachine, AuthState};
pub use ports::inbound::{ContentGate, StaticGate};
pub use ports::outbound::{MemoryNotifier, NotificationSink};
pub use service::{GateConfig, TokenGate};
