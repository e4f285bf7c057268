//! # Shared Bus - Wallet Session Events
//!
//! Carries wallet lifecycle events from the session provider to every
//! component whose state depends on the connected identity.
//!
//! ```text
//! ┌────────────────┐    publish()     ┌──────────────┐   subscribe()   ┌────────────┐
//! │ SessionManager │ ───────────────→ │  Event Bus   │ ──────────────→ │ Token Gate │
//! └────────────────┘                  └──────────────┘                 └────────────┘
//! ```
//!
//! The crate also holds the time-bounded nonce cache that backs
//! single-use sign-in challenges.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod nonce_cache;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, SessionEvent, SessionEventKind};
pub use nonce_cache::{NonceError, TimeBoundedNonceCache};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
