//! # Time-Bounded Nonce Cache
//!
//! Backs single-use sign-in challenges.
//!
//! ## Security Design
//!
//! - A nonce is only accepted if this cache issued it
//! - A nonce is accepted at most once
//! - The challenge timestamp must fall inside `[now - ttl, now + skew]`
//! - Issued and spent entries are garbage-collected after the validity window

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Errors from nonce cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NonceError {
    /// The nonce has already been used (replay attempt).
    #[error("Nonce {nonce} has already been used (replay attempt)")]
    NonceReused { nonce: Uuid },

    /// The nonce was never issued by this cache, or has expired.
    #[error("Nonce {nonce} was not issued or has expired")]
    UnknownNonce { nonce: Uuid },

    /// The challenge timestamp is too old.
    #[error("Challenge timestamp {timestamp} is too old (threshold: {threshold})")]
    MessageTooOld { timestamp: u64, threshold: u64 },

    /// The challenge timestamp is in the future.
    #[error("Challenge timestamp {timestamp} is in the future (threshold: {threshold})")]
    MessageFromFuture { timestamp: u64, threshold: u64 },
}

/// Time-bounded issue/consume cache for challenge nonces.
pub struct TimeBoundedNonceCache {
    /// Outstanding nonces -> issue timestamp.
    issued: HashMap<Uuid, u64>,

    /// Consumed nonces -> consume timestamp.
    spent: HashMap<Uuid, u64>,

    /// How long an issued challenge stays valid, in seconds.
    validity_window_secs: u64,

    /// Last garbage collection timestamp.
    last_gc: u64,

    /// Garbage collection interval in seconds.
    gc_interval_secs: u64,
}

impl TimeBoundedNonceCache {
    /// Default validity window: five minutes to sign a challenge.
    pub const DEFAULT_VALIDITY_WINDOW: u64 = 300;

    /// Default garbage collection interval.
    pub const DEFAULT_GC_INTERVAL: u64 = 30;

    /// Maximum future skew for valid timestamps.
    pub const MAX_FUTURE_SKEW: u64 = 10;

    /// Create a new nonce cache with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_VALIDITY_WINDOW, Self::DEFAULT_GC_INTERVAL)
    }

    /// Create a nonce cache with custom settings.
    #[must_use]
    pub fn with_config(validity_window_secs: u64, gc_interval_secs: u64) -> Self {
        Self {
            issued: HashMap::new(),
            spent: HashMap::new(),
            validity_window_secs,
            last_gc: Self::current_timestamp(),
            gc_interval_secs,
        }
    }

    /// Issue a fresh nonce, returning it with its issue timestamp.
    pub fn issue(&mut self) -> (Uuid, u64) {
        let now = Self::current_timestamp();
        self.maybe_gc(now);

        let nonce = Uuid::new_v4();
        self.issued.insert(nonce, now);
        (nonce, now)
    }

    /// Validate the timestamp and consume the nonce atomically.
    ///
    /// # Errors
    ///
    /// - `NonceError::MessageTooOld` - timestamp older than the validity window
    /// - `NonceError::MessageFromFuture` - timestamp beyond the allowed skew
    /// - `NonceError::NonceReused` - nonce was already consumed
    /// - `NonceError::UnknownNonce` - nonce was never issued or expired
    pub fn consume(&mut self, nonce: Uuid, timestamp: u64) -> Result<(), NonceError> {
        let now = Self::current_timestamp();

        // Timestamp check comes first; it bounds everything else.
        let min_valid_timestamp = now.saturating_sub(self.validity_window_secs);
        let max_valid_timestamp = now.saturating_add(Self::MAX_FUTURE_SKEW);

        if timestamp < min_valid_timestamp {
            return Err(NonceError::MessageTooOld {
                timestamp,
                threshold: min_valid_timestamp,
            });
        }

        if timestamp > max_valid_timestamp {
            return Err(NonceError::MessageFromFuture {
                timestamp,
                threshold: max_valid_timestamp,
            });
        }

        self.maybe_gc(now);

        if self.spent.contains_key(&nonce) {
            return Err(NonceError::NonceReused { nonce });
        }

        if self.issued.remove(&nonce).is_none() {
            return Err(NonceError::UnknownNonce { nonce });
        }

        self.spent.insert(nonce, now);
        Ok(())
    }

    /// Check if a nonce is outstanding (issued, not yet consumed).
    #[must_use]
    pub fn is_outstanding(&self, nonce: &Uuid) -> bool {
        self.issued.contains_key(nonce)
    }

    /// Number of outstanding nonces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Check if no nonce is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn maybe_gc(&mut self, now: u64) {
        if now.saturating_sub(self.last_gc) > self.gc_interval_secs {
            self.garbage_collect(now);
            self.last_gc = now;
        }
    }

    /// Remove expired nonces from the cache.
    fn garbage_collect(&mut self, now: u64) {
        let expiry_threshold = now.saturating_sub(self.validity_window_secs);
        self.issued.retain(|_, &mut ts| ts > expiry_threshold);
        self.spent.retain(|_, &mut ts| ts > expiry_threshold);
    }

    /// Get current Unix timestamp.
    pub fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

impl Default for TimeBoundedNonceCache {
    fn default() -> Self {
        Self::new()
    }
}
