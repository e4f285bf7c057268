//! # Session Snapshot

use shared_types::{Address, ChainId};

/// Identity of the active session at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub address: Address,
    pub chain_id: ChainId,
    pub generation: u64,
}

impl SessionSnapshot {
    /// Whether no lifecycle change happened since this snapshot was taken.
    pub fn is_current(&self, current_generation: u64) -> bool {
        self.generation == current_generation
    }
}
