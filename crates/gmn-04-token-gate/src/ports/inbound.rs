//! # Inbound Ports (Driving Ports / API)

use std::sync::atomic::{AtomicBool, Ordering};

/// Answers whether gated content may be shown right now.
pub trait ContentGate: Send + Sync {
    fn can_view(&self) -> bool;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Gate with a fixed, switchable answer.
#[derive(Debug, Default)]
pub struct StaticGate {
    open: AtomicBool,
}

impl StaticGate {
    pub fn open() -> Self {
        Self {
            open: AtomicBool::new(true),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }

    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
    }
}

impl ContentGate for StaticGate {
    fn can_view(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}
