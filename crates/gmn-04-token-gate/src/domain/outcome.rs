use serde::Serialize;
use shared_types::Address;

/// Result of evaluating a signature against the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Signer matches and holds a positive balance.
    Authorized { address: Address },

    /// Signer matches but holds nothing.
    DeniedNoBalance { address: Address },

    /// Signature does not recover to the claimed address.
    DeniedMismatch {
        expected: Address,
        recovered: Option<Address>,
    },

    /// The balance could not be read. Not a decision.
    ErrorTransient { reason: String },
}

impl GateOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized { .. })
    }

    pub fn is_denied(&self) -> bool {
        matches!(
            self,
            Self::DeniedNoBalance { .. } | Self::DeniedMismatch { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Authorized { .. } => "authorized",
            Self::DeniedNoBalance { .. } => "no_balance",
            Self::DeniedMismatch { .. } => "mismatch",
            Self::ErrorTransient { .. } => "transient_error",
        }
    }
}
