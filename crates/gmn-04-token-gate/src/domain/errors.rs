use shared_bus::NonceError;
use shared_types::Address;
use thiserror::Error;

/// A state change the authorization machine does not allow.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid authorization transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub to: &'static str,
}

/// Why a sign-in attempt did not authorize.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignInError {
    #[error("Connect a wallet before signing in")]
    NoWalletConnected,

    #[error("A sign-in is already in progress")]
    AlreadyInProgress,

    #[error("Signature request was rejected: {0}")]
    SignatureRejected(String),

    #[error("Wallet could not sign: {0}")]
    SigningFailed(String),

    #[error("Signature was not produced by {0}")]
    AddressMismatch(Address),

    #[error("Token balance lookup failed: {0}")]
    BalanceQueryFailed(String),

    #[error("{0} does not hold the gating token")]
    NotAHolder(Address),

    #[error("Wallet identity changed during sign-in")]
    IdentityChanged,

    #[error("Challenge rejected: {0}")]
    InvalidChallenge(#[from] NonceError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

impl SignInError {
    /// Definitive denials. They settle the gate in `Denied` unless an
    /// earlier grant in the same session is still standing; everything
    /// else leaves the previous decision in place.
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::AddressMismatch(_) | Self::NotAHolder(_))
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoWalletConnected => "no_wallet",
            Self::AlreadyInProgress => "in_progress",
            Self::SignatureRejected(_) => "rejected",
            Self::SigningFailed(_) => "signing_failed",
            Self::AddressMismatch(_) => "mismatch",
            Self::BalanceQueryFailed(_) => "balance_error",
            Self::NotAHolder(_) => "no_balance",
            Self::IdentityChanged => "identity_changed",
            Self::InvalidChallenge(_) => "invalid_challenge",
            Self::Transition(_) => "invalid_transition",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_mismatch_and_zero_balance_are_denials() {
        assert!(SignInError::AddressMismatch(Address::ZERO).is_denial());
        assert!(SignInError::NotAHolder(Address::ZERO).is_denial());
        assert!(!SignInError::SignatureRejected("no".into()).is_denial());
        assert!(!SignInError::BalanceQueryFailed("timeout".into()).is_denial());
        assert!(!SignInError::IdentityChanged.is_denial());
    }

    #[test]
    fn test_transition_error_display() {
        let err = SignInError::from(InvalidTransition {
            from: "idle",
            to: "verifying",
        });
        assert_eq!(err.to_string(), "Invalid authorization transition: idle -> verifying");
    }
}
