//! # Wallet Errors

use gmn_03_chain_reader::ChainError;
use thiserror::Error;

/// Errors raised by a wallet signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the request in their wallet.
    #[error("User rejected the request: {0}")]
    Rejected(String),

    /// No wallet session is active.
    #[error("No wallet connected")]
    NotConnected,

    /// The provider exposes no accounts.
    #[error("Wallet exposes no accounts")]
    NoAccounts,

    /// The requested account is not managed by the provider.
    #[error("Account {0} is not available in this wallet")]
    UnknownAccount(String),

    /// The private key could not be parsed.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The provider failed for another reason.
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

impl WalletError {
    /// Recoverable by the user retrying.
    pub fn is_rejection(&self) -> bool {
        matches!(self, WalletError::Rejected(_))
    }
}

impl From<ChainError> for WalletError {
    fn from(e: ChainError) -> Self {
        if e.is_user_rejection() {
            WalletError::Rejected(e.to_string())
        } else {
            WalletError::Provider(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_rejection_maps_to_rejected() {
        let err: WalletError = ChainError::Rpc {
            code: 4001,
            message: "User denied message signature".into(),
        }
        .into();
        assert!(err.is_rejection());

        let err: WalletError = ChainError::Connection("refused".into()).into();
        assert!(matches!(err, WalletError::Provider(_)));
    }
}
