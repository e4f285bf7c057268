//! # Chain Errors

use shared_types::ParseError;
use thiserror::Error;

/// EIP-1193 code wallets return when the user declines a request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors from talking to a chain node.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The node could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Transport-level failure (timeout, TLS, HTTP status).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The node answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A contract call returned no data or too little data.
    #[error("Contract call returned malformed data: {0}")]
    MalformedReturn(String),

    /// The receipt did not appear within the polling budget.
    #[error("Transaction {tx_hash} not mined after {attempts} polls")]
    ReceiptTimeout { tx_hash: String, attempts: u32 },

    /// The client could not be constructed.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ChainError {
    /// Whether the error is a user declining the request in their wallet.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, ChainError::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }
}

impl From<ParseError> for ChainError {
    fn from(e: ParseError) -> Self {
        ChainError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ChainError::Connection(e.to_string())
        } else if e.is_decode() {
            ChainError::Parse(e.to_string())
        } else {
            ChainError::Http(e.to_string())
        }
    }
}
