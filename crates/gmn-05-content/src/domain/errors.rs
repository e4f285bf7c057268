use thiserror::Error;

/// Errors from the content subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("CMS returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No post with slug '{0}'")]
    NotFound(String),

    #[error("Invalid slug '{0}'")]
    InvalidSlug(String),

    #[error("Sign in with a token-holding wallet to view posts")]
    Locked,

    #[error("Invalid CMS configuration: {0}")]
    Config(String),
}

impl ContentError {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Http(_) => "http",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::NotFound(_) => "not_found",
            Self::InvalidSlug(_) => "invalid_slug",
            Self::Locked => "locked",
            Self::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Connection(e.to_string())
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}
