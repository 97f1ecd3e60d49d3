use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("AI did not return a valid image. It might have returned text instead: {snippet}...")]
    InvalidOutput { snippet: String },

    #[error("HTTP error: {0}")]
    Http(#[from] axum::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// Error reported by (or on the way to) the relay server, as seen from
    /// the client bridge. Carries the server's message verbatim.
    #[error("{0}")]
    Relay(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Builds the rejection for provider content that failed the image check,
    /// keeping the first 50 characters of the offending text for diagnostics.
    pub fn invalid_output(content: &str) -> Self {
        let snippet = content.chars().take(50).collect();
        Self::InvalidOutput { snippet }
    }

    pub fn relay(msg: impl Into<String>) -> Self {
        Self::Relay(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for errors that should map to HTTP 400 rather than 500.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
