//! Error types for translation backends and the chain runner

use thiserror::Error;

/// Errors raised by a single translation backend call
#[derive(Debug, Error)]
pub enum MtError {
    /// Backend could not be configured (missing or blank credential, bad client settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A language code failed validation
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Transport-level failure (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx but the body did not match the expected schema
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Text exceeds the per-request size the API accepts, in UTF-8 bytes
    #[error("Text exceeds maximum length of {max} bytes ({len} given)")]
    TextTooLong { len: usize, max: usize },
}

impl From<reqwest::Error> for MtError {
    /// The request URL carries the API key, so it never reaches the message
    fn from(err: reqwest::Error) -> Self {
        MtError::Network(err.without_url().to_string())
    }
}

/// Result type for backend operations
pub type MtResult<T> = Result<T, MtError>;

/// Errors raised while building or running a translation chain
#[derive(Debug, Error)]
pub enum ChainError {
    /// The chain or runner configuration is unusable
    #[error("Chain configuration error: {0}")]
    Config(String),

    /// Loading layered settings failed
    #[error("Failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    /// A hop failed; the remaining hops were not attempted
    #[error("Translation failed at step {step} ({source_code} → {target_code}): {source}")]
    Backend {
        step: usize,
        source_code: String,
        target_code: String,
        #[source]
        source: MtError,
    },
}

impl ChainError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Step index of the failing hop, if this is a backend failure
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            ChainError::Backend { step, .. } => Some(*step),
            _ => None,
        }
    }
}
