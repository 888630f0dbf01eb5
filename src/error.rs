use thiserror::Error;

/// Error taxonomy for the review summary client.
#[derive(Error, Debug)]
pub enum ReviewSummaryError {
    /// Review directory unreachable or returned a malformed response.
    #[error("Network error: {0}")]
    Network(String),

    /// Generation call rejected: bad credential, quota, or content policy.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Persisted key-value read/write failure. Callers catch this locally,
    /// log it, and fall back to a default value.
    #[error("Local storage error: {0}")]
    LocalStorage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ReviewSummaryError>;
