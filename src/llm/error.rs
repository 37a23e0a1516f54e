//! Error types for the external generation collaborators.

use thiserror::Error;

/// Errors from the language-model and image providers
#[derive(Error, Debug)]
pub enum LlmError {
    /// API call failed
    #[error("API error: {0}")]
    Api(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Service responded without usable content
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Provider configuration problem
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for provider operations
pub type LlmResult<T> = Result<T, LlmError>;
