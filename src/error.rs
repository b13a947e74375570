//! Error types for StudyForge.
//!
//! Two families live here. `ApiError` covers everything the CLI and the
//! configuration layer can report to a user. `GenerationError` is the fault
//! taxonomy of the generation pipeline; it crosses the provider seam but is
//! always converted into a fallback value before reaching a caller of
//! [`crate::generation::ContentGenerator`].

use thiserror::Error;

/// Application-level errors (configuration, I/O, CLI input)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::ConfigError(format!("Failed to render TOML: {}", err))
    }
}

/// Faults that can occur while producing a generation result.
///
/// Every variant collapses to the kind-specific fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("No provider credential configured")]
    NoCredential,

    #[error("Provider transport failure: {0}")]
    TransportFailure(String),

    #[error("Provider returned status {status}: {body}")]
    NonSuccessStatus { status: u16, body: String },

    #[error("Provider reply contained no text")]
    EmptyReply,

    #[error("Structured reply could not be parsed: {0}")]
    UnparseableStructuredReply(String),

    #[error("Structured reply parsed to an empty result")]
    EmptyParsedResult,
}

impl GenerationError {
    /// True for faults raised before or during the provider round-trip,
    /// as opposed to faults in reading the reply.
    pub fn is_provider_fault(&self) -> bool {
        matches!(
            self,
            GenerationError::NoCredential
                | GenerationError::TransportFailure(_)
                | GenerationError::NonSuccessStatus { .. }
        )
    }
}
