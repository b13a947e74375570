//! Model Provider Abstraction
//!
//! The seam between the generation pipeline and the hosted text-generation
//! service. The pipeline only sees [`ModelProviderClient`]; the Gemini HTTP
//! client and the scripted [`MockProvider`] both implement it, so callers
//! choose the implementation at construction time.

use crate::error::{ApiError, GenerationError};
use crate::generation::GenerationParameters;
use async_trait::async_trait;
use std::sync::Arc;

pub mod gemini;
pub mod mock;
pub mod profile;

pub use gemini::GeminiClient;
pub use mock::MockProvider;
pub use profile::ProviderConfig;

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Send one prompt and return the raw reply text.
    ///
    /// Exactly one attempt; no retries.
    async fn complete(
        &self,
        prompt: &str,
        parameters: &GenerationParameters,
    ) -> Result<String, GenerationError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;

    /// Whether a credential is configured. Without one, `complete` fails
    /// with `GenerationError::NoCredential` and performs no I/O.
    fn has_credential(&self) -> bool;
}

/// Provider factory for creating provider clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(config: &ProviderConfig) -> Result<Arc<dyn ModelProviderClient>, ApiError> {
        Ok(Arc::new(GeminiClient::new(config)?))
    }
}
