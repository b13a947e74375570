//! Scripted provider for tests and local experiments.

use super::ModelProviderClient;
use crate::error::GenerationError;
use crate::generation::GenerationParameters;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Serves scripted replies in order and records every prompt it receives.
///
/// Once the script is exhausted the last scripted reply is repeated; an
/// empty script behaves like a provider with no credential.
pub struct MockProvider {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    last: Mutex<Option<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    model_name: String,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    pub fn new(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            model_name: "mock-model".to_string(),
        }
    }

    /// Always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    /// Always fails with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }
}

#[async_trait]
impl ModelProviderClient for MockProvider {
    async fn complete(
        &self,
        prompt: &str,
        _parameters: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        lock(&self.prompts).push(prompt.to_string());

        let next = lock(&self.script).pop_front();
        let mut last = lock(&self.last);
        if let Some(reply) = next {
            *last = Some(reply);
        }
        last.clone().unwrap_or(Err(GenerationError::NoCredential))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn has_credential(&self) -> bool {
        true
    }
}
