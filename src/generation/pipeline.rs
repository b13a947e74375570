//! Content generation pipeline: prompt -> provider call -> extraction ->
//! fallback.
//!
//! `generate` has no error path. Every fault (missing credential, transport,
//! status, unreadable reply) is logged and replaced by the fixed fallback
//! for the requested kind, so the returned variant always matches the
//! request and is well formed.

use super::extract;
use super::fallback;
use super::prompt::build_prompt;
use super::request::{
    learner_context, study_plan_context, GenerationKind, GenerationParameters, GenerationRequest,
};
use super::result::{
    ContentAnalysis, Flashcard, GenerationResult, QuizQuestion, Recommendation, StudyPlan,
};
use crate::error::{ApiError, GenerationError};
use crate::provider::{ModelProviderClient, ProviderConfig, ProviderFactory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Flashcards, summary and quiz generated from the same content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPack {
    pub flashcards: Vec<Flashcard>,
    pub summary: String,
    pub quiz: Vec<QuizQuestion>,
}

/// Stateless generation service. Cheap to clone and share across tasks.
#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn ModelProviderClient>,
    parameters: GenerationParameters,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn ModelProviderClient>, parameters: GenerationParameters) -> Self {
        Self {
            provider,
            parameters,
        }
    }

    /// Build a generator backed by the configured HTTP provider.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ApiError> {
        let provider = ProviderFactory::create_client(config)?;
        if !provider.has_credential() {
            warn!("No provider API key configured; all generation will use fallback content");
        }
        Ok(Self::new(provider, config.generation.clone()))
    }

    pub fn provider(&self) -> &dyn ModelProviderClient {
        self.provider.as_ref()
    }

    /// Start a request of `kind` carrying this generator's parameters.
    pub fn request(&self, kind: GenerationKind, source_text: impl Into<String>) -> GenerationRequest {
        GenerationRequest::new(kind, source_text).with_parameters(self.parameters.clone())
    }

    /// Turn a request into a result of the matching kind. Never fails.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let kind = request.kind;
        let started = Instant::now();

        match self.try_generate(request).await {
            Ok(result) if result.is_well_formed() => {
                info!(
                    kind = %kind,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Generation succeeded"
                );
                result
            }
            Ok(_) => {
                debug!(kind = %kind, "Extracted result failed shape check, using fallback");
                fallback::for_kind(kind, &request.source_text)
            }
            Err(err) => {
                log_fallback(kind, &err);
                fallback::for_kind(kind, &request.source_text)
            }
        }
    }

    async fn try_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let prompt = build_prompt(request);
        let reply = self.provider.complete(&prompt, &request.parameters).await?;
        extract::extract(request.kind, &reply)
    }

    pub async fn free_text(&self, prompt: &str) -> String {
        let request = self.request(GenerationKind::FreeText, prompt);
        match self.generate(&request).await {
            GenerationResult::FreeText(text) => text,
            _ => fallback::free_text(),
        }
    }

    pub async fn flashcards(&self, content: &str) -> Vec<Flashcard> {
        let request = self.request(GenerationKind::Flashcards, content);
        match self.generate(&request).await {
            GenerationResult::Flashcards(cards) => cards,
            _ => fallback::flashcards(),
        }
    }

    pub async fn summary(&self, content: &str) -> String {
        let request = self.request(GenerationKind::Summary, content);
        match self.generate(&request).await {
            GenerationResult::Summary(text) => text,
            _ => fallback::summary(),
        }
    }

    pub async fn quiz(&self, content: &str) -> Vec<QuizQuestion> {
        let request = self.request(GenerationKind::Quiz, content);
        match self.generate(&request).await {
            GenerationResult::Quiz(questions) => questions,
            _ => fallback::quiz(),
        }
    }

    pub async fn recommendations(&self, profile: &Value, progress: &Value) -> Vec<Recommendation> {
        let request = self
            .request(GenerationKind::Recommendations, "")
            .with_context(learner_context(profile, progress));
        match self.generate(&request).await {
            GenerationResult::Recommendations(recs) => recs,
            _ => fallback::recommendations(),
        }
    }

    pub async fn chat_reply(&self, message: &str, context: Option<&Value>) -> String {
        let mut request = self.request(GenerationKind::ChatReply, message);
        if let Some(ctx) = context {
            request = request.with_context(ctx.clone());
        }
        match self.generate(&request).await {
            GenerationResult::ChatReply(text) => text,
            _ => fallback::chat_reply(),
        }
    }

    pub async fn analyze_content(&self, content: &str) -> ContentAnalysis {
        let request = self.request(GenerationKind::ContentAnalysis, content);
        match self.generate(&request).await {
            GenerationResult::ContentAnalysis(analysis) => analysis,
            _ => fallback::content_analysis(content),
        }
    }

    pub async fn study_plan(&self, profile: &Value, goals: &[String], timeframe: &str) -> StudyPlan {
        let request = self
            .request(GenerationKind::StudyPlan, "")
            .with_context(study_plan_context(profile, goals, timeframe));
        match self.generate(&request).await {
            GenerationResult::StudyPlan(plan) => plan,
            _ => fallback::study_plan(),
        }
    }

    /// Flashcards, summary and quiz for one piece of content, requested
    /// concurrently as three independent calls.
    pub async fn study_pack(&self, content: &str) -> StudyPack {
        let (flashcards, summary, quiz) = futures::join!(
            self.flashcards(content),
            self.summary(content),
            self.quiz(content)
        );
        StudyPack {
            flashcards,
            summary,
            quiz,
        }
    }
}

fn log_fallback(kind: GenerationKind, err: &GenerationError) {
    match err {
        GenerationError::NoCredential => {
            warn!(kind = %kind, "No provider credential configured, using fallback content")
        }
        err if err.is_provider_fault() => {
            warn!(kind = %kind, error = %err, "Provider call failed, using fallback content")
        }
        err => {
            debug!(kind = %kind, error = %err, "Provider reply unusable, using fallback content")
        }
    }
}
