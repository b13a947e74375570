//! Generation requests: kind tag, source text, opaque context and the fixed
//! sampling/safety parameters sent with every provider call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Which structured-output contract a request/result pair must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    FreeText,
    Flashcards,
    Summary,
    Quiz,
    Recommendations,
    ChatReply,
    ContentAnalysis,
    StudyPlan,
}

impl GenerationKind {
    pub const ALL: [GenerationKind; 8] = [
        GenerationKind::FreeText,
        GenerationKind::Flashcards,
        GenerationKind::Summary,
        GenerationKind::Quiz,
        GenerationKind::Recommendations,
        GenerationKind::ChatReply,
        GenerationKind::ContentAnalysis,
        GenerationKind::StudyPlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::FreeText => "free_text",
            GenerationKind::Flashcards => "flashcards",
            GenerationKind::Summary => "summary",
            GenerationKind::Quiz => "quiz",
            GenerationKind::Recommendations => "recommendations",
            GenerationKind::ChatReply => "chat_reply",
            GenerationKind::ContentAnalysis => "content_analysis",
            GenerationKind::StudyPlan => "study_plan",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content-safety threshold sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn new(category: impl Into<String>, threshold: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            threshold: threshold.into(),
        }
    }
}

/// Sampling and safety parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_safety_settings")]
    pub safety_settings: Vec<SafetySetting>,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_safety_settings() -> Vec<SafetySetting> {
    [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ]
    .into_iter()
    .map(|category| SafetySetting::new(category, "BLOCK_MEDIUM_AND_ABOVE"))
    .collect()
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            safety_settings: default_safety_settings(),
        }
    }
}

impl GenerationParameters {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(format!("top_p must be between 0.0 and 1.0, got {}", self.top_p));
        }
        if self.top_k == 0 {
            return Err("top_k must be greater than 0".to_string());
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// A single generation request. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: GenerationKind,
    pub source_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default)]
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    pub fn new(kind: GenerationKind, source_text: impl Into<String>) -> Self {
        Self {
            kind,
            source_text: source_text.into(),
            context: None,
            parameters: GenerationParameters::default(),
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Look up a top-level field of the context blob.
    pub fn context_field(&self, key: &str) -> Option<&Value> {
        self.context.as_ref().and_then(|ctx| ctx.get(key))
    }
}

/// Context blob for recommendation and chat requests.
pub fn learner_context(profile: &Value, progress: &Value) -> Value {
    json!({
        "profile": profile,
        "progress": progress,
    })
}

/// Context blob for study-plan requests.
pub fn study_plan_context(profile: &Value, goals: &[String], timeframe: &str) -> Value {
    json!({
        "profile": profile,
        "goals": goals,
        "timeframe": timeframe,
    })
}
