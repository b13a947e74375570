//! Gemini `generateContent` client.
//!
//! One POST per call, key passed as the `key` query parameter. The reply
//! text is read from `candidates[0].content.parts[0].text`.

use super::profile::ProviderConfig;
use super::ModelProviderClient;
use crate::error::{ApiError, GenerationError};
use crate::generation::{GenerationParameters, SafetySetting};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest slice of an error body kept in a `NonSuccessStatus`.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: WireGenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, parameters: &'a GenerationParameters) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: WireGenerationConfig {
                temperature: parameters.temperature,
                top_k: parameters.top_k,
                top_p: parameters.top_p,
                max_output_tokens: parameters.max_output_tokens,
            },
            safety_settings: &parameters.safety_settings,
        }
    }
}

fn first_reply_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

// The request URL carries the key, so it is stripped before formatting.
fn map_transport_error(error: reqwest::Error) -> GenerationError {
    let error = error.without_url();
    if error.is_timeout() {
        GenerationError::TransportFailure(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        GenerationError::TransportFailure(format!("Connection error: {}", error))
    } else {
        GenerationError::TransportFailure(format!("HTTP error: {}", error))
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

pub(crate) fn build_provider_http_client(config: &ProviderConfig) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// Gemini provider client
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ApiError> {
        let client = build_provider_http_client(config)?;
        Ok(Self {
            client,
            model: config.model.clone(),
            api_key: config.credential().map(str::to_string),
            endpoint: config.endpoint_url(),
        })
    }
}

#[async_trait]
impl ModelProviderClient for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        parameters: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::NoCredential)?;
        let request = GenerateContentRequest::new(prompt, parameters);

        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::NonSuccessStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::UnparseableStructuredReply(format!("Invalid response envelope: {}", e))
        })?;

        first_reply_text(envelope).ok_or(GenerationError::EmptyReply)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
