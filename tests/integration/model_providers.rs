//! Integration tests for the Gemini provider and the generation pipeline over real HTTP

use crate::integration::test_utils::{envelope, FakeProvider};
use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;
use studyforge::error::GenerationError;
use studyforge::generation::{fallback, ContentGenerator, Flashcard, GenerationParameters};
use studyforge::provider::{GeminiClient, ModelProviderClient, ProviderConfig};

#[tokio::test]
async fn test_summary_reply_is_returned_verbatim() {
    let server = FakeProvider::replying("Mitosis splits one cell into two identical cells.").await;
    let generator = ContentGenerator::from_config(&server.provider_config(Some("test-key"))).unwrap();

    let summary = generator.summary("Notes on cell division").await;
    assert_eq!(summary, "Mitosis splits one cell into two identical cells.");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/v1beta/models/test-model:generateContent");
    assert_eq!(request.query.get("key").map(String::as_str), Some("test-key"));

    let prompt = request.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Notes on cell division"));
    assert_eq!(request.body["generationConfig"]["topK"], 40);
    assert_eq!(request.body["generationConfig"]["maxOutputTokens"], 1024);
    assert_eq!(request.body["safetySettings"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_server_error_yields_fallback() {
    let server = FakeProvider::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"code": 500, "message": "internal"}}).to_string(),
        Duration::ZERO,
    )
    .await;
    let generator = ContentGenerator::from_config(&server.provider_config(Some("test-key"))).unwrap();

    assert_eq!(generator.summary("anything").await, fallback::SUMMARY);
    assert_eq!(generator.flashcards("anything").await, fallback::flashcards());
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_non_success_status_carries_code_and_body() {
    let server = FakeProvider::start(
        StatusCode::TOO_MANY_REQUESTS,
        "quota exceeded".to_string(),
        Duration::ZERO,
    )
    .await;
    let client = GeminiClient::new(&server.provider_config(Some("test-key"))).unwrap();

    let result = client
        .complete("prompt", &GenerationParameters::default())
        .await;
    assert_eq!(
        result,
        Err(GenerationError::NonSuccessStatus {
            status: 429,
            body: "quota exceeded".to_string(),
        })
    );
}

#[tokio::test]
async fn test_flashcards_parsed_from_fenced_reply() {
    let reply = "Here are your flashcards:\n```json\n[{\"front\": \"Q1\", \"back\": \"A1\"}, {\"front\": \"Q2\", \"back\": \"A2\"}]\n```";
    let server = FakeProvider::replying(reply).await;
    let generator = ContentGenerator::from_config(&server.provider_config(Some("test-key"))).unwrap();

    let cards = generator.flashcards("notes").await;
    assert_eq!(cards, vec![Flashcard::new("Q1", "A1"), Flashcard::new("Q2", "A2")]);
}

#[tokio::test]
async fn test_envelope_without_candidates_yields_fallback() {
    let server = FakeProvider::start(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
        Duration::ZERO,
    )
    .await;
    let client = GeminiClient::new(&server.provider_config(Some("test-key"))).unwrap();
    let result = client
        .complete("prompt", &GenerationParameters::default())
        .await;
    assert_eq!(result, Err(GenerationError::EmptyReply));

    let generator = ContentGenerator::from_config(&server.provider_config(Some("test-key"))).unwrap();
    assert_eq!(generator.quiz("notes").await, fallback::quiz());
}

#[tokio::test]
async fn test_slow_provider_times_out_to_fallback() {
    let server = FakeProvider::start(
        StatusCode::OK,
        envelope("too late").to_string(),
        Duration::from_secs(3),
    )
    .await;
    let config = ProviderConfig {
        connect_timeout_secs: 1,
        request_timeout_secs: 1,
        ..server.provider_config(Some("test-key"))
    };
    let generator = ContentGenerator::from_config(&config).unwrap();

    assert_eq!(generator.summary("notes").await, fallback::SUMMARY);
}

#[tokio::test]
async fn test_missing_key_never_contacts_server() {
    let server = FakeProvider::replying("should not be used").await;
    let generator = ContentGenerator::from_config(&server.provider_config(None)).unwrap();

    assert_eq!(generator.chat_reply("hello", None).await, fallback::CHAT_REPLY);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_transport_error_does_not_leak_key() {
    let config = ProviderConfig {
        api_key: Some("super-secret-key".to_string()),
        base_url: "http://127.0.0.1:1/v1beta/models".to_string(),
        connect_timeout_secs: 1,
        request_timeout_secs: 2,
        ..ProviderConfig::default()
    };
    let client = GeminiClient::new(&config).unwrap();
    match client
        .complete("prompt", &GenerationParameters::default())
        .await
    {
        Err(GenerationError::TransportFailure(message)) => {
            assert!(!message.contains("super-secret-key"), "{}", message);
        }
        other => panic!("expected transport failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_prompt_carries_persona_and_context() {
    let server = FakeProvider::replying("Try spaced repetition!").await;
    let generator = ContentGenerator::from_config(&server.provider_config(Some("test-key"))).unwrap();
    let context = json!({"major": "Biology", "streak": 4});

    let reply = generator
        .chat_reply("How do I remember enzyme names?", Some(&context))
        .await;
    assert_eq!(reply, "Try spaced repetition!");

    let requests = server.requests();
    let prompt = requests[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("Sage"));
    assert!(prompt.contains(&context.to_string()));
    assert!(prompt.contains("How do I remember enzyme names?"));
}

#[tokio::test]
async fn test_study_pack_issues_three_requests() {
    let server = FakeProvider::replying("plain prose without structure").await;
    let generator = ContentGenerator::from_config(&server.provider_config(Some("test-key"))).unwrap();

    let pack = generator.study_pack("notes").await;
    assert_eq!(server.requests().len(), 3);
    assert_eq!(pack.summary, "plain prose without structure");
    // one line of prose cannot form a question/answer pair
    assert_eq!(pack.flashcards, fallback::flashcards());
    assert_eq!(pack.quiz, fallback::quiz());
}
