//! Prompt construction: one instruction string per generation kind.

use super::request::{GenerationKind, GenerationRequest};
use serde_json::Value;

/// Persona directive for the chat assistant.
pub const PERSONA: &str = "You are Sage, the friendly AI learning companion for the StudyForge \
platform. You help students with their learning journey, provide study tips, answer questions, \
and offer motivation.";

const ASSISTANT_NAME: &str = "Sage, the AI learning companion for the StudyForge platform";

/// Build the prompt sent to the provider for a request.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let source = request.source_text.trim();
    match request.kind {
        GenerationKind::FreeText => free_text_prompt(source, request.context.as_ref()),
        GenerationKind::Flashcards => flashcards_prompt(source),
        GenerationKind::Summary => summary_prompt(source),
        GenerationKind::Quiz => quiz_prompt(source),
        GenerationKind::Recommendations => recommendations_prompt(request),
        GenerationKind::ChatReply => chat_prompt(source, request.context.as_ref()),
        GenerationKind::ContentAnalysis => content_analysis_prompt(source),
        GenerationKind::StudyPlan => study_plan_prompt(request),
    }
}

/// Serialize a context value for embedding; bare strings are embedded as-is.
pub fn render_context(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_field(request: &GenerationRequest, key: &str) -> String {
    request
        .context_field(key)
        .map(render_context)
        .unwrap_or_else(|| "null".to_string())
}

fn free_text_prompt(source: &str, context: Option<&Value>) -> String {
    match context {
        Some(ctx) => format!(
            "Context: {}\n\nUser Question: {}\n\nPlease provide a helpful, educational response as {}.",
            render_context(ctx),
            source,
            ASSISTANT_NAME
        ),
        None => format!("As {}, please respond to: {}", ASSISTANT_NAME, source),
    }
}

fn flashcards_prompt(source: &str) -> String {
    format!(
        "Based on the following educational content, generate 5-8 high-quality flashcards for studying.\n\
         Each flashcard should have a clear question on the front and a comprehensive answer on the back.\n\
         Focus on key concepts, definitions, and important facts.\n\n\
         Content: {}\n\n\
         Please format your response as a JSON array with objects containing \"front\" and \"back\" properties.\n\
         Example: [{{\"front\": \"What is...?\", \"back\": \"The answer is...\"}}]",
        source
    )
}

fn summary_prompt(source: &str) -> String {
    format!(
        "Please create a comprehensive yet concise summary of the following educational content.\n\
         The summary should:\n\
         - Highlight the main concepts and key points\n\
         - Be well-structured and easy to understand\n\
         - Include important details while remaining accessible\n\
         - Be suitable for study and review purposes\n\n\
         Content: {}",
        source
    )
}

fn quiz_prompt(source: &str) -> String {
    format!(
        "Based on the following educational content, create 5 multiple-choice quiz questions.\n\
         Each question should have 4 options with only one correct answer.\n\
         Include brief explanations for the correct answers.\n\n\
         Content: {}\n\n\
         Format as JSON array: [{{\"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \
         \"correctAnswer\": 0, \"explanation\": \"...\"}}]",
        source
    )
}

fn recommendations_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Based on the following user profile and learning progress, provide 3-5 personalized learning recommendations.\n\n\
         User Profile: {}\n\
         Learning Progress: {}\n\n",
        render_field(request, "profile"),
        render_field(request, "progress")
    );
    let note = request.source_text.trim();
    if !note.is_empty() {
        prompt.push_str(&format!("Additional notes: {}\n\n", note));
    }
    prompt.push_str(
        "Consider their interests, skills, university, major, and current progress to suggest \
         relevant learning paths, courses, or activities.\n\
         Format as JSON array: [{\"type\": \"course\", \"title\": \"...\", \"description\": \"...\", \
         \"priority\": \"high\"}] where priority is one of high, medium, low.",
    );
    prompt
}

fn chat_prompt(message: &str, context: Option<&Value>) -> String {
    let context_line = context
        .map(|ctx| format!("User context: {}\n\n", render_context(ctx)))
        .unwrap_or_default();
    format!(
        "{}\n\n{}User message: {}\n\n\
         Respond in a helpful, encouraging, and educational manner. \
         Keep responses conversational but informative.",
        PERSONA, context_line, message
    )
}

fn content_analysis_prompt(source: &str) -> String {
    format!(
        "Analyze the following educational content and provide:\n\
         1. A brief summary\n\
         2. Key topics covered (as an array)\n\
         3. Difficulty level (beginner/intermediate/advanced)\n\
         4. Estimated reading time in minutes\n\n\
         Content: {}\n\n\
         Format as JSON: {{\"summary\": \"...\", \"keyTopics\": [\"...\"], \"difficulty\": \"beginner\", \
         \"estimatedReadTime\": 5}}",
        source
    )
}

fn study_plan_prompt(request: &GenerationRequest) -> String {
    let goals = match request.context_field("goals") {
        Some(Value::Array(items)) => items
            .iter()
            .map(render_context)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => render_context(other),
        None => request.source_text.trim().to_string(),
    };
    format!(
        "Create a personalized study plan based on:\n\
         - User Profile: {}\n\
         - Learning Goals: {}\n\
         - Timeframe: {}\n\n\
         Provide a week-by-week breakdown with topics, activities, and goals.\n\
         Include study tips and best practices.\n\n\
         Format as JSON: {{\"plan\": [{{\"week\": 1, \"topics\": [\"...\"], \"activities\": [\"...\"], \
         \"goals\": [\"...\"]}}], \"tips\": [\"...\"]}}",
        render_field(request, "profile"),
        goals,
        render_field(request, "timeframe")
    )
}
