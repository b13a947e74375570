//! Fixed fallback values, one per generation kind.
//!
//! Returned whenever the provider is unavailable or its reply cannot be read
//! into the requested shape. All values satisfy the well-formedness rules of
//! [`GenerationResult::is_well_formed`].

use super::request::GenerationKind;
use super::result::{
    ContentAnalysis, Difficulty, Flashcard, GenerationResult, Priority, QuizQuestion,
    Recommendation, StudyPlan, StudyWeek,
};

pub const FREE_TEXT: &str = "I'm here to help with your learning journey! While I work on your \
request, feel free to explore the different study formats available to you.";

pub const SUMMARY: &str = "This content covers essential educational concepts and principles \
that are fundamental to understanding the subject matter. The material provides comprehensive \
coverage of key topics, practical applications, and real-world examples that demonstrate the \
importance of these concepts in academic and professional contexts.";

pub const CHAT_REPLY: &str = "That's an interesting question! I can't reach my study notes right \
now, but I can still help you plan your learning, review flashcards, or take a practice quiz. \
What would you like to work on?";

const ANALYSIS_SUMMARY: &str =
    "This content covers important educational concepts and provides valuable learning material.";

/// Characters of source text per estimated reading minute.
const CHARS_PER_MINUTE: usize = 200;

pub fn free_text() -> String {
    FREE_TEXT.to_string()
}

pub fn summary() -> String {
    SUMMARY.to_string()
}

pub fn chat_reply() -> String {
    CHAT_REPLY.to_string()
}

pub fn flashcards() -> Vec<Flashcard> {
    vec![
        Flashcard::new(
            "What is the main benefit of personalized learning?",
            "Personalized learning adapts to individual learning styles, pace, and preferences, \
             leading to better understanding and retention.",
        ),
        Flashcard::new(
            "How does AI enhance the learning experience?",
            "AI can provide personalized recommendations, adaptive content, intelligent tutoring, \
             and real-time feedback to optimize learning outcomes.",
        ),
        Flashcard::new(
            "Why combine several study formats?",
            "Mixing flashcards, summaries, quizzes and audio reinforces the same material through \
             different kinds of recall, which improves long-term retention.",
        ),
    ]
}

pub fn quiz() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            question: "What is the primary goal of personalized learning?".to_string(),
            options: [
                "To make learning faster".to_string(),
                "To adapt to individual learning needs and styles".to_string(),
                "To reduce study time".to_string(),
                "To eliminate the need for teachers".to_string(),
            ],
            correct_answer: 1,
            explanation: Some(
                "Personalized learning adapts educational content and methods to individual \
                 learning needs, styles, and pace."
                    .to_string(),
            ),
        },
        QuizQuestion {
            question: "How does AI contribute to modern education?".to_string(),
            options: [
                "By replacing human teachers".to_string(),
                "By providing personalized recommendations and adaptive content".to_string(),
                "By making education more expensive".to_string(),
                "By eliminating the need for studying".to_string(),
            ],
            correct_answer: 1,
            explanation: Some(
                "AI enhances education through personalized recommendations, adaptive content, \
                 and intelligent support systems."
                    .to_string(),
            ),
        },
    ]
}

pub fn recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            "course",
            "Complete Your Current Course",
            "Focus on finishing your current learning path to build momentum and achieve your goals.",
            Priority::High,
        ),
        Recommendation::new(
            "practice",
            "Daily Learning Habit",
            "Establish a consistent daily learning routine to improve retention and progress.",
            Priority::Medium,
        ),
        Recommendation::new(
            "network",
            "Connect with Peers",
            "Build your network by connecting with fellow students in your field.",
            Priority::Low,
        ),
    ]
}

/// Fallback analysis; the reading time is still derived from the source length.
pub fn content_analysis(source_text: &str) -> ContentAnalysis {
    let minutes = (source_text.chars().count() / CHARS_PER_MINUTE).max(1);
    ContentAnalysis {
        summary: ANALYSIS_SUMMARY.to_string(),
        key_topics: vec![
            "Key Concepts".to_string(),
            "Important Information".to_string(),
            "Learning Objectives".to_string(),
        ],
        difficulty: Difficulty::Intermediate,
        estimated_read_time: u32::try_from(minutes).unwrap_or(u32::MAX),
    }
}

pub fn study_plan() -> StudyPlan {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    StudyPlan {
        plan: vec![
            StudyWeek {
                week: 1,
                topics: strings(&["Foundation Concepts", "Basic Principles"]),
                activities: strings(&["Read introductory materials", "Complete practice exercises"]),
                goals: strings(&["Understand core concepts", "Complete initial assessments"]),
            },
            StudyWeek {
                week: 2,
                topics: strings(&["Intermediate Concepts", "Practical Applications"]),
                activities: strings(&["Work on projects", "Join study groups"]),
                goals: strings(&["Apply knowledge practically", "Collaborate with peers"]),
            },
        ],
        tips: strings(&[
            "Set aside dedicated study time each day",
            "Take regular breaks to maintain focus",
            "Practice active recall and spaced repetition",
            "Connect with fellow learners for support",
        ]),
    }
}

/// Fallback value for a kind.
pub fn for_kind(kind: GenerationKind, source_text: &str) -> GenerationResult {
    match kind {
        GenerationKind::FreeText => GenerationResult::FreeText(free_text()),
        GenerationKind::Flashcards => GenerationResult::Flashcards(flashcards()),
        GenerationKind::Summary => GenerationResult::Summary(summary()),
        GenerationKind::Quiz => GenerationResult::Quiz(quiz()),
        GenerationKind::Recommendations => GenerationResult::Recommendations(recommendations()),
        GenerationKind::ChatReply => GenerationResult::ChatReply(chat_reply()),
        GenerationKind::ContentAnalysis => {
            GenerationResult::ContentAnalysis(content_analysis(source_text))
        }
        GenerationKind::StudyPlan => GenerationResult::StudyPlan(study_plan()),
    }
}
