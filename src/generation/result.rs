//! Typed generation results, one variant per [`GenerationKind`].
//!
//! Item types deserialize from the field names the prompts ask the provider
//! for (`front`/`back`, `correctAnswer`, `type`, `keyTopics`, ...). Values
//! that deserialize but violate the item shape are rejected by
//! `is_well_formed` and dropped by the extractor.

use super::request::GenerationKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A study flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }
}

/// A four-option multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; 4],
    #[serde(rename = "correctAnswer", alias = "correctAnswerIndex")]
    pub correct_answer: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.iter().all(|o| !o.trim().is_empty())
            && self.correct_answer <= 3
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[usize::from(self.correct_answer.min(3))]
    }
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Case-insensitive parse; anything unrecognised is `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Priority::from_label(&label))
    }
}

/// A personalised learning recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.kind.trim().is_empty()
            && !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
    }
}

/// Estimated difficulty of a piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Intermediate,
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Difficulty::from_label(&label))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Minutes {
    Number(f64),
    Text(String),
}

// Models sometimes quote the number ("5") or add a unit ("5 minutes").
fn deserialize_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let minutes = match Minutes::deserialize(deserializer)? {
        Minutes::Number(minutes) => minutes,
        Minutes::Text(text) => {
            let number = text.split_whitespace().next().unwrap_or_default();
            number.parse::<f64>().map_err(|_| {
                serde::de::Error::custom(format!("invalid read time '{}'", text))
            })?
        }
    };
    if !minutes.is_finite() {
        return Ok(1);
    }
    Ok(minutes.round().clamp(1.0, f64::from(u32::MAX)) as u32)
}

/// Structured analysis of a piece of study content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub summary: String,
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "deserialize_minutes")]
    pub estimated_read_time: u32,
}

impl ContentAnalysis {
    pub fn is_well_formed(&self) -> bool {
        !self.summary.trim().is_empty()
            && !self.key_topics.is_empty()
            && self.key_topics.iter().all(|t| !t.trim().is_empty())
            && self.estimated_read_time >= 1
    }
}

/// One week of a study plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyWeek {
    pub week: u32,
    pub topics: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

/// A week-by-week study plan with general tips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub plan: Vec<StudyWeek>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl StudyPlan {
    pub fn is_well_formed(&self) -> bool {
        !self.plan.is_empty() && self.plan.iter().all(|w| !w.topics.is_empty())
    }
}

/// Result of a generation call, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GenerationResult {
    FreeText(String),
    Flashcards(Vec<Flashcard>),
    Summary(String),
    Quiz(Vec<QuizQuestion>),
    Recommendations(Vec<Recommendation>),
    ChatReply(String),
    ContentAnalysis(ContentAnalysis),
    StudyPlan(StudyPlan),
}

impl GenerationResult {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationResult::FreeText(_) => GenerationKind::FreeText,
            GenerationResult::Flashcards(_) => GenerationKind::Flashcards,
            GenerationResult::Summary(_) => GenerationKind::Summary,
            GenerationResult::Quiz(_) => GenerationKind::Quiz,
            GenerationResult::Recommendations(_) => GenerationKind::Recommendations,
            GenerationResult::ChatReply(_) => GenerationKind::ChatReply,
            GenerationResult::ContentAnalysis(_) => GenerationKind::ContentAnalysis,
            GenerationResult::StudyPlan(_) => GenerationKind::StudyPlan,
        }
    }

    /// Shape check for the variant: no blank text, no empty collections,
    /// no out-of-range answer indices.
    pub fn is_well_formed(&self) -> bool {
        match self {
            GenerationResult::FreeText(text)
            | GenerationResult::Summary(text)
            | GenerationResult::ChatReply(text) => !text.trim().is_empty(),
            GenerationResult::Flashcards(cards) => {
                !cards.is_empty() && cards.iter().all(Flashcard::is_well_formed)
            }
            GenerationResult::Quiz(questions) => {
                !questions.is_empty() && questions.iter().all(QuizQuestion::is_well_formed)
            }
            GenerationResult::Recommendations(recs) => {
                !recs.is_empty() && recs.iter().all(Recommendation::is_well_formed)
            }
            GenerationResult::ContentAnalysis(analysis) => analysis.is_well_formed(),
            GenerationResult::StudyPlan(plan) => plan.is_well_formed(),
        }
    }
}
