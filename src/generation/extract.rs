//! Result extraction from free-text provider replies.
//!
//! Structured kinds are read from the first `[` to the last `]` (or `{` to
//! `}` for object kinds). When that fails, a line-oriented heuristic is tried
//! where one exists. The caller substitutes the fallback on `Err`.

use super::request::GenerationKind;
use super::result::{
    ContentAnalysis, Flashcard, GenerationResult, QuizQuestion, Recommendation, StudyPlan,
};
use crate::error::GenerationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

lazy_static! {
    static ref LIST_NUMBER: Regex = Regex::new(r"^\d+\.?\s*").unwrap();
    static ref QUESTION_NUMBER: Regex =
        Regex::new(r"(?i)^(?:q(?:uestion)?\s*)?\d+\s*[\.\):]?\s*").unwrap();
    static ref OPTION_LINE: Regex = Regex::new(r"^\(?([A-Da-d])[\).:]\s+(.+)$").unwrap();
    static ref ANSWER_LINE: Regex =
        Regex::new(r"(?i)^(?:correct\s+)?answer\s*[:\-]\s*\(?([a-d])\b").unwrap();
    static ref EXPLANATION_LINE: Regex = Regex::new(r"(?i)^explanation\s*[:\-]\s*(.+)$").unwrap();
}

/// Substring from the first `[` to the last `]`, inclusive.
pub fn array_span(text: &str) -> Option<&str> {
    bracketed_span(text, '[', ']')
}

/// Substring from the first `{` to the last `}`, inclusive.
pub fn object_span(text: &str) -> Option<&str> {
    bracketed_span(text, '{', '}')
}

fn bracketed_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Reply text used verbatim; blank replies count as absent.
pub fn plain_text(reply: &str) -> Result<String, GenerationError> {
    if reply.trim().is_empty() {
        Err(GenerationError::EmptyReply)
    } else {
        Ok(reply.to_string())
    }
}

fn parse_array<T, F>(reply: &str, keep: F) -> Result<Vec<T>, GenerationError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let span = array_span(reply).ok_or_else(|| {
        GenerationError::UnparseableStructuredReply("no JSON array in reply".to_string())
    })?;
    let value: Value = serde_json::from_str(span)
        .map_err(|e| GenerationError::UnparseableStructuredReply(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(GenerationError::UnparseableStructuredReply(
            "reply JSON is not an array".to_string(),
        ));
    };
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<T>(item).ok())
        .filter(|item| keep(item))
        .collect();
    if parsed.len() < total {
        debug!(
            kept = parsed.len(),
            dropped = total - parsed.len(),
            "Dropped malformed items from structured reply"
        );
    }
    if parsed.is_empty() {
        Err(GenerationError::EmptyParsedResult)
    } else {
        Ok(parsed)
    }
}

fn parse_object<T, F>(reply: &str, keep: F) -> Result<T, GenerationError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let span = object_span(reply).ok_or_else(|| {
        GenerationError::UnparseableStructuredReply("no JSON object in reply".to_string())
    })?;
    let parsed: T = serde_json::from_str(span)
        .map_err(|e| GenerationError::UnparseableStructuredReply(e.to_string()))?;
    if keep(&parsed) {
        Ok(parsed)
    } else {
        Err(GenerationError::EmptyParsedResult)
    }
}

pub fn parse_flashcards(reply: &str) -> Result<Vec<Flashcard>, GenerationError> {
    parse_array(reply, Flashcard::is_well_formed)
}

pub fn parse_quiz(reply: &str) -> Result<Vec<QuizQuestion>, GenerationError> {
    parse_array(reply, QuizQuestion::is_well_formed)
}

pub fn parse_recommendations(reply: &str) -> Result<Vec<Recommendation>, GenerationError> {
    parse_array(reply, Recommendation::is_well_formed)
}

pub fn parse_content_analysis(reply: &str) -> Result<ContentAnalysis, GenerationError> {
    parse_object(reply, ContentAnalysis::is_well_formed)
}

pub fn parse_study_plan(reply: &str) -> Result<StudyPlan, GenerationError> {
    parse_object(reply, StudyPlan::is_well_formed)
}

/// Pair up non-blank lines as (front, back).
pub fn flashcards_from_text(text: &str) -> Vec<Flashcard> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines
        .chunks_exact(2)
        .map(|pair| Flashcard::new(LIST_NUMBER.replace(pair[0], "").trim(), pair[1]))
        .filter(Flashcard::is_well_formed)
        .collect()
}

#[derive(Default)]
struct QuestionDraft {
    question: String,
    options: Vec<String>,
    answer: Option<u8>,
    explanation: Option<String>,
}

impl QuestionDraft {
    fn new(line: &str) -> Self {
        Self {
            question: QUESTION_NUMBER.replace(line, "").trim().to_string(),
            ..Self::default()
        }
    }

    fn finish(self) -> Option<QuizQuestion> {
        let answer = self.answer?;
        let options: [String; 4] = self.options.try_into().ok()?;
        let question = QuizQuestion {
            question: self.question,
            options,
            correct_answer: answer,
            explanation: self.explanation,
        };
        question.is_well_formed().then_some(question)
    }
}

fn letter_index(letter: &str) -> Option<u8> {
    match letter.to_ascii_uppercase().as_str() {
        "A" => Some(0),
        "B" => Some(1),
        "C" => Some(2),
        "D" => Some(3),
        _ => None,
    }
}

/// Read question blocks of the form
///
/// ```text
/// 1. Question text?
/// A) option
/// B) option
/// C) option
/// D) option
/// Answer: B
/// Explanation: optional
/// ```
///
/// Blocks without exactly four lettered options and an answer are skipped.
pub fn quiz_from_text(text: &str) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();
    let mut current: Option<QuestionDraft> = None;

    for stripped in text.lines().map(strip_emphasis).filter(|line| !line.is_empty()) {
        let line = stripped.as_str();
        if let Some(caps) = OPTION_LINE.captures(line) {
            if let Some(draft) = current.as_mut() {
                let expected = draft.options.len();
                if letter_index(&caps[1]).map(usize::from) == Some(expected) {
                    draft.options.push(caps[2].trim().to_string());
                }
            }
            continue;
        }
        if let Some(caps) = ANSWER_LINE.captures(line) {
            if let Some(draft) = current.as_mut() {
                draft.answer = letter_index(&caps[1]);
            }
            continue;
        }
        if let Some(caps) = EXPLANATION_LINE.captures(line) {
            if let Some(draft) = current.as_mut() {
                draft.explanation = Some(caps[1].trim().to_string());
            }
            continue;
        }
        if let Some(finished) = current.take().and_then(QuestionDraft::finish) {
            questions.push(finished);
        }
        current = Some(QuestionDraft::new(line));
    }
    if let Some(finished) = current.and_then(QuestionDraft::finish) {
        questions.push(finished);
    }
    questions
}

/// `**Answer:** B` -> `Answer: B`
fn strip_emphasis(line: &str) -> String {
    line.replace("**", "")
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

/// Run the extraction chain for a kind: structured parse, then heuristic.
///
/// Returns the structured-parse error when no stage produced a result.
pub fn extract(
    kind: GenerationKind,
    reply: &str,
) -> Result<GenerationResult, GenerationError> {
    match kind {
        GenerationKind::FreeText => plain_text(reply).map(GenerationResult::FreeText),
        GenerationKind::Summary => plain_text(reply).map(GenerationResult::Summary),
        GenerationKind::ChatReply => plain_text(reply).map(GenerationResult::ChatReply),
        GenerationKind::Flashcards => parse_flashcards(reply)
            .or_else(|err| with_heuristic(kind, err, || flashcards_from_text(reply)))
            .map(GenerationResult::Flashcards),
        GenerationKind::Quiz => parse_quiz(reply)
            .or_else(|err| with_heuristic(kind, err, || quiz_from_text(reply)))
            .map(GenerationResult::Quiz),
        GenerationKind::Recommendations => {
            parse_recommendations(reply).map(GenerationResult::Recommendations)
        }
        GenerationKind::ContentAnalysis => {
            parse_content_analysis(reply).map(GenerationResult::ContentAnalysis)
        }
        GenerationKind::StudyPlan => parse_study_plan(reply).map(GenerationResult::StudyPlan),
    }
}

fn with_heuristic<T, F>(
    kind: GenerationKind,
    err: GenerationError,
    heuristic: F,
) -> Result<Vec<T>, GenerationError>
where
    F: FnOnce() -> Vec<T>,
{
    debug!(kind = %kind, error = %err, "Structured parse failed, trying text heuristic");
    let items = heuristic();
    if items.is_empty() {
        Err(err)
    } else {
        Ok(items)
    }
}
