//! Learner dashboard statistics and quiz grading.
//!
//! Pure functions over progress records as stored by the backend; the clock
//! is always passed in.

use crate::generation::QuizQuestion;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lessons per day that count as a full daily goal.
pub const DAILY_GOAL_LESSONS: usize = 5;
/// Lessons per week that count as full weekly progress.
pub const WEEKLY_GOAL_LESSONS: usize = 20;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// One lesson's watch progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub lesson_id: String,
    #[serde(default)]
    pub completed: bool,
    /// Seconds watched
    #[serde(default)]
    pub watched_duration: u64,
    #[serde(alias = "last_watched")]
    pub last_watched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStats {
    pub streak: usize,
    pub hours_learned: f64,
    pub lessons_completed: usize,
    pub total_lessons: usize,
    pub daily_goal_pct: u32,
    pub weekly_progress_pct: u32,
}

impl LearningStats {
    pub fn compute(records: &[ProgressRecord], now: DateTime<Utc>) -> Self {
        let streak = records
            .iter()
            .filter(|r| within_one_day(r.last_watched_at, now))
            .count();

        let total_seconds: u64 = records.iter().map(|r| r.watched_duration).sum();
        let hours_learned = (total_seconds as f64 / 3600.0 * 10.0).round() / 10.0;

        let today = now.date_naive();
        let touched_today = records
            .iter()
            .filter(|r| r.last_watched_at.date_naive() == today)
            .count();

        let week_start = start_of_week(now);
        let touched_this_week = records
            .iter()
            .filter(|r| r.last_watched_at >= week_start)
            .count();

        Self {
            streak,
            hours_learned,
            lessons_completed: records.iter().filter(|r| r.completed).count(),
            total_lessons: records.len(),
            daily_goal_pct: capped_percentage(touched_today, DAILY_GOAL_LESSONS),
            weekly_progress_pct: capped_percentage(touched_this_week, WEEKLY_GOAL_LESSONS),
        }
    }
}

// Difference rounded up to whole days must not exceed one.
fn within_one_day(at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - at).num_milliseconds().abs() <= MILLIS_PER_DAY
}

/// Sunday 00:00 UTC of the week containing `now`.
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_sunday = i64::from(now.weekday().num_days_from_sunday());
    let sunday = now.date_naive() - Duration::days(days_since_sunday);
    sunday.and_time(NaiveTime::MIN).and_utc()
}

fn capped_percentage(count: usize, goal: usize) -> u32 {
    let pct = (count as f64 / goal as f64 * 100.0).round();
    pct.min(100.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsReview,
}

impl ScoreBand {
    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent work!",
            ScoreBand::Good => "Good job!",
            ScoreBand::NeedsReview => "Keep studying!",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::NeedsReview => "needs review",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    /// Answers are option indexes in question order; missing answers count
    /// as wrong and extra answers are ignored.
    pub fn grade(questions: &[QuizQuestion], answers: &[u8]) -> Self {
        let correct = questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.correct_answer == **answer)
            .count();
        Self {
            correct,
            total: questions.len(),
        }
    }

    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub fn band(&self) -> ScoreBand {
        match self.percentage() {
            pct if pct >= 80 => ScoreBand::Excellent,
            pct if pct >= 60 => ScoreBand::Good,
            _ => ScoreBand::NeedsReview,
        }
    }
}
