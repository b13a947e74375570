//! Stats presentation: dashboard numbers and quiz grades.

use super::format_section_heading;
use crate::stats::{LearningStats, QuizScore, ScoreBand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_stats_text(stats: &LearningStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Learning Stats")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Streak".to_string(), stats.streak.to_string()]);
    table.add_row(vec![
        "Hours learned".to_string(),
        format!("{:.1}", stats.hours_learned),
    ]);
    table.add_row(vec![
        "Lessons completed".to_string(),
        format!("{} / {}", stats.lessons_completed, stats.total_lessons),
    ]);
    table.add_row(vec![
        "Daily goal".to_string(),
        format!("{}%", stats.daily_goal_pct),
    ]);
    table.add_row(vec![
        "Weekly progress".to_string(),
        format!("{}%", stats.weekly_progress_pct),
    ]);
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_quiz_score_text(score: &QuizScore) -> String {
    let band = score.band();
    let message = match band {
        ScoreBand::Excellent => format!("{}", band.message().green()),
        ScoreBand::Good => format!("{}", band.message().yellow()),
        ScoreBand::NeedsReview => format!("{}", band.message().red()),
    };
    format!(
        "Score: {}/{} ({}%)\n{}",
        score.correct,
        score.total,
        score.percentage(),
        message
    )
}
