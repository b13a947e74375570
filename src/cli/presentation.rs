//! CLI presentation: text formatters for command results. JSON output is
//! plain serde and lives in the route.

use owo_colors::OwoColorize;

mod generation;
mod stats;
mod status;

pub use generation::{format_result_text, format_study_pack_text};
pub use stats::{format_quiz_score_text, format_stats_text};
pub use status::{format_init_summary, format_status_text, StatusOutput};

/// Bold, underlined section title.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}
