//! Generation presentation: one formatter per result kind.

use super::format_section_heading;
use crate::generation::{
    ContentAnalysis, Flashcard, GenerationResult, QuizQuestion, Recommendation, StudyPack,
    StudyPlan,
};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn format_result_text(result: &GenerationResult) -> String {
    match result {
        GenerationResult::FreeText(text)
        | GenerationResult::Summary(text)
        | GenerationResult::ChatReply(text) => text.clone(),
        GenerationResult::Flashcards(cards) => format_flashcards(cards),
        GenerationResult::Quiz(questions) => format_quiz(questions),
        GenerationResult::Recommendations(recs) => format_recommendations(recs),
        GenerationResult::ContentAnalysis(analysis) => format_analysis(analysis),
        GenerationResult::StudyPlan(plan) => format_study_plan(plan),
    }
}

pub fn format_study_pack_text(pack: &StudyPack) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Summary")));
    out.push_str(&format!("{}\n\n", pack.summary));
    out.push_str(&format!("{}\n\n", format_section_heading("Flashcards")));
    out.push_str(&format!("{}\n\n", format_flashcards(&pack.flashcards)));
    out.push_str(&format!("{}\n\n", format_section_heading("Quiz")));
    out.push_str(&format_quiz(&pack.quiz));
    out
}

fn format_flashcards(cards: &[Flashcard]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Front", "Back"]);
    for (i, card) in cards.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), card.front.clone(), card.back.clone()]);
    }
    table.to_string()
}

fn format_quiz(questions: &[QuizQuestion]) -> String {
    let mut blocks = Vec::with_capacity(questions.len());
    for (i, q) in questions.iter().enumerate() {
        let mut block = format!("{}. {}\n", i + 1, q.question);
        for (letter, option) in OPTION_LETTERS.iter().zip(q.options.iter()) {
            block.push_str(&format!("   {}) {}\n", letter, option));
        }
        let answer = OPTION_LETTERS[usize::from(q.correct_answer.min(3))];
        block.push_str(&format!("   Answer: {}", answer));
        if let Some(ref explanation) = q.explanation {
            block.push_str(&format!("\n   Why: {}", explanation));
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}

fn format_recommendations(recs: &[Recommendation]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Priority", "Type", "Title", "Description"]);
    for rec in recs {
        table.add_row(vec![
            rec.priority.as_str().to_string(),
            rec.kind.clone(),
            rec.title.clone(),
            rec.description.clone(),
        ]);
    }
    table.to_string()
}

fn format_analysis(analysis: &ContentAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Content Analysis")));
    out.push_str(&format!("  Difficulty: {}\n", analysis.difficulty.as_str()));
    out.push_str(&format!(
        "  Estimated read time: {} min\n\n",
        analysis.estimated_read_time
    ));
    out.push_str(&format!("{}\n\n", analysis.summary));
    out.push_str("Key topics:\n");
    for topic in &analysis.key_topics {
        out.push_str(&format!("  - {}\n", topic));
    }
    out
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("  {}:\n", label));
    for item in items {
        out.push_str(&format!("    - {}\n", item));
    }
}

fn format_study_plan(plan: &StudyPlan) -> String {
    let mut out = String::new();
    for week in &plan.plan {
        out.push_str(&format!(
            "{}\n",
            format_section_heading(&format!("Week {}", week.week))
        ));
        push_list(&mut out, "Topics", &week.topics);
        push_list(&mut out, "Activities", &week.activities);
        push_list(&mut out, "Goals", &week.goals);
        out.push('\n');
    }
    if !plan.tips.is_empty() {
        out.push_str(&format!("{}\n", format_section_heading("Tips")));
        for tip in &plan.tips {
            out.push_str(&format!("  - {}\n", tip));
        }
    }
    out
}
