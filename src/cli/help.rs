//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string used in log fields (e.g. "generate.quiz", "stats").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Generate { kind, .. } => {
            let kind: crate::generation::GenerationKind = (*kind).into();
            format!("generate.{}", kind.as_str())
        }
        Commands::Chat { .. } => "chat".to_string(),
        Commands::StudyPack { .. } => "study_pack".to_string(),
        Commands::Stats { .. } => "stats".to_string(),
        Commands::QuizScore { .. } => "quiz_score".to_string(),
        Commands::Status { .. } => "status".to_string(),
        Commands::Init { .. } => "init".to_string(),
    }
}
