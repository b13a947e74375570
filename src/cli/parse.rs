//! CLI parse: clap types for StudyForge. No behavior; definitions only.

use crate::generation::GenerationKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// StudyForge CLI - AI study aids with graceful fallbacks
#[derive(Parser)]
#[command(name = "studyforge")]
#[command(about = "Generate flashcards, summaries, quizzes and study plans from learning content")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Never contact the provider; every request returns fallback content
    #[arg(long, global = true)]
    pub offline: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one kind of study content
    Generate {
        /// What to generate
        #[arg(value_enum)]
        kind: KindArg,

        #[command(flatten)]
        input: InputArgs,

        /// JSON file with request context (profile, progress, goals, timeframe)
        #[arg(long)]
        context: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Ask the learning assistant a question
    Chat {
        /// Message to send
        message: String,

        /// JSON file with learner context
        #[arg(long)]
        context: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Flashcards, summary and quiz for the same content
    StudyPack {
        #[command(flatten)]
        input: InputArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Dashboard statistics from progress records
    Stats {
        /// JSON file holding an array of progress records
        #[arg(long)]
        progress: PathBuf,

        /// Reference time (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Grade answers against a quiz
    QuizScore {
        /// JSON file holding an array of quiz questions
        #[arg(long)]
        quiz: PathBuf,

        /// Comma-separated answers, as indexes (0-3) or letters (A-D)
        #[arg(long)]
        answers: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show resolved provider settings
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Write a default configuration file
    Init {
        /// Destination (default: global config path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Source content, given inline or read from a file.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct InputArgs {
    /// Content given inline
    #[arg(long)]
    pub text: Option<String>,

    /// File to read content from
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    FreeText,
    Flashcards,
    Summary,
    Quiz,
    Recommendations,
    ChatReply,
    ContentAnalysis,
    StudyPlan,
}

impl From<KindArg> for GenerationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::FreeText => GenerationKind::FreeText,
            KindArg::Flashcards => GenerationKind::Flashcards,
            KindArg::Summary => GenerationKind::Summary,
            KindArg::Quiz => GenerationKind::Quiz,
            KindArg::Recommendations => GenerationKind::Recommendations,
            KindArg::ChatReply => GenerationKind::ChatReply,
            KindArg::ContentAnalysis => GenerationKind::ContentAnalysis,
            KindArg::StudyPlan => GenerationKind::StudyPlan,
        }
    }
}
