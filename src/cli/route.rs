//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::help::command_name;
use crate::cli::output::to_json;
use crate::cli::parse::{Commands, InputArgs, KindArg};
use crate::cli::presentation::{
    format_init_summary, format_quiz_score_text, format_result_text, format_stats_text,
    format_status_text, format_study_pack_text, StatusOutput,
};
use crate::config::{ConfigLoader, StudyForgeConfig};
use crate::error::ApiError;
use crate::generation::{ContentGenerator, GenerationKind, QuizQuestion};
use crate::provider::MockProvider;
use crate::stats::{LearningStats, ProgressRecord, QuizScore};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved config, generator, and the
/// Tokio runtime that drives generation futures.
pub struct RunContext {
    config: StudyForgeConfig,
    config_path: Option<PathBuf>,
    generator: ContentGenerator,
    offline: bool,
    runtime: Runtime,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>, offline: bool) -> Result<Self, ApiError> {
        let config = ConfigLoader::resolve(config_path.as_deref())?;
        Self::with_config(config, config_path, offline)
    }

    /// Create run context from an already resolved configuration.
    pub fn with_config(
        config: StudyForgeConfig,
        config_path: Option<PathBuf>,
        offline: bool,
    ) -> Result<Self, ApiError> {
        config.ensure_valid()?;

        let generator = if offline {
            debug!("Offline mode: provider calls disabled");
            ContentGenerator::new(
                Arc::new(MockProvider::new(Vec::new())),
                config.provider.generation.clone(),
            )
        } else {
            ContentGenerator::from_config(&config.provider)?
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            config,
            config_path,
            generator,
            offline,
            runtime,
        })
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = self.execute_inner(command);
        info!(
            command = %name,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                kind,
                input,
                context,
                format,
            } => self.handle_generate(*kind, input, context.as_deref(), format),
            Commands::Chat {
                message,
                context,
                format,
            } => {
                if message.trim().is_empty() {
                    return Err(ApiError::InvalidInput("Message cannot be empty".to_string()));
                }
                let context = context.as_deref().map(read_json_file).transpose()?;
                let reply = self
                    .runtime
                    .block_on(self.generator.chat_reply(message, context.as_ref()));
                if format == "json" {
                    to_json(&serde_json::json!({ "reply": reply }))
                } else {
                    Ok(reply)
                }
            }
            Commands::StudyPack { input, format } => {
                let content = read_content(input)?
                    .ok_or_else(|| ApiError::InvalidInput(missing_content_message()))?;
                let pack = self.runtime.block_on(self.generator.study_pack(&content));
                if format == "json" {
                    to_json(&pack)
                } else {
                    Ok(format_study_pack_text(&pack))
                }
            }
            Commands::Stats {
                progress,
                now,
                format,
            } => {
                let records: Vec<ProgressRecord> = read_json_as(progress)?;
                let now = parse_now(now.as_deref())?;
                let stats = LearningStats::compute(&records, now);
                if format == "json" {
                    to_json(&stats)
                } else {
                    Ok(format_stats_text(&stats))
                }
            }
            Commands::QuizScore {
                quiz,
                answers,
                format,
            } => {
                let questions: Vec<QuizQuestion> = read_json_as(quiz)?;
                let answers = parse_answers(answers)?;
                let score = QuizScore::grade(&questions, &answers);
                if format == "json" {
                    to_json(&serde_json::json!({
                        "correct": score.correct,
                        "total": score.total,
                        "percentage": score.percentage(),
                        "band": score.band(),
                    }))
                } else {
                    Ok(format_quiz_score_text(&score))
                }
            }
            Commands::Status { format } => {
                let provider_name = if self.offline {
                    "offline"
                } else {
                    self.generator.provider().provider_name()
                };
                let status = StatusOutput::from_config(
                    &self.config,
                    provider_name,
                    self.offline,
                    self.config_path.as_deref(),
                );
                if format == "json" {
                    to_json(&status)
                } else {
                    Ok(format_status_text(&status))
                }
            }
            Commands::Init { path, force } => run_init(path.clone(), *force),
        }
    }

    fn handle_generate(
        &self,
        kind: KindArg,
        input: &InputArgs,
        context: Option<&Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        let kind = GenerationKind::from(kind);
        let content = read_content(input)?;
        let context = context.map(read_json_file).transpose()?;

        let needs_content = !matches!(
            kind,
            GenerationKind::Recommendations | GenerationKind::StudyPlan
        );
        if needs_content && content.is_none() {
            return Err(ApiError::InvalidInput(missing_content_message()));
        }
        if !needs_content && context.is_none() {
            return Err(ApiError::InvalidInput(format!(
                "{} needs --context <json file>",
                kind
            )));
        }

        let mut request = self.generator.request(kind, content.unwrap_or_default());
        if let Some(context) = context {
            request = request.with_context(context);
        }
        let result = self.runtime.block_on(self.generator.generate(&request));

        if format == "json" {
            to_json(&result)
        } else {
            Ok(format_result_text(&result))
        }
    }
}

/// Write a default config file. Never writes a credential.
pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<String, ApiError> {
    let path = match path {
        Some(path) => path,
        None => ConfigLoader::default_init_path()?,
    };
    let existed = path.exists();
    if existed && !force {
        return Err(ApiError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, StudyForgeConfig::default().to_toml_string()?)?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(format_init_summary(&path, existed))
}

fn missing_content_message() -> String {
    "Provide content with --text <string> or --input <file>".to_string()
}

/// Inline text or file contents; `None` when neither was given or the
/// content is blank.
fn read_content(input: &InputArgs) -> Result<Option<String>, ApiError> {
    let content = match (&input.text, &input.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            ApiError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
        })?,
        (None, None) => return Ok(None),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(content))
}

fn read_json_file(path: &Path) -> Result<Value, ApiError> {
    read_json_as(path)
}

fn read_json_as<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ApiError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ApiError::InvalidInput(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApiError::InvalidInput(format!("Invalid --now '{}': {}", raw, e))),
        None => Ok(Utc::now()),
    }
}

/// `0,2,B, d` -> [0, 2, 1, 3]
fn parse_answers(raw: &str) -> Result<Vec<u8>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|answer| {
            let index = match answer.to_ascii_uppercase().as_str() {
                "A" => Some(0),
                "B" => Some(1),
                "C" => Some(2),
                "D" => Some(3),
                digits => digits.parse::<u8>().ok().filter(|i| *i <= 3),
            };
            index.ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "Invalid answer '{}' (expected 0-3 or A-D)",
                    answer
                ))
            })
        })
        .collect()
}
