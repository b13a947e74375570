//! Configuration System
//!
//! Layered configuration built with the `config` crate. Lowest to highest:
//! built-in defaults, the global file, `./studyforge.toml`, then
//! `STUDYFORGE_*` environment variables. An explicit file given with
//! `--config` replaces both file layers. `GEMINI_API_KEY` fills the
//! credential last, and only when no other layer supplied one.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use crate::provider::ProviderConfig;

mod merge;
mod sources;

pub use merge::merge_policy::ENV_PREFIX;
pub use sources::global_file::global_config_path;
pub use sources::local_file::LOCAL_CONFIG_FILE;

/// Conventional credential variable, consulted when no layer set a key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyForgeConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Provider(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl StudyForgeConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all errors into one `ApiError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Render as TOML. The credential is never written.
    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        let mut shareable = self.clone();
        shareable.provider.api_key = None;
        Ok(toml::to_string_pretty(&shareable)?)
    }
}

/// Builds a [`StudyForgeConfig`] from its layers.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with the standard layers: global file, `./studyforge.toml`, env.
    pub fn load() -> Result<StudyForgeConfig, ApiError> {
        let cwd = std::env::current_dir()?;
        Self::load_layered(global_config_path().as_deref(), Some(&cwd))
    }

    /// Load from an explicit global path and local directory. Either layer
    /// may be absent.
    pub fn load_layered(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<StudyForgeConfig, ApiError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder, global_path)?;
        if let Some(dir) = local_dir {
            builder = sources::local_file::add_to_builder(builder, dir)?;
        }
        builder = builder.add_source(merge::merge_policy::environment_source());

        let config: StudyForgeConfig = builder.build()?.try_deserialize()?;
        Ok(Self::apply_api_key_env(config))
    }

    /// Load from a single explicit file (must exist), then env.
    pub fn load_from_file(path: &Path) -> Result<StudyForgeConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path).required(true))
            .add_source(merge::merge_policy::environment_source());

        let config: StudyForgeConfig = builder.build()?.try_deserialize()?;
        Ok(Self::apply_api_key_env(config))
    }

    /// `--config` when given, otherwise the standard layers.
    pub fn resolve(explicit: Option<&Path>) -> Result<StudyForgeConfig, ApiError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Where `init` writes by default.
    pub fn default_init_path() -> Result<PathBuf, ApiError> {
        global_config_path().ok_or_else(|| {
            ApiError::ConfigError(
                "Cannot determine config directory: neither XDG_CONFIG_HOME nor HOME is set"
                    .to_string(),
            )
        })
    }

    fn apply_api_key_env(config: StudyForgeConfig) -> StudyForgeConfig {
        let env_key = std::env::var(API_KEY_ENV).ok();
        with_fallback_key(config, env_key)
    }
}

fn with_fallback_key(mut config: StudyForgeConfig, env_key: Option<String>) -> StudyForgeConfig {
    if config.provider.has_credential() {
        return config;
    }
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        debug!("Using provider API key from {}", API_KEY_ENV);
        config.provider.api_key = Some(key);
    }
    config
}
