//! Merge rules: defaults first, then files, then environment.

use crate::provider::profile::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for environment overrides, e.g. `STUDYFORGE_PROVIDER__MODEL`.
pub const ENV_PREFIX: &str = "STUDYFORGE";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.base_url", DEFAULT_BASE_URL)?
        .set_default("provider.model", DEFAULT_MODEL)?
        .set_default("logging.level", "info")
}

/// Environment layer. Nested keys use `__`, so `STUDYFORGE_LOGGING__LEVEL`
/// sets `logging.level`.
pub fn environment_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
