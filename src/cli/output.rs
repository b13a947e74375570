//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ConfigError(_) => format!(
            "{}\nRun `studyforge init` to write a default configuration file.",
            e
        ),
        _ => e.to_string(),
    }
}

/// Pretty JSON for `--format json`.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}
