//! Status presentation: resolved provider settings, key redacted.

use super::format_section_heading;
use crate::config::StudyForgeConfig;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Status output for JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub credential_configured: bool,
    pub offline: bool,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
}

impl StatusOutput {
    pub fn from_config(
        config: &StudyForgeConfig,
        provider_name: &str,
        offline: bool,
        config_file: Option<&Path>,
    ) -> Self {
        let provider = &config.provider;
        Self {
            provider: provider_name.to_string(),
            model: provider.model.clone(),
            endpoint: provider.endpoint_url(),
            api_key: provider.redacted_api_key(),
            credential_configured: provider.has_credential(),
            offline,
            connect_timeout_secs: provider.connect_timeout_secs,
            request_timeout_secs: provider.request_timeout_secs,
            temperature: provider.generation.temperature,
            top_k: provider.generation.top_k,
            top_p: provider.generation.top_p,
            max_output_tokens: provider.generation.max_output_tokens,
            config_file: config_file.map(|p| p.display().to_string()),
        }
    }

    /// Whether generation will reach the provider at all.
    pub fn is_live(&self) -> bool {
        self.credential_configured && !self.offline
    }
}

pub fn format_status_text(status: &StatusOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Provider")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["Provider".to_string(), status.provider.clone()]);
    table.add_row(vec!["Model".to_string(), status.model.clone()]);
    table.add_row(vec!["Endpoint".to_string(), status.endpoint.clone()]);
    table.add_row(vec!["API key".to_string(), status.api_key.clone()]);
    table.add_row(vec![
        "Timeouts".to_string(),
        format!(
            "connect {}s, request {}s",
            status.connect_timeout_secs, status.request_timeout_secs
        ),
    ]);
    table.add_row(vec![
        "Sampling".to_string(),
        format!(
            "temperature {}, top_k {}, top_p {}, max tokens {}",
            status.temperature, status.top_k, status.top_p, status.max_output_tokens
        ),
    ]);
    if let Some(ref file) = status.config_file {
        table.add_row(vec!["Config file".to_string(), file.clone()]);
    }
    out.push_str(&format!("{}\n\n", table));

    let mode = if status.offline {
        format!("{}", "Offline: all content comes from built-in fallbacks.".yellow())
    } else if status.is_live() {
        format!("{}", "Live: requests go to the provider.".green())
    } else {
        format!(
            "{}",
            "No API key: all content comes from built-in fallbacks.".yellow()
        )
    };
    out.push_str(&mode);
    out.push('\n');
    out
}

pub fn format_init_summary(path: &Path, overwritten: bool) -> String {
    let verb = if overwritten { "Overwrote" } else { "Wrote" };
    format!(
        "{} default configuration to {}\nSet GEMINI_API_KEY (or provider.api_key in the file) to enable live generation.",
        verb,
        path.display()
    )
}
