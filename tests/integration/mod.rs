//! Integration tests for StudyForge

mod config_integration;
mod extraction_properties;
mod init_command;
mod logging_default;
mod model_providers;
mod test_utils;

pub use test_utils::with_xdg_env;
