//! Integration tests for CLI log routing.
//!
//! Logs go to stderr by default so stdout carries only command output; file
//! output lands under $XDG_DATA_HOME/studyforge.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in an isolated environment rooted at `root`.
pub fn run_studyforge(root: &Path, args: &[&str]) -> Output {
    let home = root.join("home");
    let config_home = root.join("config");
    let data_home = root.join("data");
    for dir in [&home, &config_home, &data_home] {
        fs::create_dir_all(dir).unwrap();
    }
    Command::new(env!("CARGO_BIN_EXE_studyforge"))
        .current_dir(root)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env("XDG_DATA_HOME", &data_home)
        .env_remove("GEMINI_API_KEY")
        .env_remove("STUDYFORGE_PROVIDER__API_KEY")
        .env_remove("STUDYFORGE_LOG")
        .env_remove("STUDYFORGE_LOG_FORMAT")
        .env_remove("STUDYFORGE_LOG_OUTPUT")
        .env_remove("STUDYFORGE_LOG_MODULES")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_default_logging_keeps_stdout_clean() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_studyforge(temp_dir.path(), &["--offline", "status", "--format", "json"]);

    assert!(
        output.status.success(),
        "status should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["offline"], true);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("StudyForge CLI starting"),
        "startup log should go to stderr; got: {}",
        stderr
    );
}

#[test]
fn test_file_output_writes_default_log_path() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_studyforge(
        temp_dir.path(),
        &["--offline", "--log-output", "file", "status"],
    );
    assert!(output.status.success());

    let log_path = temp_dir
        .path()
        .join("data")
        .join("studyforge")
        .join("studyforge.log");
    assert!(
        log_path.exists(),
        "log file should exist at {}",
        log_path.display()
    );
    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("StudyForge CLI starting"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("StudyForge CLI starting"));
}

#[test]
fn test_verbose_logging_mirrors_to_stderr_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs").join("run.log");
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        format!(
            "[logging]\noutput = \"file\"\nfile = \"{}\"\n",
            log_path.display()
        ),
    )
    .unwrap();

    let output = run_studyforge(
        temp_dir.path(),
        &[
            "--config",
            config_path.to_str().unwrap(),
            "--offline",
            "--verbose",
            "status",
        ],
    );
    assert!(
        output.status.success(),
        "verbose status should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!String::from_utf8_lossy(&output.stderr).trim().is_empty());
    assert!(log_path.exists(), "log file should exist at {}", log_path.display());
}

#[test]
fn test_quiet_suppresses_logs() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_studyforge(temp_dir.path(), &["--offline", "--quiet", "status"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).trim().is_empty());
}
