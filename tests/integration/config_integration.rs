//! Integration tests for layered configuration loading

use crate::integration::with_xdg_env;
use std::fs;
use studyforge::config::{global_config_path, ConfigLoader, LOCAL_CONFIG_FILE};
use tempfile::TempDir;

fn write_global(body: &str) {
    let path = global_config_path().unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn test_global_config_under_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = global_config_path().unwrap();
        assert_eq!(
            path,
            test_dir.path().join("config").join("studyforge").join("config.toml")
        );

        write_global("[provider]\nmodel = \"global-model\"\n");
        let config = ConfigLoader::load_layered(Some(&path), None).unwrap();
        assert_eq!(config.provider.model, "global-model");
        assert!(!config.provider.has_credential());
    });
}

#[test]
fn test_local_file_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global(
            "[provider]\nmodel = \"global-model\"\nrequest_timeout_secs = 50\n\n[logging]\nlevel = \"warn\"\n",
        );
        let project = test_dir.path().join("project");
        fs::create_dir_all(&project).unwrap();
        fs::write(
            project.join(LOCAL_CONFIG_FILE),
            "[provider]\nmodel = \"project-model\"\n",
        )
        .unwrap();

        let config =
            ConfigLoader::load_layered(global_config_path().as_deref(), Some(&project)).unwrap();
        assert_eq!(config.provider.model, "project-model");
        assert_eq!(config.provider.request_timeout_secs, 50);
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_explicit_file_replaces_file_layers() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global("[provider]\nmodel = \"global-model\"\nconnect_timeout_secs = 5\n");
        let explicit = test_dir.path().join("explicit.toml");
        fs::write(&explicit, "[provider]\nmodel = \"explicit-model\"\n").unwrap();

        let config = ConfigLoader::resolve(Some(&explicit)).unwrap();
        assert_eq!(config.provider.model, "explicit-model");
        assert_eq!(config.provider.connect_timeout_secs, 10);
    });
}

#[test]
fn test_gemini_api_key_fills_missing_credential() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        std::env::set_var("GEMINI_API_KEY", "from-env-key");
        let config = ConfigLoader::load_layered(None, None).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("from-env-key"));

        write_global("[provider]\napi_key = \"from-file-key\"\n");
        let config = ConfigLoader::load_layered(global_config_path().as_deref(), None).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("from-file-key"));
    });
}

#[test]
fn test_prefixed_env_key_beats_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global("[provider]\napi_key = \"from-file-key\"\n");
        std::env::set_var("STUDYFORGE_PROVIDER__API_KEY", "prefixed-env-key");
        let config = ConfigLoader::load_layered(global_config_path().as_deref(), None).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("prefixed-env-key"));
    });
}

#[test]
fn test_invalid_values_are_reported_together() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("bad.toml");
    fs::write(
        &path,
        "[provider]\nbase_url = \"ftp://nowhere\"\n\n[logging]\noutput = \"syslog\"\n",
    )
    .unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&path).unwrap());
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    let message = config.ensure_valid().unwrap_err().to_string();
    assert!(message.contains("Base URL"));
    assert!(message.contains("syslog"));
}

#[test]
fn test_malformed_toml_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("broken.toml");
    fs::write(&path, "[provider\nmodel = ").unwrap();
    let result = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&path));
    assert!(matches!(
        result,
        Err(studyforge::error::ApiError::ConfigError(_))
    ));
}
