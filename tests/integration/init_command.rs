//! Integration tests for the init command

use crate::integration::with_xdg_env;
use studyforge::cli::run_init;
use studyforge::config::{global_config_path, ConfigLoader};
use tempfile::TempDir;

#[test]
fn test_init_writes_loadable_global_config() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let summary = run_init(None, false).unwrap();
        let path = global_config_path().unwrap();
        assert!(path.exists());
        assert!(summary.contains(&path.display().to_string()));

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.provider.has_credential());
        assert_eq!(config.provider.request_timeout_secs, 30);
    });
}

#[test]
fn test_init_idempotent_only_with_force() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        run_init(None, false).unwrap();
        let path = global_config_path().unwrap();
        std::fs::write(&path, "# edited by hand\n").unwrap();

        assert!(run_init(None, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited by hand\n");

        run_init(None, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[provider]"));
    });
}
