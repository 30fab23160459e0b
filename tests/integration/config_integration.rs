//! Integration tests for layered configuration

use super::test_utils::with_env;
use arbor::config::{ArborConfig, ConfigLoader};
use arbor::Workspace;
use tempfile::TempDir;

#[test]
fn test_env_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    let root = test_dir.path().join("ws");
    std::fs::create_dir_all(root.join(".arbor")).unwrap();
    std::fs::write(
        root.join(".arbor").join("config.toml"),
        "[map]\ndefault_processes = 4\n",
    )
    .unwrap();

    let config = with_env(&test_dir, &[("ARBOR__MAP__DEFAULT_PROCESSES", "6")], || {
        ConfigLoader::load(&root).unwrap()
    });
    assert_eq!(config.map.default_processes, 6);
}

#[test]
fn test_xdg_config_home_is_preferred() {
    let test_dir = TempDir::new().unwrap();
    let root = test_dir.path().join("ws");
    std::fs::create_dir_all(&root).unwrap();

    let config = with_env(&test_dir, &[], || {
        let global = ConfigLoader::xdg_config_path().unwrap();
        assert!(global.starts_with(test_dir.path().join("xdg")));

        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "[discovery]\nmax_depth = 2\n").unwrap();
        ConfigLoader::load(&root).unwrap()
    });
    assert_eq!(config.discovery.max_depth, Some(2));
}

#[test]
fn test_invalid_config_is_reported() {
    let test_dir = TempDir::new().unwrap();
    let file = test_dir.path().join("bad.toml");
    std::fs::write(&file, "[map]\ndefault_processes = 0\n").unwrap();

    let config = ConfigLoader::load_from_file(&file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_discovery_depth_limits_workspace() {
    let test_dir = TempDir::new().unwrap();
    let mut config = ArborConfig::default();
    config.discovery.max_depth = Some(2);

    let ws = std::sync::Arc::new(Workspace::from_config(test_dir.path(), &config));
    arbor::Treant::new(ws.root().join("shallow")).unwrap();
    arbor::Treant::new(ws.root().join("deep").join("er").join("deepest")).unwrap();

    let found = ws.discover("*").unwrap();
    let names: Vec<&str> = found.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["shallow"]);
}
