// tests/config_test.rs
use std::fs;

use tagger::config::{create_default_in, load_in, HostingProvider, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_load_missing_config_is_none() {
    let dir = TempDir::new().unwrap();
    let config = load_in(dir.path()).unwrap();
    assert!(config.is_none());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let json = r#"{
        "gitHostingProvider": "GitHub",
        "github": { "openActionPage": false }
    }"#;
    fs::write(dir.path().join(CONFIG_FILE_NAME), json).unwrap();

    let config = load_in(dir.path()).unwrap().expect("config should load");
    assert!(config.is_github());
    assert_eq!(config.open_action_page(), Some(false));
}

#[test]
fn test_load_invalid_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

    let result = load_in(dir.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Configuration"));
}

#[test]
fn test_create_default_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = create_default_in(dir.path()).unwrap();
    assert!(path.exists());

    let config = load_in(dir.path()).unwrap().expect("config should load");
    assert_eq!(
        config.git_hosting_provider,
        Some(HostingProvider::GitHub)
    );
    assert_eq!(config.open_action_page(), Some(true));
    assert!(config.schema.unwrap().contains("tagger.schema.json"));
}

#[test]
fn test_create_default_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    create_default_in(dir.path()).unwrap();

    let result = create_default_in(dir.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}
