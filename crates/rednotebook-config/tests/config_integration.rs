use rednotebook_config::{resolve_data_dir, AppConfig};

#[test]
fn test_load_creates_default_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configuration.json");
    assert!(!path.exists());

    let config = AppConfig::load_or_create(&path);
    assert!(path.exists());
    assert_eq!(config, AppConfig::default());

    // File should contain valid JSON
    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["history_size"], 100);
}

#[test]
fn test_load_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("configuration.json");

    AppConfig::load_or_create(&path);
    assert!(path.exists());
}

#[test]
fn test_load_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configuration.json");
    let json = r#"{
        "history_size": 30,
        "history_buffer": 5,
        "date_time_format": "%Y-%m-%d",
        "template_dir": "/tmp/tpl"
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.history_bounds(), (30, 5));
    assert_eq!(config.date_time_format, "%Y-%m-%d");
    assert_eq!(config.template_dir, "/tmp/tpl");
}

#[test]
fn test_broken_json_returns_defaults_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configuration.json");
    std::fs::write(&path, "{ this is not valid json }}}").unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config, AppConfig::default());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{ this is not valid json }}}"
    );
}

#[test]
fn test_loaded_config_is_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configuration.json");
    std::fs::write(&path, r#"{"history_size": 4, "history_buffer": 9}"#).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.history_bounds(), (4, 4));
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configuration.json");
    let config = AppConfig {
        history_size: 250,
        history_buffer: 50,
        ..AppConfig::default()
    };
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load_or_create(&path), config);
}

#[test]
fn test_save_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let err = AppConfig::default()
        .save(&blocker.join("config.json"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("not-a-dir"));
}

#[test]
fn test_data_dir_env_override() {
    // Save and restore env var
    let original = std::env::var("RNB_DATA_DIR").ok();
    std::env::set_var("RNB_DATA_DIR", "/custom/path");
    assert_eq!(resolve_data_dir(), std::path::PathBuf::from("/custom/path"));
    assert_eq!(
        AppConfig::default().resolve_template_dir(),
        std::path::PathBuf::from("/custom/path/templates")
    );
    match original {
        Some(val) => std::env::set_var("RNB_DATA_DIR", val),
        None => std::env::remove_var("RNB_DATA_DIR"),
    }
}
