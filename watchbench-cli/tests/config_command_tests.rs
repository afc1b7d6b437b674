//! Integration tests for `watchbench config` command.
//!
//! Tests config loading and validation behaviour with real TOML files.

use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("watchbench.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[service]
endpoint = "http://watcher.example:9322"
admin = true

[audit]
poll_interval_secs = 2
timeout_secs = 300

[runner]
concurrency = 2
iterations = 10

[context]
audit_template_count = 1
goal = "workload_balancing"
strategy = "workload_stabilization"
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let result = watchbench_core::config::WatchbenchConfig::load(&config_path).await;

    // Then: Should succeed
    assert!(result.is_ok(), "valid config should load successfully");
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("watchbench.toml");
    fs::write(&config_path, "this is not [valid toml").expect("should write config");

    let result = watchbench_core::config::WatchbenchConfig::load(&config_path).await;
    assert!(result.is_err(), "malformed config should fail to load");
}

#[tokio::test]
async fn test_config_validate_invalid_values() {
    // Given: Syntactically valid TOML with a semantically invalid value
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("watchbench.toml");
    fs::write(
        &config_path,
        "[audit]\npoll_interval_secs = 0\ntimeout_secs = 300\n",
    )
    .expect("should write config");

    let result = watchbench_core::config::WatchbenchConfig::load(&config_path).await;
    assert!(result.is_err(), "zero poll interval should fail validation");
    let message = result.expect_err("validation error").to_string();
    assert!(
        message.contains("poll_interval_secs"),
        "error should name the offending field, got: {message}"
    );
}

#[tokio::test]
async fn test_config_missing_file_is_reported() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("does-not-exist.toml");

    let result = watchbench_core::config::WatchbenchConfig::load(&config_path).await;
    assert!(result.is_err(), "missing config file should fail");
}

#[tokio::test]
async fn test_config_partial_file_fills_defaults() {
    // Given: A config file with only the [service] section
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("watchbench.toml");
    fs::write(
        &config_path,
        "[service]\nendpoint = \"http://watcher.example:9322\"\n",
    )
    .expect("should write config");

    let config = watchbench_core::config::WatchbenchConfig::load(&config_path)
        .await
        .expect("partial config should load");

    assert_eq!(config.service.endpoint, "http://watcher.example:9322");
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.runner.iterations, 1);
}
