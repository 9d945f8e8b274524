//! Integration tests for logging functionality
//!
//! The global subscriber can be installed once per process, so a single test
//! performs the initialization.

use gong_transcripts::config::LoggingConfig;
use gong_transcripts::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).expect("Failed to initialize logging");
    tracing::info!(target: "gong_transcripts", window = "2021-09", "Window complete");
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("gong-transcripts.log")).unwrap();
    let event: serde_json::Value = contents
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|event| event["fields"]["window"] == "2021-09")
        .expect("window event not logged");
    assert_eq!(event["fields"]["window"], "2021-09");
    assert_eq!(event["fields"]["message"], "Window complete");
}
