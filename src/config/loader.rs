//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use super::secret::secret_string;
use crate::domain::errors::TranscriptError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (GONG_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`TranscriptError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use gong_transcripts::config::loader::load_config;
///
/// let config = load_config("gong.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TranscriptError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TranscriptError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| TranscriptError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Loads configuration from `path` when it exists, otherwise from defaults
///
/// Environment overrides and validation apply in both cases, so a bare
/// `GONG_CLIENT_ID`/`GONG_CLIENT_SECRET` environment is enough to run.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config)?;
    finish(config)
}

fn finish(config: AppConfig) -> Result<AppConfig> {
    config.validate().map_err(|e| {
        TranscriptError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TranscriptError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TranscriptError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        TranscriptError::Configuration(format!("Invalid value for {name} '{value}': {e}"))
    })
}

/// Applies environment variable overrides using the GONG_* prefix
///
/// `WORKSPACE_ID` is honoured as a legacy alias for `GONG_WORKSPACE_ID`.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GONG_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("GONG_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_env("GONG_APPLICATION_DRY_RUN", &val)?;
    }

    // API overrides
    if let Ok(val) = std::env::var("GONG_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("WORKSPACE_ID") {
        config.api.workspace_id = Some(parse_env("WORKSPACE_ID", &val)?);
    }
    if let Ok(val) = std::env::var("GONG_WORKSPACE_ID") {
        config.api.workspace_id = Some(parse_env("GONG_WORKSPACE_ID", &val)?);
    }
    if let Ok(val) = std::env::var("GONG_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_env("GONG_API_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("GONG_API_PAGE_SIZE_HINT") {
        config.api.page_size_hint = Some(parse_env("GONG_API_PAGE_SIZE_HINT", &val)?);
    }
    if let Ok(val) = std::env::var("GONG_CLIENT_ID") {
        config.api.client_id = Some(val);
    }
    if let Ok(val) = std::env::var("GONG_CLIENT_SECRET") {
        config.api.client_secret = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("GONG_CREDENTIALS_FILE") {
        config.api.credentials_file = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("GONG_EXPORT_HISTORY_START") {
        config.export.history_start = parse_env("GONG_EXPORT_HISTORY_START", &val)?;
    }
    if let Ok(val) = std::env::var("GONG_EXPORT_WINDOW_LENGTH") {
        config.export.window_length = parse_env("GONG_EXPORT_WINDOW_LENGTH", &val)?;
    }
    if let Ok(val) = std::env::var("GONG_EXPORT_WINDOW_COUNT") {
        config.export.window_count = parse_env("GONG_EXPORT_WINDOW_COUNT", &val)?;
    }
    if let Ok(val) = std::env::var("GONG_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GONG_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("GONG_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("GONG_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WindowLength;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GONG_LOADER_TEST_VAR", "test_value");
        let input = "client_id = \"${GONG_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "client_id = \"test_value\"\n");
        std::env::remove_var("GONG_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("GONG_LOADER_MISSING_VAR");
        let input = "client_secret = \"${GONG_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("GONG_LOADER_COMMENTED_VAR");
        let input = "# client_secret = \"${GONG_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_parse_env_reports_variable_name() {
        let err = parse_env::<u32>("GONG_EXPORT_WINDOW_COUNT", "many").unwrap_err();
        assert!(err.to_string().contains("GONG_EXPORT_WINDOW_COUNT"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-gong.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
workspace_id = 2686967882418498600
page_size_hint = 100

[export]
history_start = "2021-09-01"
window_length = "1 month"
window_count = 3
output_dir = "out"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(
            config.api.workspace_id.map(|w| w.get()),
            Some(2686967882418498600)
        );
        assert_eq!(config.api.page_size_hint, Some(100));
        assert_eq!(config.export.window_length, WindowLength::Months(1));
        assert_eq!(config.export.window_count, 3);
        assert_eq!(config.export.output_dir, "out");
    }

    #[test]
    fn test_load_config_rejects_misaligned_start() {
        let toml_content = r#"
[export]
history_start = "2021-09-15"
window_length = "1 month"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(matches!(err, TranscriptError::Configuration(_)));
    }
}
