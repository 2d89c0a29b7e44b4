//! Configuration handling for the TUI

use anyhow::Result;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::ThemePreference;

/// Delay between the last editor keystroke and the schema re-parse
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// File name the last submission is downloaded to
pub const SUBMISSION_FILE_NAME: &str = "form_submission.json";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Schema re-parse delay in milliseconds
    pub debounce_ms: Option<u64>,
    /// Directory submissions are downloaded into
    pub submission_dir: Option<PathBuf>,
    /// Color theme preference
    pub theme: Option<ThemePreference>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "schema-form", "schema-form")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Where the log file goes
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("schema-form.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn theme_preference(&self) -> ThemePreference {
        self.theme.unwrap_or_default()
    }

    /// Configured directory, else the user's downloads, else the working directory
    pub fn submission_dir(&self) -> PathBuf {
        self.submission_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn submission_path(&self) -> PathBuf {
        self.submission_dir().join(SUBMISSION_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.debounce_ms.is_none());
        assert!(config.submission_dir.is_none());
        assert!(config.theme.is_none());
        assert_eq!(config.debounce_delay(), Duration::from_millis(500));
        assert_eq!(config.theme_preference(), ThemePreference::Auto);
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            debounce_ms: Some(250),
            submission_dir: Some(PathBuf::from("/tmp/forms")),
            theme: Some(ThemePreference::Light),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.debounce_ms, Some(250));
        assert_eq!(parsed.submission_dir, Some(PathBuf::from("/tmp/forms")));
        assert_eq!(parsed.theme, Some(ThemePreference::Light));
    }

    #[test]
    fn test_partial_serialization() {
        let config = TuiConfig {
            debounce_ms: Some(100),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.debounce_delay(), Duration::from_millis(100));
        assert!(parsed.theme.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.debounce_ms.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"theme": "dark", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.theme, Some(ThemePreference::Dark));
    }

    #[test]
    fn test_submission_path_uses_configured_dir() {
        let config = TuiConfig {
            submission_dir: Some(PathBuf::from("/tmp/forms")),
            ..Default::default()
        };
        assert_eq!(
            config.submission_path(),
            PathBuf::from("/tmp/forms/form_submission.json")
        );
    }

    #[test]
    fn test_submission_path_has_file_name() {
        let path = TuiConfig::default().submission_path();
        assert!(path.ends_with(SUBMISSION_FILE_NAME));
    }

    #[test]
    fn test_load_returns_ok_when_no_file() {
        // Load should return default config when file doesn't exist
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
