use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Priority;

const DEFAULT_PRIORITY_ENV: &str = "TASKBOARD_DEFAULT_PRIORITY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Priority preselected for new tasks.
    pub default_priority: Priority,
    /// Start from the built-in tasks instead of an empty board.
    pub seed: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            default_priority: Priority::Medium,
            seed: true,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl BoardConfig {
    /// Loads `path` (or the default location). A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_override(path, std::env::var(DEFAULT_PRIORITY_ENV).ok())
    }

    /// Same as [`BoardConfig::load`] with the priority override passed in.
    pub fn load_with_override(
        path: Option<&Path>,
        default_priority: Option<String>,
    ) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            BoardConfig::default()
        };

        config.apply_priority_override(default_priority)?;
        Ok(config)
    }

    pub fn apply_priority_override(&mut self, value: Option<String>) -> Result<()> {
        if let Some(value) = value {
            self.default_priority = value
                .parse()
                .with_context(|| format!("Invalid {}", DEFAULT_PRIORITY_ENV))?;
        }
        Ok(())
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskboard")
                .join("taskboard.log")
        })
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.default_priority, Priority::Medium);
        assert!(config.seed);
        assert_eq!(config.log_level, "info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = BoardConfig::parse("default_priority = \"high\"\n").unwrap();
        assert_eq!(config.default_priority, Priority::High);
        assert!(config.seed);
    }

    #[test]
    fn test_parse_full_file() {
        let raw = r#"
default_priority = "low"
seed = false
log_level = "debug"
log_file = "/tmp/board.log"
"#;
        let config = BoardConfig::parse(raw).unwrap();
        assert_eq!(config.default_priority, Priority::Low);
        assert!(!config.seed);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file_path(), PathBuf::from("/tmp/board.log"));
    }

    #[test]
    fn test_parse_rejects_unknown_priority() {
        assert!(BoardConfig::parse("default_priority = \"urgent\"").is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = BoardConfig {
            seed: false,
            ..BoardConfig::default()
        };
        let raw = config.to_toml().unwrap();
        assert_eq!(BoardConfig::parse(&raw).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = BoardConfig::load_with_override(Some(&path), None).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_priority = \"low\"\nseed = false\n").unwrap();

        let config = BoardConfig::load_with_override(Some(&path), None).unwrap();
        assert_eq!(config.default_priority, Priority::Low);
        assert!(!config.seed);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_priority = [unclosed").unwrap();

        let err = BoardConfig::load_with_override(Some(&path), None).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to parse config file"));
        assert!(message.contains(&path.display().to_string()));
    }

    #[test]
    fn test_priority_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_priority = \"low\"\n").unwrap();

        let config =
            BoardConfig::load_with_override(Some(&path), Some("High".to_string())).unwrap();
        assert_eq!(config.default_priority, Priority::High);
    }

    #[test]
    fn test_priority_override() {
        let mut config = BoardConfig::default();
        config.apply_priority_override(None).unwrap();
        assert_eq!(config.default_priority, Priority::Medium);

        config.apply_priority_override(Some("low".to_string())).unwrap();
        assert_eq!(config.default_priority, Priority::Low);
    }

    #[test]
    fn test_invalid_priority_override_is_an_error() {
        let mut config = BoardConfig::default();
        let err = config
            .apply_priority_override(Some("urgent".to_string()))
            .unwrap_err();
        assert!(format!("{:#}", err).contains(DEFAULT_PRIORITY_ENV));
        assert_eq!(config.default_priority, Priority::Medium);
    }
}
