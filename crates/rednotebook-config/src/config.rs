/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the data directory.
const DATA_DIR_ENV: &str = "RNB_DATA_DIR";

/// Name of the configuration file inside the data directory.
const CONFIG_FILE_NAME: &str = "configuration.json";

/// Default strftime pattern used for the `$date$` template macro.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%A, %x %X";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Undo steps kept per day after the history is trimmed.
    pub history_size: usize,
    /// Undo steps dropped at once when a day's history overflows.
    pub history_buffer: usize,
    /// strftime pattern for the `$date$` template macro.
    pub date_time_format: String,
    /// Template directory. Empty = `templates/` inside the data directory.
    pub template_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_size: 100,
            history_buffer: 20,
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
            template_dir: String::new(),
        }
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `RNB_DATA_DIR` environment variable
/// 2. `rednotebook/` inside the platform data directory
/// 3. `.rednotebook/` in the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("rednotebook"))
        .unwrap_or_else(|| PathBuf::from(".rednotebook"))
}

impl AppConfig {
    /// Returns the config file path inside the data directory.
    pub fn config_path() -> PathBuf {
        resolve_data_dir().join(CONFIG_FILE_NAME)
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Keep the broken file for the user to fix
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the disk write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Returns the template directory, falling back to the data directory.
    pub fn resolve_template_dir(&self) -> PathBuf {
        if self.template_dir.is_empty() {
            resolve_data_dir().join("templates")
        } else {
            PathBuf::from(&self.template_dir)
        }
    }

    /// Returns `(size, buffer)` for the per-day undo history.
    pub fn history_bounds(&self) -> (usize, usize) {
        (self.history_size, self.history_buffer)
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.history_size = self.history_size.max(1);
        self.history_buffer = self.history_buffer.clamp(1, self.history_size);
        if self.date_time_format.trim().is_empty() {
            self.date_time_format = DEFAULT_DATE_TIME_FORMAT.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.history_size, 100);
        assert_eq!(config.history_buffer, 20);
        assert_eq!(config.date_time_format, "%A, %x %X");
        assert!(config.template_dir.is_empty());
    }

    #[test]
    fn test_history_bounds() {
        assert_eq!(AppConfig::default().history_bounds(), (100, 20));
    }

    #[test]
    fn test_sanitize_clamps_history() {
        let mut config = AppConfig {
            history_size: 0,
            history_buffer: 0,
            ..AppConfig::default()
        };
        config.sanitize();
        assert_eq!(config.history_bounds(), (1, 1));

        config.history_size = 10;
        config.history_buffer = 50;
        config.sanitize();
        assert_eq!(config.history_bounds(), (10, 10));
    }

    #[test]
    fn test_sanitize_preserves_valid_history() {
        let mut config = AppConfig::default();
        config.sanitize();
        assert_eq!(config.history_bounds(), (100, 20));
    }

    #[test]
    fn test_sanitize_resets_blank_date_format() {
        let mut config = AppConfig {
            date_time_format: "   ".to_string(),
            ..AppConfig::default()
        };
        config.sanitize();
        assert_eq!(config.date_time_format, DEFAULT_DATE_TIME_FORMAT);
    }

    #[test]
    fn test_explicit_template_dir() {
        let config = AppConfig {
            template_dir: "/srv/templates".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.resolve_template_dir(),
            PathBuf::from("/srv/templates")
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AppConfig {
            history_size: 42,
            ..AppConfig::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"history_size": 50}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.history_size, 50);
        assert_eq!(parsed.history_buffer, 20);
        assert_eq!(parsed.date_time_format, DEFAULT_DATE_TIME_FORMAT);
    }
}
