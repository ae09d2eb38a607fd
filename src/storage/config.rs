use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::ViewType;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub directory_url: String,
    pub directory_limit: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub first_day_of_week: String,
    pub default_view: String,
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    pub download_dir: PathBuf,
    pub open_after_export: bool,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calboard")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn week_start(&self) -> Weekday {
        self.ui.first_day_of_week.parse().unwrap_or(Weekday::Mon)
    }

    pub fn default_view(&self) -> ViewType {
        self.ui.default_view.parse().unwrap_or(ViewType::Month)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api/calendar".to_string(),
                directory_url: "https://dummyjson.com".to_string(),
                directory_limit: 20,
                timeout_seconds: 30,
            },
            ui: UiConfig {
                first_day_of_week: "Monday".to_string(),
                default_view: "Month".to_string(),
                theme: "default".to_string(),
            },
            export: ExportConfig {
                download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
                open_after_export: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_points_at_local_api() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api/calendar");
    }

    #[test]
    fn default_config_fetches_20_directory_users() {
        let config = Config::default();
        assert_eq!(config.api.directory_limit, 20);
    }

    #[test]
    fn default_config_starts_weeks_on_monday_in_month_view() {
        let config = Config::default();
        assert_eq!(config.week_start(), Weekday::Mon);
        assert_eq!(config.default_view(), ViewType::Month);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [api]
            base_url = "https://calendar.internal/api/calendar"
            directory_url = "https://directory.internal"
            directory_limit = 50
            timeout_seconds = 10

            [ui]
            first_day_of_week = "Sunday"
            default_view = "agenda"
            theme = "nord"

            [export]
            download_dir = "/tmp/exports"
            open_after_export = false
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://calendar.internal/api/calendar");
        assert_eq!(config.api.directory_limit, 50);
        assert_eq!(config.week_start(), Weekday::Sun);
        assert_eq!(config.default_view(), ViewType::Agenda);
        assert_eq!(config.export.download_dir, PathBuf::from("/tmp/exports"));
        assert!(!config.export.open_after_export);
    }

    #[test]
    fn unknown_week_start_and_view_fall_back() {
        let mut config = Config::default();
        config.ui.first_day_of_week = "Someday".to_string();
        config.ui.default_view = "Year".to_string();

        assert_eq!(config.week_start(), Weekday::Mon);
        assert_eq!(config.default_view(), ViewType::Month);
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn saved_config_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.ui.theme = "dracula".to_string();

        config.save_to(&path).unwrap();
        let loaded = Config::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded, config);
    }
}
