//! Configuration infrastructure
//!
//! Contains configuration loading and management for profile scans.
//!
//! Configuration is organized into three sections:
//! 1. Parsing: selectors, site base URL, phone region
//! 2. Pipeline: retry budget and artifact paths
//! 3. Logging

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

pub use super::parsing::config::ParsingConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selector tables and normalization defaults
    pub parsing: ParsingConfig,

    /// Scan orchestration settings
    pub pipeline: PipelineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Scan orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extra attempts after the first failed scan
    pub max_retries: u32,

    /// Where the homepage summary is written
    pub summary_output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            summary_output_path: PathBuf::from(defaults::SUMMARY_OUTPUT_PATH),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; relative paths are resolved against the working directory
    pub log_dir: PathBuf,

    /// Log file name inside `log_dir`
    pub file_name: String,

    /// Module-specific log level filters (e.g., "html5ever": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: PathBuf::from(defaults::LOG_DIR),
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters.insert("profile_scan_lib".to_string(), "info".to_string());
                filters
            },
        }
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Manager for the per-user configuration file
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Manager for an explicit configuration file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .context("Failed to read configuration file")?;

        match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => {
                info!("Loaded configuration from: {:?}", self.config_path);
                Ok(config)
            }
            Err(parse_error) => {
                warn!("Configuration file is invalid: {}", parse_error);
                warn!("Resetting to default configuration");

                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(e) = fs::copy(&self.config_path, &backup_path).await {
                    warn!("Failed to create backup of corrupted config: {}", e);
                } else {
                    info!("Backed up corrupted config to: {:?}", backup_path);
                }

                let default_config = AppConfig::default();
                self.save_config(&default_config)
                    .await
                    .context("Failed to save default configuration")?;
                Ok(default_config)
            }
        }
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Apply `updater` to the stored configuration and save it
    pub async fn update_config<F>(&self, updater: F) -> Result<AppConfig>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.load_config().await?;
        updater(&mut config);
        self.save_config(&config).await?;
        Ok(config)
    }

    /// Reset configuration to defaults (useful for troubleshooting)
    pub async fn reset_to_defaults(&self) -> Result<AppConfig> {
        info!("Resetting configuration to defaults");

        let default_config = AppConfig::default();
        self.save_config(&default_config).await?;
        Ok(default_config)
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Default configuration values
pub mod defaults {
    /// Directory under the user config dir
    pub const APP_DIR_NAME: &str = "profile-scan";

    pub const CONFIG_FILE_NAME: &str = "profile_scan_config.json";

    /// Site the relative picture URLs belong to
    pub const BASE_URL: &str = "https://www.upwork.com";

    /// Region assumed for phone numbers without a country code
    pub const PHONE_REGION: &str = "US";

    /// Extra scan attempts after the first
    pub const MAX_RETRIES: u32 = 2;

    pub const SUMMARY_OUTPUT_PATH: &str = "level_1_task.json";

    // Log configuration defaults
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_DIR: &str = "logs";
    pub const LOG_FILE_NAME: &str = "profile-scan.log";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("cfg").join("config.json"));

        let config = manager.load_config().await.unwrap();

        assert_eq!(config.pipeline.max_retries, 2);
        assert_eq!(config.parsing.default_phone_region, "US");
        assert!(manager.config_path().exists());
    }

    #[tokio::test]
    async fn test_partial_file_fills_missing_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "pipeline": { "max_retries": 5 } }"#).unwrap();

        let config = ConfigManager::with_path(&path).load_config().await.unwrap();

        assert_eq!(config.pipeline.max_retries, 5);
        assert_eq!(config.pipeline.summary_output_path, PathBuf::from("level_1_task.json"));
        assert_eq!(config.parsing.base_url, "https://www.upwork.com");
        assert!(!config.parsing.contact_info_selectors.phone.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_backed_up_and_reset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = ConfigManager::with_path(&path).load_config().await.unwrap();

        assert_eq!(config.pipeline.max_retries, 2);
        let backup = std::fs::read_to_string(dir.path().join("config.json.corrupted")).unwrap();
        assert_eq!(backup, "{ not json");
    }

    #[tokio::test]
    async fn test_update_persists_changes() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));

        manager
            .update_config(|config| config.parsing.default_phone_region = "GB".to_string())
            .await
            .unwrap();

        let reloaded = manager.load_config().await.unwrap();
        assert_eq!(reloaded.parsing.default_phone_region, "GB");

        let reset = manager.reset_to_defaults().await.unwrap();
        assert_eq!(reset.parsing.default_phone_region, "US");
    }
}
