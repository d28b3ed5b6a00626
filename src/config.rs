//! Top-level application configuration.
//!
//! Configuration is stored in `.tempo/config.yaml` and includes:
//! - An optional override for the data file location
//! - The clipboard sink toggle for finished reports

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TempoError};
use crate::types::{DATA_FILE, tempo_root};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the data document lives (default: `.tempo/data.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Clipboard sink configuration
    #[serde(default, skip_serializing_if = "ClipboardConfig::is_default")]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Whether finished reports are copied to the clipboard (default: true)
    #[serde(default = "default_clipboard_enabled")]
    pub enabled: bool,
}

fn default_clipboard_enabled() -> bool {
    true
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enabled: default_clipboard_enabled(),
        }
    }
}

impl ClipboardConfig {
    /// Check if this config has default values (for serialization skip)
    pub fn is_default(&self) -> bool {
        self.enabled == default_clipboard_enabled()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        tempo_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TempoError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TempoError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            TempoError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    /// Resolve the data file path, honoring the configured override
    pub fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| tempo_root().join(DATA_FILE))
    }

    /// Check if the clipboard sink is enabled
    pub fn clipboard_enabled(&self) -> bool {
        self.clipboard.enabled
    }

    /// Get a config value by key, as shown by `tempo config get`
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "data_path" => Ok(self.data_path().display().to_string()),
            "clipboard.enabled" => Ok(self.clipboard.enabled.to_string()),
            _ => Err(TempoError::Config(format!("unknown key '{}'", key))),
        }
    }

    /// Set a config value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_path" => {
                self.data_path = Some(PathBuf::from(value));
                Ok(())
            }
            "clipboard.enabled" => {
                self.clipboard.enabled = value.parse().map_err(|_| {
                    TempoError::Config(format!(
                        "invalid value '{}' for clipboard.enabled (expected true or false)",
                        value
                    ))
                })?;
                Ok(())
            }
            _ => Err(TempoError::Config(format!("unknown key '{}'", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.data_path.is_none());
        assert!(config.clipboard_enabled());
        assert_eq!(config.data_path(), tempo_root().join(DATA_FILE));
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set("data_path", "/tmp/elsewhere.json").unwrap();
        config.set("clipboard.enabled", "false").unwrap();

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.data_path(), PathBuf::from("/tmp/elsewhere.json"));
        assert!(!parsed.clipboard_enabled());
    }

    #[test]
    fn test_config_clipboard_default_when_absent() {
        let config: Config = serde_yaml_ng::from_str("data_path: custom.json\n").unwrap();
        assert!(config.clipboard_enabled());
    }

    #[test]
    fn test_config_unknown_key() {
        let mut config = Config::default();
        assert!(config.get("nope").is_err());
        assert!(config.set("nope", "x").is_err());
    }
}
