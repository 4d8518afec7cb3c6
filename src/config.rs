//! Configuration management for caprino-checker
//!
//! Config stored at: ~/.config/caprino-checker/config.json

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Gemini model for photo analysis
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model name override (optional)
    #[serde(default)]
    pub model: Option<String>,

    /// API key for the AI service. When absent, GEMINI_API_KEY / API_KEY
    /// environment variables are consulted.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Preferred camera device node (e.g. /dev/video1). This is the
    /// "environment"-facing camera tried first; acquisition falls back to
    /// autodetection when it fails.
    #[serde(default)]
    pub camera_device: Option<String>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: None,
            api_key: None,
            camera_device: None,
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?
            .join("caprino-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Model to use for photo analysis
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Resolve the AI service credential.
    ///
    /// Order: config file value, GEMINI_API_KEY, API_KEY. Absence is fatal
    /// for the analyze step only.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        for var in ["GEMINI_API_KEY", "API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                if !key.is_empty() {
                    return Ok(key);
                }
            }
        }
        Err(Error::MissingApiKey)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Caprino Checker Configuration")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "Model:          {}", self.model())?;
        writeln!(
            f,
            "API key:        {}",
            if self.api_key.is_some() {
                "(set in config)"
            } else {
                "(from environment)"
            }
        )?;
        writeln!(
            f,
            "Camera device:  {}",
            self.camera_device.as_deref().unwrap_or("(autodetect)")
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_used_when_unset() {
        let config = Config::default();
        assert_eq!(config.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_model_override() {
        let config = Config {
            model: Some("gemini-2.0-pro".to_string()),
            ..Config::default()
        };
        assert_eq!(config.model(), "gemini-2.0-pro");
    }

    #[test]
    fn test_config_key_takes_precedence() {
        let config = Config {
            api_key: Some("from-config".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "from-config");
    }

    #[test]
    fn test_empty_config_key_ignored() {
        let config = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        // Falls through to the environment; with neither env var set this is
        // MissingApiKey. Avoid asserting on env state beyond the error type.
        match config.resolve_api_key() {
            Ok(key) => assert!(!key.is_empty()),
            Err(e) => assert!(matches!(e, Error::MissingApiKey)),
        }
    }

    #[test]
    fn test_roundtrip_serde() {
        let config = Config {
            model: Some("gemini-2.5-flash".to_string()),
            api_key: None,
            camera_device: Some("/dev/video1".to_string()),
            output_format: OutputFormat::Json,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model, config.model);
        assert_eq!(back.camera_device, config.camera_device);
        assert_eq!(back.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.model.is_none());
        assert_eq!(config.output_format, OutputFormat::Table);
    }
}
