use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::logger::LogLevel;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Backend service settings
    #[serde(default)]
    pub server: ServerConfig,

    /// File logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL the API paths are joined onto
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Minimum level written to the log file: debug, info, warn, error
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config_path() -> String {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{}/.nota/config.yaml", home)
    }

    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::get_config_path();
        let config_file = Path::new(&config_path);

        // Try to load existing config
        if config_file.exists() {
            if let Ok(config) = Self::load_from_file(config_file) {
                return Ok(config);
            }
        }

        // Return default config if loading fails
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path();
        self.save_to_file(config_path)
    }

    /// Minimum file-log level, falling back to info on unknown names
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_name(&self.logging.level).unwrap_or(LogLevel::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test_config.yaml");

        let original_config = Config {
            server: ServerConfig {
                base_url: "https://chat.example.com".to_string(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        };

        original_config.save_to_file(&config_path)?;
        assert!(config_path.exists());

        let loaded_config = Config::load_from_file(&config_path)?;
        assert_eq!(loaded_config, original_config);
        assert_eq!(loaded_config.log_level(), LogLevel::Debug);

        Ok(())
    }

    #[test]
    fn test_save_creates_parent_directories() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let nested_path = temp_dir.path().join("nested").join("dir").join("config.yaml");

        assert!(!nested_path.parent().unwrap().exists());

        Config::default().save_to_file(&nested_path)?;

        assert!(nested_path.exists());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        fs::write(
            temp_file.path(),
            "server:\n  base_url: http://10.0.0.5:9000\n",
        )?;

        let config = Config::load_from_file(temp_file.path())?;

        assert_eq!(config.server.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.logging.level, "info");
        Ok(())
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "invalid: yaml: content: [").unwrap();

        let result = Config::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from_file("/path/that/does/not/exist/config.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_and_load_or_default() -> Result<()> {
        // Single test owns the HOME override so parallel tests never see it
        // half-applied.
        let temp_dir = TempDir::new()?;
        let original_home = std::env::var("HOME").ok();
        std::env::set_var("HOME", temp_dir.path());

        let config_path = Config::get_config_path();
        assert_eq!(
            config_path,
            format!("{}/.nota/config.yaml", temp_dir.path().display())
        );

        // No file yet: defaults
        let config = Config::load_or_default()?;
        assert_eq!(config, Config::default());

        // With a saved file: loads it
        let custom = Config {
            server: ServerConfig {
                base_url: "http://localhost:1234".to_string(),
            },
            logging: LoggingConfig::default(),
        };
        custom.save()?;
        let loaded = Config::load_or_default()?;
        assert_eq!(loaded.server.base_url, "http://localhost:1234");

        match original_home {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
        Ok(())
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = Config {
            server: ServerConfig::default(),
            logging: LoggingConfig {
                level: "shouting".to_string(),
            },
        };

        assert_eq!(config.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_serialization_roundtrip() -> Result<()> {
        let original = Config {
            server: ServerConfig {
                base_url: "https://nota.example.org".to_string(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
        };

        let yaml = serde_yaml::to_string(&original)?;
        let deserialized: Config = serde_yaml::from_str(&yaml)?;

        assert_eq!(original, deserialized);
        Ok(())
    }
}
