//! Client configuration
//!
//! Default config location: ~/.elastic/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

/// Environment variable overriding [`ClientConfig::addr`]
pub const ADDR_ENV: &str = "ELASTIC_ADDR";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// `host:port` of the engine, without scheme
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Whole-request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_addr() -> String {
    "localhost:9200".to_string()
}

fn default_request_timeout() -> u64 {
    30000
}

fn default_connect_timeout() -> u64 {
    5000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            request_timeout_ms: default_request_timeout(),
            connect_timeout_ms: default_connect_timeout(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl ClientConfig {
    /// Default config file path (~/.elastic/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Cannot determine home directory".to_string()))?;
        Ok(home.join(".elastic").join("config.toml"))
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load config from a file, or use defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            if !addr.is_empty() {
                self.addr = addr;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.addr, "localhost:9200");
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClientConfig::from_toml(
            r#"
addr = "search.internal:9200"

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.addr, "search.internal:9200");
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ClientConfig::from_toml("addr = [").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = ClientConfig {
            request_timeout_ms: 1234,
            ..ClientConfig::default()
        };
        config.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let loaded = ClientConfig::from_toml(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = ClientConfig::load_or_default(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.request_timeout_ms, 30000);
    }
}
