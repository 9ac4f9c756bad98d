//! Configuration file handling

use super::EndpointConfig;
use crate::error::{ConfigError, Result};
use crate::price::DEFAULT_PRICE_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// RPC endpoints, in failover order
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    /// Telegram channel settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Price feed settings
    #[serde(default)]
    pub price: PriceConfig,
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds between status updates
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_interval() -> u64 {
    7
}

fn default_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Telegram channel settings.
///
/// The bot token is deliberately not part of the file; it comes from the
/// `TELEGRAM_BOT_TOKEN` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Channel or chat to post to
    #[serde(default = "default_chat_id")]
    pub chat_id: String,

    /// Message to edit in place. When unset the bot posts a fresh message
    /// at startup and edits that one.
    #[serde(default)]
    pub message_id: Option<i64>,
}

fn default_chat_id() -> String {
    "@pactus_status".to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            chat_id: default_chat_id(),
            message_id: None,
        }
    }
}

/// Price feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceConfig {
    /// Ticker endpoint URL
    #[serde(default = "default_price_endpoint")]
    pub endpoint: String,
}

fn default_price_endpoint() -> String {
    DEFAULT_PRICE_ENDPOINT.to_string()
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_price_endpoint(),
        }
    }
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pacstatus")
            .join("config.toml")
    }

    /// Load from default path
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path();
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Enabled endpoints in failover order
    pub fn enabled_endpoints(&self) -> Vec<&EndpointConfig> {
        self.endpoints.iter().filter(|e| e.enabled).collect()
    }

    /// Validate that the config can drive the bot
    pub fn validate(&self) -> Result<()> {
        if self.enabled_endpoints().is_empty() {
            return Err(ConfigError::NoEndpoints.into());
        }
        if self.telegram.chat_id.is_empty() {
            return Err(ConfigError::MissingField("telegram.chat_id".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[settings]
interval_secs = 10
timeout_secs = 5

[[endpoints]]
url = "http://127.0.0.1:8545"
note = "local node"

[[endpoints]]
url = "http://bootstrap1.pactus.org:8545"

[[endpoints]]
url = "http://broken.example:8545"
enabled = false

[telegram]
chat_id = "@my_status"
message_id = 27
"#;

        let config: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.interval_secs, 10);
        assert_eq!(config.endpoints.len(), 3);
        assert_eq!(config.enabled_endpoints().len(), 2);
        assert_eq!(config.enabled_endpoints()[0].url, "http://127.0.0.1:8545");
        assert_eq!(config.telegram.chat_id, "@my_status");
        assert_eq!(config.telegram.message_id, Some(27));
        assert_eq!(config.price.endpoint, DEFAULT_PRICE_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_applied_on_empty_sections() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config.settings.interval_secs, 7);
        assert_eq!(config.settings.timeout_secs, 10);
        assert_eq!(config.telegram.chat_id, "@pactus_status");
        assert!(config.telegram.message_id.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert!(config.validate().is_err());

        let only_disabled: ConfigFile = toml::from_str(
            r#"
[[endpoints]]
url = "http://127.0.0.1:8545"
enabled = false
"#,
        )
        .unwrap();
        assert!(only_disabled.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[endpoints]]\nurl = \"http://127.0.0.1:8545\"\n"
        )
        .unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.endpoints.len(), 1);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [").unwrap();

        assert!(ConfigFile::load(file.path()).is_err());
    }

    #[test]
    fn test_default_path() {
        let path = ConfigFile::default_path();
        assert!(path.to_string_lossy().contains("pacstatus"));
    }
}
