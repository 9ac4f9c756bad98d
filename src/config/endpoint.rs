//! RPC endpoint configuration

use serde::{Deserialize, Serialize};

/// Configuration for a single RPC endpoint.
///
/// Order in the config file is failover order: the first enabled entry is
/// the preferred node. Uniqueness is the operator's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// JSON-RPC URL of the node
    pub url: String,
    /// Optional note about the endpoint
    #[serde(default)]
    pub note: Option<String>,
    /// Whether this endpoint is used
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl EndpointConfig {
    /// Create a new endpoint config with defaults
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            note: None,
            enabled: true,
        }
    }

    /// Builder-style setter for note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Builder-style setter for enabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_config() {
        let config = EndpointConfig::new("http://bootstrap1.pactus.org:8545")
            .with_note("bootstrap node");

        assert_eq!(config.url, "http://bootstrap1.pactus.org:8545");
        assert_eq!(config.note.as_deref(), Some("bootstrap node"));
        assert!(config.enabled);

        assert!(!config.disabled().enabled);
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let config: EndpointConfig =
            toml::from_str(r#"url = "http://127.0.0.1:8545""#).unwrap();
        assert!(config.enabled);
    }
}
