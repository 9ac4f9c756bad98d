//! Error types for pacstatus

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// RPC-related errors
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Supply calculation errors
    #[error("Supply error: {0}")]
    Supply(#[from] SupplyError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// A single endpoint's failure during a failover cycle
#[derive(Debug)]
pub struct EndpointFailure {
    /// Endpoint URL the request was sent to
    pub endpoint: String,
    /// What went wrong on that endpoint
    pub error: RpcError,
}

impl std::fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.error)
    }
}

/// RPC-specific errors
#[derive(Error, Debug)]
pub enum RpcError {
    /// Transport-level failure: connection refused, DNS, timeout
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// Endpoint responded but the payload was malformed or unexpected
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Queried entity does not exist on an otherwise healthy endpoint
    #[error("not found: {0}")]
    NotFound(String),

    /// Every pooled endpoint failed for this request. Individual causes
    /// are preserved for diagnostics.
    #[error("all endpoints failed after {} attempts", .failures.len())]
    AllEndpointsFailed {
        /// Per-endpoint causes, in pool order
        failures: Vec<EndpointFailure>,
    },
}

/// Supply calculator errors
#[derive(Error, Debug)]
pub enum SupplyError {
    /// Chain info is the single fatal dependency of the calculation
    #[error("chain info unavailable: {0}")]
    ChainInfoUnavailable(#[source] RpcError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("No enabled RPC endpoints configured")]
    NoEndpoints,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Telegram Bot API errors
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API rejected the request: {0}")]
    Api(String),

    #[error("Invalid response from Telegram: {0}")]
    InvalidResponse(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_endpoints_failed_display() {
        let err = RpcError::AllEndpointsFailed {
            failures: vec![
                EndpointFailure {
                    endpoint: "http://a:8545".to_string(),
                    error: RpcError::Unreachable("connection refused".to_string()),
                },
                EndpointFailure {
                    endpoint: "http://b:8545".to_string(),
                    error: RpcError::Protocol("bad payload".to_string()),
                },
            ],
        };

        assert_eq!(err.to_string(), "all endpoints failed after 2 attempts");
    }

    #[test]
    fn test_endpoint_failure_display() {
        let failure = EndpointFailure {
            endpoint: "http://a:8545".to_string(),
            error: RpcError::NotFound("account pc1z...".to_string()),
        };

        assert!(failure.to_string().contains("http://a:8545"));
        assert!(failure.to_string().contains("not found"));
    }
}
