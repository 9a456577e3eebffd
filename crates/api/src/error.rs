//! Error types for the transport layer.

use thiserror::Error;

/// Failures of a single GET issued through a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid header {name}: {reason}")]
    Header { name: String, reason: String },
}

impl TransportError {
    /// The URL the failed request targeted, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            TransportError::Network { url, .. } | TransportError::Status { url, .. } | TransportError::Json { url, .. } => {
                Some(url)
            }
            TransportError::Header { .. } => None,
        }
    }

    /// Whether the body was received but could not be parsed.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, TransportError::Json { .. })
    }
}
