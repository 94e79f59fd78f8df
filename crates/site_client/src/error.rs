use serde_json::Value;
use shared::error::ValidationError;
use thiserror::Error;

/// Every way a single backend call can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached at all.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Usually an HTML error page from the reverse proxy.
    #[error("{endpoint} returned a non-JSON response ({status}); endpoint not found or misconfigured")]
    NotJson {
        endpoint: String,
        status: u16,
        content_type: Option<String>,
    },

    #[error("{endpoint} returned {status} {status_text}")]
    Status {
        endpoint: String,
        status: u16,
        status_text: String,
        body: Option<Value>,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotJson { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|status| status.as_u16()),
            Self::Decode { .. } | Self::Validation(_) => None,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint, .. }
            | Self::NotJson { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => Some(endpoint),
            Self::Validation(_) => None,
        }
    }

    /// False only for errors raised before any request was sent.
    pub fn is_backend_failure(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}
