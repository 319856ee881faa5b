//! Error types for SocioAI core

use thiserror::Error;

/// Main error type for SocioAI operations
#[derive(Debug, Error)]
pub enum SocioError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network/HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream flow API answered, but not with something usable
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),

    /// Upstream flow API answered with a non-success status
    #[error("Upstream responded with status {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// More metric columns than palette colors under a rejecting overflow policy
    #[error("Too many metrics: {metrics} metric columns but the palette has {palette} colors")]
    TooManyMetrics {
        /// Number of metric columns
        metrics: usize,
        /// Number of palette entries
        palette: usize,
    },
}

/// Convenient Result type using SocioError
pub type Result<T> = std::result::Result<T, SocioError>;

impl SocioError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        SocioError::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        SocioError::Validation(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        SocioError::Upstream(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        SocioError::Other(msg.into())
    }

    /// Create an upstream status error
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        SocioError::UpstreamStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a too-many-metrics error
    pub fn too_many_metrics(metrics: usize, palette: usize) -> Self {
        SocioError::TooManyMetrics { metrics, palette }
    }

    /// Whether this error came from the upstream round trip (transport, status or shape)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SocioError::Network(_)
                | SocioError::Upstream(_)
                | SocioError::UpstreamStatus { .. }
                | SocioError::Serialization(_)
        )
    }
}
