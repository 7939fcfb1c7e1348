//! Error types for the service client
//!
//! - [`ServiceError`]: a single call to the processing service failed
//! - [`OperationError`]: an operation name or its parameters were invalid
//! - [`ConfigError`]: client configuration could not be loaded

use std::path::PathBuf;

/// Failure of one external call
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Upload payload had no bytes
    #[error("upload payload is empty")]
    EmptyPayload,

    /// Request could not be sent or the response could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Service answered without an artifact reference
    #[error("service returned an empty artifact reference")]
    EmptyResponse,

    /// Local file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// Check if re-triggering the same call may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status, if the service answered at all
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Invalid operation request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// Operation name is not one the service offers
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Required parameter absent
    #[error("operation {operation} requires parameter {parameter}")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    /// Parameter present but unusable
    #[error("invalid value {value:?} for {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::ServiceConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Base URL is not an absolute http(s) URL
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Timeout must be positive
    #[error("timeout must be at least one second")]
    ZeroTimeout,

    /// HTTP client could not be constructed
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
