//! Error types for the edit session
//!
//! Every failure is reported as a value; none of them leaves the history
//! partially mutated.

use imgedit_client::{OperationError, ServiceError};
use imgedit_history::HistoryError;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Upload call failed; history untouched
    #[error("upload failed: {0}")]
    UploadFailed(#[source] ServiceError),

    /// An operation was requested before any successful upload
    #[error("no active image: upload an image first")]
    NoActiveImage,

    /// Operation call failed; history untouched
    #[error("operation {operation} failed: {cause}")]
    OperationFailed {
        operation: String,
        #[source]
        cause: ServiceError,
    },

    /// Bad revert target
    #[error("invalid revert target: {0}")]
    Range(#[source] HistoryError),

    /// Another request is still outstanding
    #[error("another request is already in flight")]
    Busy,

    /// Session was reset while the request was outstanding; result dropped
    #[error("session was reset while the request was outstanding")]
    Cancelled,

    /// Operation name or parameters rejected before dispatch
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] OperationError),
}

impl SessionError {
    /// Check if re-triggering the same request may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Busy => true,
            Self::UploadFailed(cause) | Self::OperationFailed { cause, .. } => {
                cause.is_retryable()
            }
            _ => false,
        }
    }

    /// Check if the request was rejected for concurrency
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Underlying service failure, if any
    #[must_use]
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::UploadFailed(cause) | Self::OperationFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
