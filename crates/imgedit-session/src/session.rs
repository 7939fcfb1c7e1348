//! Edit session: operation dispatcher over one edit history
//!
//! Owns the history of a single document and drives the service:
//! - `upload` starts a new history from a fresh image
//! - `apply` feeds the active artifact into the next operation
//! - `revert` truncates the history locally
//! - `reset` abandons the document, discarding any in-flight result

use crate::error::SessionError;
use crate::guard::InFlightGuard;
use imgedit_client::{ImageService, ImageUpload, Operation, ServiceError};
use imgedit_history::{ArtifactRef, History, Step, UPLOAD_OPERATION};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use ulid::Ulid;

/// Unique session identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single-document edit session
///
/// # Concurrency
/// At most one of `upload` / `apply` / `revert` runs at a time; a second
/// call made meanwhile fails with [`SessionError::Busy`] without touching
/// the history. The history lock is never held across an await.
#[derive(Debug)]
pub struct EditSession<S> {
    id: SessionId,
    service: S,
    history: Mutex<History>,
    in_flight: AtomicBool,
}

impl<S: ImageService> EditSession<S> {
    /// Create new session with an empty history
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            id: SessionId::new(),
            service,
            history: Mutex::new(History::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Upload a new source image, replacing the whole history
    ///
    /// # Errors
    /// - `Busy` if another request is outstanding
    /// - `UploadFailed` for an empty payload or a service failure
    /// - `Cancelled` if the session was reset meanwhile
    #[tracing::instrument(skip_all, fields(session = %self.id, file = file.file_name(), bytes = file.len()))]
    pub async fn upload(&self, file: ImageUpload) -> Result<Step, SessionError> {
        let _guard = self.begin()?;

        if file.is_empty() {
            return Err(SessionError::UploadFailed(ServiceError::EmptyPayload));
        }

        let generation = self.history.lock().generation();
        let artifact = match self.service.upload(file).await {
            Ok(artifact) => artifact,
            Err(cause) => {
                tracing::warn!(error = %cause, "upload failed");
                return Err(SessionError::UploadFailed(cause));
            }
        };

        let mut history = self.history.lock();
        if history.generation() != generation {
            tracing::info!(%artifact, "discarding upload result after reset");
            return Err(SessionError::Cancelled);
        }

        history.reset();
        let step = history.append(UPLOAD_OPERATION, artifact, None).clone();
        tracing::info!(artifact = %step.artifact(), generation = history.generation(), "upload recorded");
        Ok(step)
    }

    /// Apply `operation` to the active artifact and record the result
    ///
    /// # Errors
    /// - `Busy` if another request is outstanding
    /// - `InvalidOperation` for out-of-range parameters (no call is made)
    /// - `NoActiveImage` before any successful upload (no call is made)
    /// - `OperationFailed` if the service call fails
    /// - `Cancelled` if the session was reset meanwhile
    #[tracing::instrument(skip_all, fields(session = %self.id, operation = %operation))]
    pub async fn apply(&self, operation: Operation) -> Result<Step, SessionError> {
        let _guard = self.begin()?;
        self.dispatch(operation).await
    }

    /// Apply an operation given by name and string parameters
    ///
    /// # Errors
    /// As [`EditSession::apply`], plus `InvalidOperation` for an unknown
    /// name or bad parameters
    #[tracing::instrument(skip_all, fields(session = %self.id, operation = name))]
    pub async fn apply_named(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Step, SessionError> {
        let _guard = self.begin()?;
        let operation = Operation::from_parts(name, params)?;
        self.dispatch(operation).await
    }

    /// Truncate the history to `[0, index]`; no external call is made
    ///
    /// # Errors
    /// - `Busy` if another request is outstanding
    /// - `Range` if `index` is not a recorded step
    #[tracing::instrument(skip(self), fields(session = %self.id))]
    pub fn revert(&self, index: usize) -> Result<Step, SessionError> {
        let _guard = self.begin()?;

        let mut history = self.history.lock();
        let before = history.len();
        let step = history
            .revert_to(index)
            .map_err(SessionError::Range)?
            .clone();
        let discarded = before - history.len();
        tracing::info!(artifact = %step.artifact(), discarded, "reverted");
        Ok(step)
    }

    /// Abandon the current document
    ///
    /// Allowed while a request is outstanding; that request's result will
    /// be dropped and reported as [`SessionError::Cancelled`].
    pub fn reset(&self) {
        let mut history = self.history.lock();
        history.reset();
        tracing::info!(session = %self.id, generation = history.generation(), "session reset");
    }

    /// Ordered copy of all steps
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.history.lock().steps().to_vec()
    }

    /// Snapshot of the whole history
    #[must_use]
    pub fn history(&self) -> History {
        self.history.lock().clone()
    }

    /// Active artifact, `None` before the first upload
    #[must_use]
    pub fn current_artifact(&self) -> Option<ArtifactRef> {
        self.history.lock().current_artifact().cloned()
    }

    /// Reset counter of the underlying history
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.history.lock().generation()
    }

    /// Check if a request is outstanding
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Get session ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SessionError> {
        InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            tracing::debug!(session = %self.id, "rejecting concurrent request");
            SessionError::Busy
        })
    }

    async fn dispatch(&self, operation: Operation) -> Result<Step, SessionError> {
        operation.validate()?;
        let (previous, generation) = {
            let history = self.history.lock();
            let previous = history
                .current_artifact()
                .cloned()
                .ok_or(SessionError::NoActiveImage)?;
            (previous, history.generation())
        };
        tracing::debug!(%previous, "dispatching operation");

        let artifact = match self.service.process(previous, operation.clone()).await {
            Ok(artifact) => artifact,
            Err(cause) => {
                tracing::warn!(error = %cause, "operation failed");
                return Err(SessionError::OperationFailed {
                    operation: operation.name().to_string(),
                    cause,
                });
            }
        };

        let mut history = self.history.lock();
        if history.generation() != generation {
            tracing::info!(%artifact, "discarding operation result after reset");
            return Err(SessionError::Cancelled);
        }

        let step = history
            .append(operation.name(), artifact, operation.summary())
            .clone();
        tracing::info!(index = step.index(), artifact = %step.artifact(), "step recorded");
        Ok(step)
    }
}
