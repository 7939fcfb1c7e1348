//! A single recorded processing step

use crate::artifact::ArtifactRef;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of the edit history
///
/// # Invariants
/// - `index` equals the step's position in its history
/// - Immutable after construction; only [`crate::History`] creates steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    index: usize,
    operation: String,
    artifact: ArtifactRef,
    summary: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl Step {
    pub(crate) fn new(
        index: usize,
        operation: String,
        artifact: ArtifactRef,
        summary: Option<String>,
    ) -> Self {
        Self {
            index,
            operation,
            artifact,
            summary,
            recorded_at: Utc::now(),
        }
    }

    /// Position in the history (0 is the upload)
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the operation that produced this step
    #[inline]
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Artifact produced by the operation
    #[inline]
    #[must_use]
    pub fn artifact(&self) -> &ArtifactRef {
        &self.artifact
    }

    /// Human-readable parameter summary, if the operation took parameters
    #[inline]
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// When the step was recorded
    #[inline]
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Short label for listings, e.g. `flip (direction=vertical)`
    #[must_use]
    pub fn label(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{} ({summary})", self.operation),
            None => self.operation.clone(),
        }
    }
}
