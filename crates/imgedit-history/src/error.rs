//! Error types for the edit history

/// Errors raised by history mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// Revert target outside `[0, len)`
    #[error("step {index} out of range (history has {len} steps)")]
    OutOfRange { index: usize, len: usize },

    /// Artifact reference was empty or blank
    #[error("artifact reference must not be empty")]
    EmptyArtifact,
}

impl HistoryError {
    /// Check if this is a bad revert target
    #[inline]
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let err = HistoryError::OutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "step 4 out of range (history has 2 steps)");
        assert!(err.is_out_of_range());
        assert!(!HistoryError::EmptyArtifact.is_out_of_range());
    }
}
