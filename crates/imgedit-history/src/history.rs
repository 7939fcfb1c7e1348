//! Edit history store
//!
//! Append-only sequence of [`Step`]s with destructive truncation:
//! - `append` adds a step at the end
//! - `revert_to` truncates back to a chosen step (no redo)
//! - `reset` clears everything and starts a new generation

use crate::artifact::ArtifactRef;
use crate::error::HistoryError;
use crate::step::Step;
use serde::Serialize;

/// Ordered edit history of a single document
///
/// # Invariants
/// - `steps[i].index() == i` for every `i`
/// - The active artifact is always the last step's artifact
/// - `generation` only ever increases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct History {
    steps: Vec<Step>,
    generation: u64,
}

impl History {
    /// Create empty history
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all steps and start a new generation
    pub fn reset(&mut self) {
        self.steps.clear();
        self.generation += 1;
    }

    /// Append a step; its index is the length before the append
    pub fn append(
        &mut self,
        operation: impl Into<String>,
        artifact: ArtifactRef,
        summary: Option<String>,
    ) -> &Step {
        let index = self.steps.len();
        self.steps
            .push(Step::new(index, operation.into(), artifact, summary));
        self.debug_check();
        &self.steps[index]
    }

    /// Truncate the history to `[0, index]` inclusive
    ///
    /// # Errors
    /// Returns [`HistoryError::OutOfRange`] if `index >= len`; the history
    /// is left untouched.
    pub fn revert_to(&mut self, index: usize) -> Result<&Step, HistoryError> {
        if index >= self.steps.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        self.steps.truncate(index + 1);
        self.debug_check();
        Ok(&self.steps[index])
    }

    /// Artifact of the last step, `None` when empty
    #[inline]
    #[must_use]
    pub fn current_artifact(&self) -> Option<&ArtifactRef> {
        self.steps.last().map(Step::artifact)
    }

    /// Ordered read-only view of all steps
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Last step, if any
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Step at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no step has been recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of resets so far
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn debug_check(&self) {
        debug_assert!(
            self.steps.iter().enumerate().all(|(i, s)| s.index() == i),
            "step indices must be contiguous from 0"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(name: &str) -> ArtifactRef {
        ArtifactRef::new(name).unwrap()
    }

    fn seeded(names: &[&str]) -> History {
        let mut history = History::new();
        for (i, name) in names.iter().enumerate() {
            let op = if i == 0 { "Upload" } else { "invert" };
            history.append(op, artifact(name), None);
        }
        history
    }

    #[test]
    fn empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.current_artifact(), None);
        assert_eq!(history.generation(), 0);
    }

    #[test]
    fn append_assigns_sequential_indices() {
        let mut history = History::new();
        let first = history.append("Upload", artifact("a.png"), None).index();
        let second = history
            .append("flip", artifact("b.png"), Some("direction=vertical".into()))
            .index();

        assert_eq!((first, second), (0, 1));
        assert_eq!(history.current_artifact(), Some(&artifact("b.png")));
        assert_eq!(history.steps()[1].summary(), Some("direction=vertical"));
        assert_eq!(history.steps()[1].label(), "flip (direction=vertical)");
    }

    #[test]
    fn revert_truncates_inclusive() {
        let mut history = seeded(&["img1.png", "img2.png", "img3.png"]);

        let step = history.revert_to(1).unwrap();
        assert_eq!(step.artifact().as_str(), "img2.png");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current_artifact(), Some(&artifact("img2.png")));
    }

    #[test]
    fn revert_to_last_is_noop() {
        let mut history = seeded(&["a", "b"]);
        let before = history.clone();
        history.revert_to(1).unwrap();
        assert_eq!(history, before);
    }

    #[test]
    fn revert_out_of_range() {
        let mut history = seeded(&["a", "b"]);
        let before = history.clone();

        let err = history.revert_to(2).unwrap_err();
        assert_eq!(err, HistoryError::OutOfRange { index: 2, len: 2 });
        assert_eq!(history, before);
    }

    #[test]
    fn revert_on_empty_fails() {
        let mut history = History::new();
        assert_eq!(
            history.revert_to(0).unwrap_err(),
            HistoryError::OutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn append_after_revert_reuses_index() {
        let mut history = seeded(&["a", "b", "c"]);
        history.revert_to(0).unwrap();
        let index = history.append("rotate", artifact("d"), None).index();
        assert_eq!(index, 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn reset_bumps_generation() {
        let mut history = seeded(&["a", "b"]);
        history.reset();
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.generation(), 2);
    }
}
