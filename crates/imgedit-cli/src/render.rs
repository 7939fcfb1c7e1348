//! Text output for histories

use imgedit_history::Step;
use std::fmt::Write;

/// Render steps as an aligned table, marking the active step with `*`
pub(crate) fn history_table(steps: &[Step]) -> String {
    if steps.is_empty() {
        return "(no image uploaded)\n".to_string();
    }

    let labels: Vec<String> = steps.iter().map(Step::label).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0).max(9);
    let last = steps.len() - 1;

    let mut out = String::new();
    let _ = writeln!(out, "    #  {:<width$}  artifact", "operation");
    for (step, label) in steps.iter().zip(&labels) {
        let marker = if step.index() == last { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>3}  {label:<width$}  {}",
            step.index(),
            step.artifact()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgedit_history::{ArtifactRef, History, UPLOAD_OPERATION};
    use pretty_assertions::assert_eq;

    fn artifact(name: &str) -> ArtifactRef {
        ArtifactRef::new(name).unwrap()
    }

    #[test]
    fn empty_history() {
        assert_eq!(history_table(&[]), "(no image uploaded)\n");
    }

    #[test]
    fn marks_active_step() {
        let mut history = History::new();
        history.append(UPLOAD_OPERATION, artifact("img1.png"), None);
        history.append("rotate", artifact("img2.png"), Some("degrees=90".to_string()));

        let table = history_table(history.steps());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines,
            vec![
                "    #  operation            artifact",
                "    0  Upload               img1.png",
                "*   1  rotate (degrees=90)  img2.png",
            ]
        );
    }
}
