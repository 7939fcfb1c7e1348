use imgedit_history::{ArtifactRef, History, HistoryError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Append,
    Revert(usize),
    Reset,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => Just(Action::Append),
        2 => (0usize..12).prop_map(Action::Revert),
        1 => Just(Action::Reset),
    ]
}

fn artifact(n: usize) -> ArtifactRef {
    ArtifactRef::new(format!("img{n}.png")).unwrap()
}

#[test]
fn scenario_upload_two_ops_revert() {
    let mut history = History::new();
    history.append("Upload", artifact(1), None);
    history.append("invert", artifact(2), None);
    history.append("grayscale", artifact(3), None);

    history.revert_to(1).unwrap();

    assert_eq!(history.current_artifact().unwrap().as_str(), "img2.png");
    assert_eq!(history.steps().len(), 2);
}

#[test]
fn serializes_steps_in_order() {
    let mut history = History::new();
    history.append("Upload", artifact(1), None);
    history.append("rotate", artifact(2), Some("degrees=90".to_string()));

    let json = serde_json::to_value(&history).unwrap();
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1]["operation"], "rotate");
    assert_eq!(steps[1]["artifact"], "img2.png");
    assert_eq!(steps[1]["summary"], "degrees=90");
}

proptest! {
    #[test]
    fn prop_indices_stay_contiguous(actions in prop::collection::vec(action(), 0..64)) {
        let mut history = History::new();
        let mut counter = 0usize;

        for action in actions {
            match action {
                Action::Append => {
                    counter += 1;
                    history.append("op", artifact(counter), None);
                }
                Action::Revert(k) => {
                    let _ = history.revert_to(k);
                }
                Action::Reset => history.reset(),
            }

            for (i, step) in history.steps().iter().enumerate() {
                prop_assert_eq!(step.index(), i);
            }
            prop_assert_eq!(
                history.current_artifact(),
                history.steps().last().map(|s| s.artifact())
            );
        }
    }

    #[test]
    fn prop_append_count_matches_len(ops in 0usize..40) {
        let mut history = History::new();
        history.append("Upload", artifact(0), None);
        for n in 1..=ops {
            history.append("invert", artifact(n), None);
        }
        prop_assert_eq!(history.steps().len(), 1 + ops);
    }

    #[test]
    fn prop_revert_keeps_prefix(len in 1usize..20, k in 0usize..20) {
        let mut history = History::new();
        for n in 0..len {
            history.append("op", artifact(n), None);
        }
        let before = history.clone();

        match history.revert_to(k) {
            Ok(step) => {
                prop_assert!(k < len);
                prop_assert_eq!(step.artifact(), &artifact(k));
                prop_assert_eq!(history.steps().len(), k + 1);
                prop_assert_eq!(history.steps(), &before.steps()[..=k]);
                prop_assert_eq!(history.current_artifact(), Some(&artifact(k)));
            }
            Err(err) => {
                prop_assert!(k >= len);
                prop_assert_eq!(err, HistoryError::OutOfRange { index: k, len });
                prop_assert_eq!(&history, &before);
            }
        }
    }
}
