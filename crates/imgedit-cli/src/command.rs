//! Interactive command parsing

use imgedit_client::{Operation, OperationError};
use std::path::PathBuf;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplCommand {
    Upload(PathBuf),
    Apply(Operation),
    Revert(usize),
    History,
    Current,
    Reset,
    Help,
    Quit,
    Empty,
}

/// Rejected REPL input
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    /// First word is neither a command nor an operation
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),

    /// Command used with wrong arguments
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Revert target is not a non-negative integer
    #[error("invalid step index {0:?}")]
    BadIndex(String),

    /// Operation spec could not be parsed
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Operation syntax and description, in [`Operation::NAMES`] order
pub(crate) const OPERATIONS: [(&str, &str); 5] = [
    ("invert", "invert colors"),
    ("flip:<horizontal|vertical>", "mirror along an axis"),
    ("rotate:<degrees>", "rotate by whole degrees"),
    ("resize:<w>x<h>", "resize to width x height pixels"),
    ("grayscale", "convert to grayscale"),
];

const COMMANDS: [(&str, &str); 9] = [
    ("upload <path>", "upload a new image, restarting the history"),
    ("apply <op>", "apply an operation to the current image"),
    ("<op>", "same as `apply <op>`"),
    ("revert <n>", "go back to step n (0 is the upload)"),
    ("history", "list all steps"),
    ("current", "print the active artifact"),
    ("reset", "forget the current image"),
    ("help", "show this text"),
    ("quit", "leave"),
];

/// Aligned `syntax  description` lines
pub(crate) fn listing(entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .map(|(syntax, about)| format!("  {syntax:<28} {about}\n"))
        .collect()
}

/// REPL help text
pub(crate) fn help_text() -> String {
    format!(
        "commands:\n{}operations:\n{}  (`flip vertical`, `rotate 90` and `resize 640 480` are accepted too)",
        listing(&COMMANDS),
        listing(&OPERATIONS)
    )
}

impl ReplCommand {
    /// Parse one input line
    pub(crate) fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Empty);
        };
        let rest: Vec<&str> = words.collect();

        match head.to_ascii_lowercase().as_str() {
            "upload" | "open" => match rest.as_slice() {
                [] => Err(CommandError::Usage("upload <path>")),
                _ => Ok(Self::Upload(PathBuf::from(rest.join(" ")))),
            },
            "apply" => match rest.split_first() {
                Some((name, args)) => Ok(Self::Apply(parse_operation(name, args)?)),
                None => Err(CommandError::Usage("apply <op>")),
            },
            "revert" => match rest.as_slice() {
                [index] => index
                    .parse()
                    .map(Self::Revert)
                    .map_err(|_| CommandError::BadIndex((*index).to_string())),
                _ => Err(CommandError::Usage("revert <n>")),
            },
            "history" | "steps" => Ok(Self::History),
            "current" => Ok(Self::Current),
            "reset" => Ok(Self::Reset),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ if is_operation(head) => Ok(Self::Apply(parse_operation(head, &rest)?)),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

fn is_operation(word: &str) -> bool {
    let name = word.split_once(':').map_or(word, |(name, _)| name);
    let name = name.to_ascii_lowercase();
    Operation::NAMES.contains(&name.as_str()) || name == "greyscale"
}

/// Accept both `rotate:90` and `rotate 90`
fn parse_operation(head: &str, args: &[&str]) -> Result<Operation, CommandError> {
    let spec = match args {
        [] => head.to_string(),
        [arg] => format!("{head}:{arg}"),
        [width, height] if head.eq_ignore_ascii_case("resize") => {
            format!("{head}:{width}x{height}")
        }
        _ => return Err(CommandError::Usage("apply <op>")),
    };
    Ok(spec.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgedit_client::FlipDirection;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> ReplCommand {
        ReplCommand::parse(line).unwrap()
    }

    #[test]
    fn builtin_commands() {
        assert_eq!(parse(""), ReplCommand::Empty);
        assert_eq!(parse("   "), ReplCommand::Empty);
        assert_eq!(parse("history"), ReplCommand::History);
        assert_eq!(parse("CURRENT"), ReplCommand::Current);
        assert_eq!(parse("reset"), ReplCommand::Reset);
        assert_eq!(parse("quit"), ReplCommand::Quit);
        assert_eq!(parse("revert 2"), ReplCommand::Revert(2));
        assert_eq!(
            parse("upload ./my photos/cat.png"),
            ReplCommand::Upload(PathBuf::from("./my photos/cat.png"))
        );
    }

    #[test]
    fn operation_forms() {
        let flip = ReplCommand::Apply(Operation::Flip {
            direction: FlipDirection::Vertical,
        });
        assert_eq!(parse("apply flip:vertical"), flip);
        assert_eq!(parse("flip:vertical"), flip);
        assert_eq!(parse("flip vertical"), flip);

        let resize = ReplCommand::Apply(Operation::Resize {
            width: 640,
            height: 480,
        });
        assert_eq!(parse("resize 640 480"), resize);
        assert_eq!(parse("apply resize:640x480"), resize);

        assert_eq!(
            parse("rotate 90"),
            ReplCommand::Apply(Operation::Rotate { degrees: 90 })
        );
        assert_eq!(parse("invert"), ReplCommand::Apply(Operation::Invert));
    }

    #[test]
    fn operation_listing_matches_names() {
        let names: Vec<&str> = OPERATIONS
            .iter()
            .map(|&(syntax, _)| syntax.split(':').next().unwrap_or(syntax))
            .collect();
        assert_eq!(names, Operation::NAMES.to_vec());

        let help = help_text();
        for (syntax, _) in OPERATIONS {
            assert!(help.contains(syntax), "help lacks {syntax}");
        }
    }

    #[test]
    fn rejected_input() {
        assert!(matches!(
            ReplCommand::parse("sharpen"),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            ReplCommand::parse("revert -1"),
            Err(CommandError::BadIndex(_))
        ));
        assert!(matches!(
            ReplCommand::parse("revert"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            ReplCommand::parse("apply"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            ReplCommand::parse("rotate ninety"),
            Err(CommandError::Operation(_))
        ));
        assert!(matches!(
            ReplCommand::parse("apply sharpen"),
            Err(CommandError::Operation(OperationError::UnknownOperation(_)))
        ));
    }
}
