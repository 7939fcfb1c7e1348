//! Processing operations offered by the service
//!
//! Each [`Operation`] knows its endpoint, the extra form fields it sends
//! next to `previousImage`, and the parameter summary recorded in history.

use crate::error::OperationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Flip axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

impl FlipDirection {
    /// Wire value
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl Display for FlipDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlipDirection {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(OperationError::InvalidParameter {
                parameter: "direction",
                value: s.to_string(),
                reason: "expected horizontal or vertical",
            }),
        }
    }
}

/// A processing request, independent of the image it applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Operation {
    Invert,
    Flip { direction: FlipDirection },
    Rotate { degrees: i32 },
    Resize { width: u32, height: u32 },
    Grayscale,
}

impl Operation {
    /// Names accepted by [`Operation::from_parts`]
    pub const NAMES: [&'static str; 5] = ["invert", "flip", "rotate", "resize", "grayscale"];

    /// Build a resize, rejecting zero dimensions
    ///
    /// # Errors
    /// Returns [`OperationError::InvalidParameter`] if either side is zero
    pub fn resize(width: u32, height: u32) -> Result<Self, OperationError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self::Resize { width, height })
    }

    /// Check parameters the variant constructors cannot enforce
    ///
    /// # Errors
    /// Returns [`OperationError::InvalidParameter`] for a zero resize side
    pub fn validate(&self) -> Result<(), OperationError> {
        if let Self::Resize { width, height } = *self {
            check_dimension("width", width)?;
            check_dimension("height", height)?;
        }
        Ok(())
    }

    /// Operation name as recorded in history
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Flip { .. } => "flip",
            Self::Rotate { .. } => "rotate",
            Self::Resize { .. } => "resize",
            Self::Grayscale => "grayscale",
        }
    }

    /// Path relative to the service base URL
    #[must_use]
    pub fn endpoint(&self) -> String {
        match self {
            Self::Rotate { degrees } => format!("/rotate/{degrees}"),
            other => format!("/{}", other.name()),
        }
    }

    /// Form fields sent alongside `previousImage`
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Flip { direction } => vec![("direction", direction.to_string())],
            Self::Resize { width, height } => {
                vec![("width", width.to_string()), ("height", height.to_string())]
            }
            Self::Invert | Self::Rotate { .. } | Self::Grayscale => Vec::new(),
        }
    }

    /// Parameter summary stored with the resulting step
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        match self {
            Self::Invert | Self::Grayscale => None,
            Self::Flip { direction } => Some(format!("direction={direction}")),
            Self::Rotate { degrees } => Some(format!("degrees={degrees}")),
            Self::Resize { width, height } => Some(format!("width={width}, height={height}")),
        }
    }

    /// Build an operation from a name and string parameters
    ///
    /// Unrecognised parameters are ignored.
    ///
    /// # Errors
    /// - `UnknownOperation` for names outside [`Operation::NAMES`]
    /// - `MissingParameter` / `InvalidParameter` for bad parameters
    pub fn from_parts(
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Self, OperationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "invert" => Ok(Self::Invert),
            "grayscale" | "greyscale" => Ok(Self::Grayscale),
            "flip" => {
                let direction = required(params, "flip", "direction")?.parse()?;
                Ok(Self::Flip { direction })
            }
            "rotate" => {
                let raw = required(params, "rotate", "degrees")?;
                Ok(Self::Rotate {
                    degrees: parse_degrees(raw)?,
                })
            }
            "resize" => {
                let width = parse_dimension("width", required(params, "resize", "width")?)?;
                let height = parse_dimension("height", required(params, "resize", "height")?)?;
                Self::resize(width, height)
            }
            _ => Err(OperationError::UnknownOperation(name.to_string())),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invert | Self::Grayscale => f.write_str(self.name()),
            Self::Flip { direction } => write!(f, "flip:{direction}"),
            Self::Rotate { degrees } => write!(f, "rotate:{degrees}"),
            Self::Resize { width, height } => write!(f, "resize:{width}x{height}"),
        }
    }
}

/// Compact spec syntax: `invert`, `flip:vertical`, `rotate:90`,
/// `resize:500x400`, `grayscale`
impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (s, None),
        };

        let mut params = BTreeMap::new();
        match (name.trim().to_ascii_lowercase().as_str(), arg) {
            ("flip", Some(direction)) => {
                params.insert("direction".to_string(), direction.to_string());
            }
            ("rotate", Some(degrees)) => {
                params.insert("degrees".to_string(), degrees.to_string());
            }
            ("resize", Some(size)) => {
                let (width, height) = size
                    .split_once(|c: char| c == 'x' || c == 'X')
                    .ok_or_else(|| OperationError::InvalidParameter {
                        parameter: "size",
                        value: size.to_string(),
                        reason: "expected WIDTHxHEIGHT",
                    })?;
                params.insert("width".to_string(), width.trim().to_string());
                params.insert("height".to_string(), height.trim().to_string());
            }
            _ => {}
        }

        Self::from_parts(name, &params)
    }
}

fn required<'a>(
    params: &'a BTreeMap<String, String>,
    operation: &'static str,
    parameter: &'static str,
) -> Result<&'a str, OperationError> {
    params
        .get(parameter)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or(OperationError::MissingParameter {
            operation,
            parameter,
        })
}

fn parse_degrees(raw: &str) -> Result<i32, OperationError> {
    raw.trim()
        .parse()
        .map_err(|_| OperationError::InvalidParameter {
            parameter: "degrees",
            value: raw.to_string(),
            reason: "expected an integer",
        })
}

fn parse_dimension(parameter: &'static str, raw: &str) -> Result<u32, OperationError> {
    raw.trim()
        .parse()
        .map_err(|_| OperationError::InvalidParameter {
            parameter,
            value: raw.to_string(),
            reason: "expected a positive integer",
        })
}

fn check_dimension(parameter: &'static str, value: u32) -> Result<(), OperationError> {
    if value == 0 {
        return Err(OperationError::InvalidParameter {
            parameter,
            value: value.to_string(),
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_resize_literal() {
        assert!(Operation::Resize { width: 640, height: 480 }.validate().is_ok());
        assert!(Operation::Invert.validate().is_ok());
        assert_eq!(
            Operation::Resize { width: 0, height: 480 }.validate(),
            Err(OperationError::InvalidParameter {
                parameter: "width",
                value: "0".to_string(),
                reason: "must be greater than zero",
            })
        );
        assert!(Operation::Resize { width: 10, height: 0 }.validate().is_err());
    }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn endpoints() {
        assert_eq!(Operation::Invert.endpoint(), "/invert");
        assert_eq!(Operation::Grayscale.endpoint(), "/grayscale");
        assert_eq!(Operation::Rotate { degrees: 270 }.endpoint(), "/rotate/270");
        assert_eq!(
            Operation::Flip {
                direction: FlipDirection::Vertical
            }
            .endpoint(),
            "/flip"
        );
        assert_eq!(Operation::resize(10, 20).unwrap().endpoint(), "/resize");
    }

    #[test]
    fn form_fields_per_operation() {
        assert!(Operation::Invert.form_fields().is_empty());
        assert!(Operation::Rotate { degrees: 90 }.form_fields().is_empty());
        assert_eq!(
            Operation::Flip {
                direction: FlipDirection::Horizontal
            }
            .form_fields(),
            vec![("direction", "horizontal".to_string())]
        );
        assert_eq!(
            Operation::resize(500, 400).unwrap().form_fields(),
            vec![("width", "500".to_string()), ("height", "400".to_string())]
        );
    }

    #[test]
    fn summaries() {
        assert_eq!(Operation::Invert.summary(), None);
        assert_eq!(
            Operation::Rotate { degrees: 90 }.summary().as_deref(),
            Some("degrees=90")
        );
        assert_eq!(
            Operation::resize(500, 400).unwrap().summary().as_deref(),
            Some("width=500, height=400")
        );
    }

    #[test]
    fn from_parts_builds_each_operation() {
        assert_eq!(
            Operation::from_parts("Invert", &BTreeMap::new()),
            Ok(Operation::Invert)
        );
        assert_eq!(
            Operation::from_parts("flip", &params(&[("direction", "VERTICAL")])),
            Ok(Operation::Flip {
                direction: FlipDirection::Vertical
            })
        );
        assert_eq!(
            Operation::from_parts("rotate", &params(&[("degrees", "-90")])),
            Ok(Operation::Rotate { degrees: -90 })
        );
        assert_eq!(
            Operation::from_parts("resize", &params(&[("width", "500"), ("height", "500")])),
            Ok(Operation::Resize {
                width: 500,
                height: 500
            })
        );
    }

    #[test]
    fn from_parts_rejects_bad_input() {
        assert_eq!(
            Operation::from_parts("sharpen", &BTreeMap::new()),
            Err(OperationError::UnknownOperation("sharpen".to_string()))
        );
        assert_eq!(
            Operation::from_parts("flip", &BTreeMap::new()),
            Err(OperationError::MissingParameter {
                operation: "flip",
                parameter: "direction"
            })
        );
        assert!(matches!(
            Operation::from_parts("flip", &params(&[("direction", "diagonal")])),
            Err(OperationError::InvalidParameter { parameter: "direction", .. })
        ));
        assert!(matches!(
            Operation::from_parts("rotate", &params(&[("degrees", "ninety")])),
            Err(OperationError::InvalidParameter { parameter: "degrees", .. })
        ));
        assert!(matches!(
            Operation::from_parts("resize", &params(&[("width", "0"), ("height", "5")])),
            Err(OperationError::InvalidParameter { parameter: "width", .. })
        ));
        assert!(matches!(
            Operation::from_parts("resize", &params(&[("width", "-3"), ("height", "5")])),
            Err(OperationError::InvalidParameter { parameter: "width", .. })
        ));
    }

    #[test]
    fn compact_specs_parse() {
        assert_eq!("grayscale".parse::<Operation>(), Ok(Operation::Grayscale));
        assert_eq!(
            "flip:horizontal".parse::<Operation>(),
            Ok(Operation::Flip {
                direction: FlipDirection::Horizontal
            })
        );
        assert_eq!("rotate:180".parse::<Operation>(), Ok(Operation::Rotate { degrees: 180 }));
        assert_eq!(
            "resize:640x480".parse::<Operation>(),
            Ok(Operation::Resize {
                width: 640,
                height: 480
            })
        );
        assert!("resize:640".parse::<Operation>().is_err());
        assert!("rotate".parse::<Operation>().is_err());
    }

    #[test]
    fn display_matches_spec_syntax() {
        for spec in ["invert", "flip:vertical", "rotate:-45", "resize:10x20", "grayscale"] {
            let op: Operation = spec.parse().unwrap();
            assert_eq!(op.to_string(), spec);
        }
    }
}
