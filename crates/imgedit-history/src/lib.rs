//! imgedit History - linear edit history
//!
//! Records the ordered sequence of processing steps applied to one image:
//! - Every step carries the artifact reference the service produced
//! - The active artifact is always the last step's artifact
//! - Reverting truncates the sequence; discarded steps are gone for good
//!
//! # Example
//!
//! ```rust
//! use imgedit_history::{ArtifactRef, History};
//!
//! let mut history = History::new();
//! history.append("Upload", ArtifactRef::new("img1.png").unwrap(), None);
//! history.append("invert", ArtifactRef::new("img2.png").unwrap(), None);
//!
//! history.revert_to(0).unwrap();
//! assert_eq!(history.current_artifact().unwrap().as_str(), "img1.png");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod error;
mod history;
mod step;

pub use artifact::ArtifactRef;
pub use error::HistoryError;
pub use history::History;
pub use step::Step;

/// Operation name recorded for the initial upload step
pub const UPLOAD_OPERATION: &str = "Upload";

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
