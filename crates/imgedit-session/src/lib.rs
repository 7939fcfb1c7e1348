//! imgedit Session - operation dispatcher
//!
//! Drives a remote image-processing service while keeping a linear edit
//! history:
//! - Pipelines the active artifact into each new operation
//! - Serializes requests (one in flight, others rejected as busy)
//! - Discards results that arrive after the session was reset
//! - Reports every failure as a value, never half-applying it
//!
//! # Example
//!
//! ```rust,ignore
//! use imgedit_client::{HttpImageService, ImageUpload, Operation, ServiceConfig};
//! use imgedit_session::EditSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HttpImageService::new(ServiceConfig::default())?;
//! let session = EditSession::new(service);
//!
//! session.upload(ImageUpload::from_path("cat.png").await?).await?;
//! session.apply(Operation::Invert).await?;
//! session.apply(Operation::Grayscale).await?;
//! session.revert(1)?;
//!
//! println!("now showing {:?}", session.current_artifact());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
mod guard;
pub mod session;

pub use error::SessionError;
pub use session::{EditSession, SessionId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
