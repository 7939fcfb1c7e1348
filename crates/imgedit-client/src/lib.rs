//! imgedit Client - remote image-processing service
//!
//! Everything needed to talk to the processing backend:
//! - [`Operation`]: the processing operations and their request shape
//! - [`ImageService`]: the async seam the session dispatches through
//! - [`HttpImageService`]: reqwest implementation of the REST API
//! - [`ServiceConfig`]: base URL, timeout and TOML loading
//!
//! # Example
//!
//! ```rust,ignore
//! use imgedit_client::{HttpImageService, ImageService, ImageUpload, Operation, ServiceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HttpImageService::new(ServiceConfig::default())?;
//!
//! let upload = ImageUpload::from_path("cat.png").await?;
//! let original = service.upload(upload).await?;
//! let inverted = service.process(original, Operation::Invert).await?;
//! println!("inverted image at {inverted}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod operation;
pub mod service;
pub mod upload;

pub use config::ServiceConfig;
pub use error::{ConfigError, OperationError, ServiceError};
pub use http::HttpImageService;
pub use operation::{FlipDirection, Operation};
pub use service::ImageService;
pub use upload::ImageUpload;

pub use imgedit_history::ArtifactRef;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
