//! Service seam
//!
//! The session only ever talks to the backend through [`ImageService`],
//! so tests can substitute scripted or mocked implementations.

use crate::error::ServiceError;
use crate::operation::Operation;
use crate::upload::ImageUpload;
use async_trait::async_trait;
use imgedit_history::ArtifactRef;
use std::sync::Arc;

/// Remote image-processing backend
///
/// # Contract
/// - Each call issues exactly one external request
/// - Returned references are opaque; they are never parsed
/// - No retries; failures surface unchanged
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Upload a new source image
    async fn upload(&self, file: ImageUpload) -> Result<ArtifactRef, ServiceError>;

    /// Apply `operation` to the image behind `previous`
    async fn process(
        &self,
        previous: ArtifactRef,
        operation: Operation,
    ) -> Result<ArtifactRef, ServiceError>;
}

#[async_trait]
impl<T: ImageService + ?Sized> ImageService for Arc<T> {
    async fn upload(&self, file: ImageUpload) -> Result<ArtifactRef, ServiceError> {
        (**self).upload(file).await
    }

    async fn process(
        &self,
        previous: ArtifactRef,
        operation: Operation,
    ) -> Result<ArtifactRef, ServiceError> {
        (**self).process(previous, operation).await
    }
}
