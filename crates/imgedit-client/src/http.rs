//! reqwest implementation of [`ImageService`]
//!
//! Endpoints (relative to the configured base URL):
//! - `POST /upload` multipart field `file`
//! - `POST /invert`, `/flip`, `/rotate/{degrees}`, `/resize`, `/grayscale`
//!   multipart field `previousImage` plus the operation's own fields
//!
//! Every response body is taken as the new artifact reference.

use crate::config::ServiceConfig;
use crate::error::{ConfigError, ServiceError};
use crate::operation::Operation;
use crate::service::ImageService;
use crate::upload::ImageUpload;
use async_trait::async_trait;
use imgedit_history::ArtifactRef;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Form field carrying the input artifact of an operation
pub const PREVIOUS_IMAGE_FIELD: &str = "previousImage";

/// Form field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// HTTP client for the processing service
#[derive(Debug, Clone)]
pub struct HttpImageService {
    client: Client,
    config: ServiceConfig,
}

impl HttpImageService {
    /// Create new client from configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn post(&self, path: &str, form: Form) -> Result<ArtifactRef, ServiceError> {
        let url = self.config.endpoint_url(path);
        tracing::debug!(%url, "posting to image service");

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "image service rejected request");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_artifact(&body)
    }
}

#[async_trait]
impl ImageService for HttpImageService {
    async fn upload(&self, file: ImageUpload) -> Result<ArtifactRef, ServiceError> {
        if file.is_empty() {
            return Err(ServiceError::EmptyPayload);
        }

        let content_type = file.content_type();
        let file_name = file.file_name().to_string();
        let part = Part::bytes(file.into_bytes())
            .file_name(file_name)
            .mime_str(content_type)?;

        self.post("/upload", Form::new().part(FILE_FIELD, part)).await
    }

    async fn process(
        &self,
        previous: ArtifactRef,
        operation: Operation,
    ) -> Result<ArtifactRef, ServiceError> {
        let form = operation.form_fields().into_iter().fold(
            Form::new().text(PREVIOUS_IMAGE_FIELD, previous.into_inner()),
            |form, (name, value)| form.text(name, value),
        );

        self.post(&operation.endpoint(), form).await
    }
}

/// Interpret a response body as an artifact reference
///
/// Accepts a bare string or a JSON string literal.
fn parse_artifact(body: &str) -> Result<ArtifactRef, ServiceError> {
    let trimmed = body.trim();
    let value = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).unwrap_or_else(|_| trimmed.to_string())
    } else {
        trimmed.to_string()
    };
    ArtifactRef::new(value).map_err(|_| ServiceError::EmptyResponse)
}
