//! Testing utilities for imgedit workspace
//!
//! Shared test doubles and fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use imgedit_client::{ImageService, ImageUpload, Operation, ServiceError};
use imgedit_history::ArtifactRef;
use imgedit_session::{EditSession, SessionError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

/// Call observed by a [`ScriptedService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Upload { file_name: String, len: usize },
    Process { previous: ArtifactRef, operation: Operation },
}

/// Queued reply
#[derive(Debug, Clone)]
pub enum Reply {
    Artifact(String),
    Status(u16, String),
}

#[derive(Debug)]
struct Gate {
    entered: Notify,
    permits: Semaphore,
}

/// In-memory [`ImageService`]
///
/// Replies come from the queue first; once it is drained every call
/// answers `img{n}.png`, `n` being the 1-based call number. A gated
/// service parks each call until [`ScriptedService::release`].
#[derive(Debug, Default)]
pub struct ScriptedService {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<ServiceCall>>,
    gate: Option<Gate>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every call until released
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate {
            entered: Notify::new(),
            permits: Semaphore::new(0),
        });
        self
    }

    #[must_use]
    pub fn then_ok(self, artifact: impl Into<String>) -> Self {
        self.replies.lock().push_back(Reply::Artifact(artifact.into()));
        self
    }

    #[must_use]
    pub fn then_fail(self, status: u16, body: impl Into<String>) -> Self {
        self.replies.lock().push_back(Reply::Status(status, body.into()));
        self
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Wait until a gated call has been received
    pub async fn wait_for_call(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notified().await;
        }
    }

    /// Let one gated call complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.permits.add_permits(1);
        }
    }

    async fn respond(&self, call: ServiceCall) -> Result<ArtifactRef, ServiceError> {
        let n = {
            let mut calls = self.calls.lock();
            calls.push(call);
            calls.len()
        };

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            if let Ok(permit) = gate.permits.acquire().await {
                permit.forget();
            }
        }

        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Reply::Artifact(format!("img{n}.png")));
        match reply {
            Reply::Artifact(artifact) => {
                ArtifactRef::new(artifact).map_err(|_| ServiceError::EmptyResponse)
            }
            Reply::Status(status, body) => Err(ServiceError::Status { status, body }),
        }
    }
}

#[async_trait]
impl ImageService for ScriptedService {
    async fn upload(&self, file: ImageUpload) -> Result<ArtifactRef, ServiceError> {
        self.respond(ServiceCall::Upload {
            file_name: file.file_name().to_string(),
            len: file.len(),
        })
        .await
    }

    async fn process(
        &self,
        previous: ArtifactRef,
        operation: Operation,
    ) -> Result<ArtifactRef, ServiceError> {
        self.respond(ServiceCall::Process {
            previous,
            operation,
        })
        .await
    }
}

/// Small PNG-signature payload
pub fn png_upload() -> ImageUpload {
    ImageUpload::new("fixture.png", b"\x89PNG\r\n\x1a\nfixture".to_vec())
}

/// Session over a fresh [`ScriptedService`], shared with the caller
pub fn scripted_session(
    service: ScriptedService,
) -> (Arc<EditSession<Arc<ScriptedService>>>, Arc<ScriptedService>) {
    let service = Arc::new(service);
    let session = Arc::new(EditSession::new(Arc::clone(&service)));
    (session, service)
}

/// Session that has already uploaded [`png_upload`]
pub async fn uploaded_session(
    service: ScriptedService,
) -> Result<(Arc<EditSession<Arc<ScriptedService>>>, Arc<ScriptedService>), SessionError> {
    let (session, service) = scripted_session(service);
    session.upload(png_upload()).await?;
    Ok((session, service))
}

pub fn artifact(name: &str) -> ArtifactRef {
    ArtifactRef::new(name).unwrap_or_else(|e| panic!("invalid fixture artifact {name:?}: {e}"))
}
