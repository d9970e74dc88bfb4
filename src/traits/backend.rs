//! Backend traits for the extraction and evaluation services.
//!
//! Both the mock and the live service implement one shared capability
//! interface, so the orchestrator holds a strategy value rather than
//! branching on a mode flag at each call site.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::document::ExtractedDocument;
use crate::types::evaluation::EvaluationResult;
use crate::types::upload::{FileSummary, UploadCandidate};

/// Outcome of the connection/health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,

    /// The mode the backend reports for itself (e.g. "mock", "live").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ConnectionStatus {
    /// A successful status with the given message and mode.
    pub fn ok(message: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            mode: Some(mode.into()),
        }
    }

    /// A failed status with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            mode: None,
        }
    }
}

/// Successful response from an extraction call: the structured document plus
/// identifying metadata for the file that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub document: ExtractedDocument,
    pub file: FileSummary,
}

/// Capability interface for an extraction service.
///
/// Implementations wrap a specific service (the live HTTP service, or a
/// canned mock) and surface failures as
/// [`WorkflowError::BackendUnavailable`](crate::error::WorkflowError).
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Submit one file and receive the structured result.
    async fn extract(&self, candidate: &UploadCandidate) -> Result<ExtractionOutcome>;

    /// Health check, independent of the main flow.
    async fn check_health(&self) -> Result<ConnectionStatus>;
}

/// Capability interface for an evaluation (accuracy test) service.
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    /// Score a known preset test case.
    async fn evaluate_preset(&self, preset_id: &str, variant: &str) -> Result<EvaluationResult>;

    /// Score an uploaded file against its reference answer.
    async fn evaluate_upload(
        &self,
        candidate: &UploadCandidate,
        variant: &str,
    ) -> Result<EvaluationResult>;
}
