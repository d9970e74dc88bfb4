//! Testing utilities including a scripted backend.
//!
//! Useful for testing the orchestrator and evaluation trigger without real
//! network calls or mock-path delays. Unlike
//! [`MockBackend`](crate::backends::MockBackend), which exists for demos,
//! the scripted backend records every call for assertions and responds
//! instantly.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Result, WorkflowError};
use crate::traits::backend::{
    ConnectionStatus, EvaluationBackend, ExtractionBackend, ExtractionOutcome,
};
use crate::types::document::{ExtractedDocument, Goal};
use crate::types::evaluation::{EvaluationPayload, EvaluationResult};
use crate::types::upload::UploadCandidate;

/// Record of a call made to the scripted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Extract { file_name: String },
    CheckHealth,
    EvaluatePreset { preset_id: String },
    EvaluateUpload { file_name: String },
}

/// A deterministic, instantly-responding backend with call tracking.
#[derive(Default)]
pub struct ScriptedBackend {
    /// Predefined documents by file name
    documents: Arc<RwLock<HashMap<String, ExtractedDocument>>>,

    /// Predefined evaluation results by test case
    evaluations: Arc<RwLock<HashMap<String, EvaluationResult>>>,

    /// When set, every extract call fails with this message
    extract_failure: Arc<RwLock<Option<String>>>,

    /// When set, every health check fails with this message
    health_failure: Arc<RwLock<Option<String>>>,

    /// Health status override
    health_status: Arc<RwLock<Option<ConnectionStatus>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<BackendCall>>>,
}

impl ScriptedBackend {
    /// Create a scripted backend with default deterministic responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Predefine the document returned for a file name.
    pub fn with_document(self, file_name: impl Into<String>, document: ExtractedDocument) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(file_name.into(), document);
        self
    }

    /// Predefine the evaluation result for a test case (preset id or file
    /// name).
    pub fn with_evaluation(self, test_case: impl Into<String>, result: EvaluationResult) -> Self {
        self.evaluations
            .write()
            .unwrap()
            .insert(test_case.into(), result);
        self
    }

    /// Make every extract call fail.
    pub fn with_extract_failure(self, message: impl Into<String>) -> Self {
        *self.extract_failure.write().unwrap() = Some(message.into());
        self
    }

    /// Make every health check fail.
    pub fn with_health_failure(self, message: impl Into<String>) -> Self {
        *self.health_failure.write().unwrap() = Some(message.into());
        self
    }

    /// Override the health status returned on success.
    pub fn with_health_status(self, status: ConnectionStatus) -> Self {
        *self.health_status.write().unwrap() = Some(status);
        self
    }

    /// All calls made to this backend, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extract calls made so far.
    pub fn extract_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::Extract { .. }))
            .count()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    /// Generate a distinct default document for an unknown file name.
    fn default_document(file_name: &str) -> ExtractedDocument {
        let mut doc = ExtractedDocument {
            goals: vec![Goal {
                description: format!("Goal extracted from {file_name}"),
                schedule: None,
            }],
            ..Default::default()
        };
        doc.update_summary();
        doc
    }

    fn default_evaluation(test_case: &str) -> EvaluationResult {
        EvaluationResult::from_payload(EvaluationPayload {
            test_case: test_case.into(),
            expected: Self::default_document(test_case),
            actual: Self::default_document(test_case),
            items: vec![],
            category_metrics: None,
            overall: None,
        })
    }
}

#[async_trait]
impl ExtractionBackend for ScriptedBackend {
    async fn extract(&self, candidate: &UploadCandidate) -> Result<ExtractionOutcome> {
        self.calls.write().unwrap().push(BackendCall::Extract {
            file_name: candidate.file_name.clone(),
        });

        if let Some(message) = self.extract_failure.read().unwrap().clone() {
            return Err(WorkflowError::backend(message));
        }

        let document = self
            .documents
            .read()
            .unwrap()
            .get(&candidate.file_name)
            .cloned()
            .unwrap_or_else(|| Self::default_document(&candidate.file_name));

        Ok(ExtractionOutcome {
            document,
            file: candidate.summary(),
        })
    }

    async fn check_health(&self) -> Result<ConnectionStatus> {
        self.calls.write().unwrap().push(BackendCall::CheckHealth);

        if let Some(message) = self.health_failure.read().unwrap().clone() {
            return Err(WorkflowError::backend(message));
        }

        Ok(self
            .health_status
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ConnectionStatus::ok("Scripted backend ready", "scripted")))
    }
}

#[async_trait]
impl EvaluationBackend for ScriptedBackend {
    async fn evaluate_preset(&self, preset_id: &str, _variant: &str) -> Result<EvaluationResult> {
        self.calls.write().unwrap().push(BackendCall::EvaluatePreset {
            preset_id: preset_id.to_string(),
        });

        Ok(self
            .evaluations
            .read()
            .unwrap()
            .get(preset_id)
            .cloned()
            .unwrap_or_else(|| Self::default_evaluation(preset_id)))
    }

    async fn evaluate_upload(
        &self,
        candidate: &UploadCandidate,
        _variant: &str,
    ) -> Result<EvaluationResult> {
        self.calls.write().unwrap().push(BackendCall::EvaluateUpload {
            file_name: candidate.file_name.clone(),
        });

        Ok(self
            .evaluations
            .read()
            .unwrap()
            .get(&candidate.file_name)
            .cloned()
            .unwrap_or_else(|| Self::default_evaluation(&candidate.file_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let backend = ScriptedBackend::new();
        let candidate = UploadCandidate::new("a.pdf", 10, "application/pdf");

        backend.extract(&candidate).await.unwrap();
        backend.check_health().await.unwrap();
        backend.evaluate_preset("bear-creek", "standard").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::Extract {
                    file_name: "a.pdf".into()
                },
                BackendCall::CheckHealth,
                BackendCall::EvaluatePreset {
                    preset_id: "bear-creek".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_default_documents_differ_per_file() {
        let backend = ScriptedBackend::new();
        let a = backend
            .extract(&UploadCandidate::new("a.pdf", 10, "application/pdf"))
            .await
            .unwrap();
        let b = backend
            .extract(&UploadCandidate::new("b.pdf", 10, "application/pdf"))
            .await
            .unwrap();
        assert_ne!(a.document, b.document);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let backend = ScriptedBackend::new().with_extract_failure("boom");
        let err = backend
            .extract(&UploadCandidate::new("a.pdf", 10, "application/pdf"))
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::backend("boom"));
    }
}
