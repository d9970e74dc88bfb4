//! Live HTTP backend for the extraction and evaluation services.
//!
//! Thin reqwest client against the service's REST surface. Transport
//! failures and non-success statuses both surface as
//! [`WorkflowError::BackendUnavailable`]; no retries happen here.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, WorkflowError};
use crate::traits::backend::{
    ConnectionStatus, EvaluationBackend, ExtractionBackend, ExtractionOutcome,
};
use crate::types::document::ExtractedDocument;
use crate::types::evaluation::{EvaluationPayload, EvaluationResult};
use crate::types::upload::{FileSummary, UploadCandidate};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the live extraction/evaluation service.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

// Request/response types for the service API

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractResponse {
    success: bool,
    document: Option<ExtractedDocument>,
    file: Option<FileSummary>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct HealthResponse {
    success: bool,
    message: String,
    mode: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetEvaluationRequest<'a> {
    preset_id: &'a str,
    extraction_model_variant: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationResponse {
    success: bool,
    result: Option<EvaluationPayload>,
    error: Option<String>,
}

impl HttpBackend {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_part(candidate: &UploadCandidate) -> Result<Part> {
        Part::bytes(candidate.bytes.clone())
            .file_name(candidate.file_name.clone())
            .mime_str(&candidate.mime_type)
            .map_err(|e| WorkflowError::backend(e.to_string()))
    }

    async fn parse_evaluation(response: reqwest::Response) -> Result<EvaluationResult> {
        let status = response.status();
        if !status.is_success() {
            return Err(WorkflowError::backend(format!(
                "evaluation service returned {status}"
            )));
        }

        let body: EvaluationResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        if !body.success {
            let message = body.error.unwrap_or_else(|| "evaluation failed".into());
            warn!(%message, "evaluation service reported failure");
            return Err(WorkflowError::backend(message));
        }

        let payload = body
            .result
            .ok_or_else(|| WorkflowError::backend("evaluation response had no result"))?;
        Ok(EvaluationResult::from_payload(payload))
    }
}

#[async_trait]
impl ExtractionBackend for HttpBackend {
    async fn extract(&self, candidate: &UploadCandidate) -> Result<ExtractionOutcome> {
        debug!(file = %candidate.file_name, size = candidate.size, "posting file for extraction");

        let form = Form::new().part("file", Self::file_part(candidate)?);
        let response = self
            .client
            .post(self.url("/api/extract"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkflowError::backend(format!(
                "extraction service returned {status}"
            )));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        if !body.success {
            let message = body.error.unwrap_or_else(|| "extraction failed".into());
            warn!(%message, "extraction service reported failure");
            return Err(WorkflowError::backend(message));
        }

        let document = body
            .document
            .ok_or_else(|| WorkflowError::backend("extraction response had no document"))?;
        let file = body.file.unwrap_or_else(|| candidate.summary());

        Ok(ExtractionOutcome { document, file })
    }

    async fn check_health(&self) -> Result<ConnectionStatus> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkflowError::backend(format!(
                "health check returned {status}"
            )));
        }

        let body: HealthResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        Ok(ConnectionStatus {
            success: body.success,
            message: body.message,
            mode: body.mode,
        })
    }
}

#[async_trait]
impl EvaluationBackend for HttpBackend {
    async fn evaluate_preset(&self, preset_id: &str, variant: &str) -> Result<EvaluationResult> {
        debug!(preset_id, variant, "requesting preset evaluation");

        let response = self
            .client
            .post(self.url("/api/evaluate/preset"))
            .json(&PresetEvaluationRequest {
                preset_id,
                extraction_model_variant: variant,
            })
            .send()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        Self::parse_evaluation(response).await
    }

    async fn evaluate_upload(
        &self,
        candidate: &UploadCandidate,
        variant: &str,
    ) -> Result<EvaluationResult> {
        debug!(file = %candidate.file_name, variant, "posting file for evaluation");

        let form = Form::new()
            .part("file", Self::file_part(candidate)?)
            .text("extractionModelVariant", variant.to_string());

        let response = self
            .client
            .post(self.url("/api/evaluate/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| WorkflowError::backend(e.to_string()))?;

        Self::parse_evaluation(response).await
    }
}
