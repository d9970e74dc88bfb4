//! Watershed Plan Extraction Workflow Library
//!
//! The two stateful cores behind a watershed-plan extraction app: the
//! upload/extraction workflow orchestrator, and the evaluation diff and
//! metrics model. Everything around them (templates, charts, routing) is a
//! thin rendering layer consuming their output; the extraction and
//! evaluation services themselves are black boxes behind trait objects.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use watershed_extraction::{
//!     BackendMode, HttpBackend, Orchestrator, UploadCandidate,
//! };
//!
//! let live = Arc::new(HttpBackend::new("http://localhost:8080")?);
//! let mut workflow = Orchestrator::new(live);
//!
//! // Submit a dropped file; a displayed result triggers a confirmation step.
//! let candidate = UploadCandidate::new("plan.pdf", 5_000_000, "application/pdf");
//! workflow.submit(candidate).await?;
//!
//! // Demo without a live service: loads a sample extraction immediately.
//! workflow.set_mode(BackendMode::Mock).await?;
//! ```
//!
//! # Modules
//!
//! - [`workflow`] - Orchestrator, state machine, export
//! - [`evaluation`] - Diff assembly, metrics, presentation helpers
//! - [`types`] - Document, upload, and evaluation data types
//! - [`validate`] - File acceptance rules
//! - [`traits`] - Backend capability interfaces
//! - [`backends`] - Mock and live HTTP implementations
//! - [`testing`] - Scripted instrumented backend for tests

pub mod backends;
pub mod error;
pub mod evaluation;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validate;
pub mod workflow;

// Re-export core types at crate root
pub use error::{Result, WorkflowError};
pub use traits::backend::{
    ConnectionStatus, EvaluationBackend, ExtractionBackend, ExtractionOutcome,
};
pub use types::{
    document::{
        Category, Contact, ExtractedDocument, GeographicArea, Goal, ImplementationActivity,
        MonitoringParameter, Organization, OutreachActivity, Practice, ReportSummary,
    },
    evaluation::{
        CategoryMetrics, ComparisonItem, EvaluationPayload, EvaluationResult, MatchKind,
    },
    upload::{FileSummary, UploadCandidate},
};
pub use validate::{
    validate_candidate, UploadLimits, ACCEPTED_MIME_TYPE, MAX_EVALUATION_UPLOAD_BYTES,
    MAX_UPLOAD_BYTES,
};

// Re-export the orchestrator surface
pub use workflow::{
    export_document, BackendMode, ExportArtifact, ExportFormat, Orchestrator, Phase,
    SubmitOutcome, WorkflowState,
};

// Re-export the evaluation surface
pub use evaluation::{
    display::{color_class_for, icon_for, DisclosureState},
    EvaluationMode, EvaluationRunner,
};

// Re-export backends
pub use backends::{HttpBackend, MockBackend};

// Re-export testing utilities
pub use testing::{BackendCall, ScriptedBackend};
