//! The upload/extraction workflow orchestrator.
//!
//! Owns the single current file, its processing state, and the resulting
//! structured document (or error), including the conflict-confirmation step
//! when new input arrives while results are already displayed.
//!
//! # State machine
//!
//! ```text
//! Idle ──────────────submit(valid)──────────────▶ Processing
//! Idle/Results ──submit(valid, result shown)──▶ PendingConfirmation
//! PendingConfirmation ──confirm──▶ Processing    (prior result cleared first)
//! PendingConfirmation ──cancel───▶ Results/Idle  (held file discarded)
//! Processing ──backend ok──▶ Results
//! Processing ──backend err─▶ Error
//! Error/Results ──reset────▶ Idle               (atomic, no partial reset)
//! ```
//!
//! Invariant: the machine is never in `Processing` with a document set;
//! processing clears any prior result before starting.

pub mod export;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backends::MockBackend;
use crate::error::{Result, WorkflowError};
use crate::traits::backend::{ConnectionStatus, ExtractionBackend};
use crate::types::document::ExtractedDocument;
use crate::types::upload::{FileSummary, UploadCandidate};
use crate::validate::{validate_candidate, UploadLimits};

pub use export::{export_document, ExportArtifact, ExportFormat};

/// Which backend strategy submissions go to.
///
/// Session-wide, changed explicitly by the user, and read at the moment a
/// submission begins; switching mid-flight does not cancel an in-flight call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Canned data without a live service.
    Mock,

    /// The real extraction service.
    Live,
}

/// The orchestrator's current position in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    PendingConfirmation,
    Processing,
    Results,
    Error,
}

/// Authoritative snapshot of the workflow.
///
/// Exactly one exists per orchestrator; mutated only by orchestrator
/// operations. Read it through [`Orchestrator::state`].
#[derive(Debug, Default)]
pub struct WorkflowState {
    pub phase: Phase,

    /// Metadata for the file most recently accepted into processing.
    pub current_file: Option<FileSummary>,

    /// Whether a drag is hovering the drop target.
    pub drag_active: bool,

    /// Whether a connection test is in flight.
    pub testing_connection: bool,

    /// The displayed result. Immutable once assigned; a new extraction
    /// replaces it wholesale.
    pub document: Option<ExtractedDocument>,

    /// Metadata reported by the backend for the processed file.
    pub uploaded_file: Option<FileSummary>,

    /// The last user-visible error.
    pub last_error: Option<WorkflowError>,

    /// Outcome of the most recent connection test.
    pub connection_status: Option<ConnectionStatus>,

    /// A validated file held while the user decides whether to overwrite
    /// the displayed result.
    pub pending: Option<UploadCandidate>,
}

impl WorkflowState {
    fn new() -> Self {
        Self::default()
    }

    /// Whether an extraction submission is in flight.
    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Processing
    }

    /// Whether a result is currently displayed.
    pub fn has_results(&self) -> bool {
        self.document.is_some()
    }

    fn assert_invariants(&self) {
        debug_assert!(
            !(self.phase == Phase::Processing && self.document.is_some()),
            "processing with a document set"
        );
        debug_assert!(
            self.phase == Phase::PendingConfirmation || self.pending.is_none(),
            "held candidate outside PendingConfirmation"
        );
    }
}

/// How a `submit` call was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The file was processed and the machine reached `Results`.
    Completed,

    /// A result was already displayed; the file is held awaiting
    /// confirmation.
    HeldForConfirmation,
}

/// Manages the end-to-end lifecycle of "a file becomes a structured result".
///
/// Guarantees at most one extraction in flight and never silently discards a
/// displayed result. All mutation goes through `&mut self` operations, so
/// there is exactly one writer by construction.
pub struct Orchestrator {
    mock: Arc<dyn ExtractionBackend>,
    live: Arc<dyn ExtractionBackend>,
    mode: BackendMode,
    state: WorkflowState,

    /// Advances on every submission (and on reset) so a stale response that
    /// lands after a newer submission began is discarded.
    generation: u64,
}

impl Orchestrator {
    /// Create an orchestrator over the given live backend, starting in live
    /// mode with the default canned mock.
    pub fn new(live: Arc<dyn ExtractionBackend>) -> Self {
        Self::with_backends(Arc::new(MockBackend::new()), live)
    }

    /// Create with explicit mock and live strategies.
    pub fn with_backends(
        mock: Arc<dyn ExtractionBackend>,
        live: Arc<dyn ExtractionBackend>,
    ) -> Self {
        Self {
            mock,
            live,
            mode: BackendMode::Live,
            state: WorkflowState::new(),
            generation: 0,
        }
    }

    /// Set the initial mode without the toggle side effects.
    pub fn with_mode(mut self, mode: BackendMode) -> Self {
        self.mode = mode;
        self
    }

    /// The authoritative workflow snapshot.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The currently selected backend mode.
    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Record drag-hover state for the drop target.
    pub fn set_drag_active(&mut self, active: bool) {
        self.state.drag_active = active;
    }

    fn selected_backend(&self) -> Arc<dyn ExtractionBackend> {
        match self.mode {
            BackendMode::Mock => Arc::clone(&self.mock),
            BackendMode::Live => Arc::clone(&self.live),
        }
    }

    /// Submit a candidate file.
    ///
    /// Validates first; a validation failure sets `last_error` and leaves
    /// everything else untouched so the user can retry. If a result is
    /// currently displayed, the candidate is held in `PendingConfirmation`
    /// instead of overwriting it. Otherwise the selected backend is called
    /// exactly once for the candidate.
    pub async fn submit(&mut self, candidate: UploadCandidate) -> Result<SubmitOutcome> {
        if let Err(err) = validate_candidate(&candidate, UploadLimits::EXTRACTION) {
            warn!(file = %candidate.file_name, error = %err, "rejected candidate");
            self.state.last_error = Some(err.clone());
            return Err(err);
        }

        if self.state.has_results() {
            debug!(file = %candidate.file_name, "result displayed, holding for confirmation");
            self.state.pending = Some(candidate);
            self.state.phase = Phase::PendingConfirmation;
            self.state.assert_invariants();
            return Ok(SubmitOutcome::HeldForConfirmation);
        }

        self.begin_processing(candidate).await?;
        Ok(SubmitOutcome::Completed)
    }

    /// Resolve a pending confirmation by submitting the held file.
    ///
    /// The prior result is cleared before the backend call begins. A no-op
    /// when nothing is pending.
    pub async fn confirm_pending_upload(&mut self) -> Result<()> {
        let Some(candidate) = self.state.pending.take() else {
            return Ok(());
        };
        self.begin_processing(candidate).await
    }

    /// Resolve a pending confirmation by discarding the held file.
    ///
    /// The previously displayed result, if any, is preserved unmodified.
    /// Cancel applies only to the confirmation step: with nothing pending
    /// this is a strict no-op.
    pub fn cancel_pending_upload(&mut self) {
        if self.state.pending.is_none() {
            return;
        }
        self.state.pending = None;
        self.state.phase = if self.state.has_results() {
            Phase::Results
        } else {
            Phase::Idle
        };
        self.state.assert_invariants();
    }

    async fn begin_processing(&mut self, candidate: UploadCandidate) -> Result<()> {
        self.generation += 1;
        let generation = self.generation;

        self.state.pending = None;
        self.state.document = None;
        self.state.uploaded_file = None;
        self.state.last_error = None;
        self.state.current_file = Some(candidate.summary());
        self.state.phase = Phase::Processing;
        self.state.assert_invariants();

        info!(file = %candidate.file_name, mode = ?self.mode, "starting extraction");
        let backend = self.selected_backend();
        let outcome = backend.extract(&candidate).await;

        if generation != self.generation {
            debug!(file = %candidate.file_name, "discarding stale extraction response");
            return Ok(());
        }

        match outcome {
            Ok(outcome) => {
                info!(
                    file = %outcome.file.name,
                    goals = outcome.document.report_summary.total_goals,
                    "extraction completed"
                );
                self.state.document = Some(outcome.document);
                self.state.uploaded_file = Some(outcome.file);
                self.state.phase = Phase::Results;
                self.state.assert_invariants();
                Ok(())
            }
            Err(err) => {
                warn!(file = %candidate.file_name, error = %err, "extraction failed");
                self.state.last_error = Some(err.clone());
                self.state.phase = Phase::Error;
                self.state.assert_invariants();
                Err(err)
            }
        }
    }

    /// Check the selected backend's health.
    ///
    /// Independent of the main flow: records the status without touching the
    /// displayed document. A failed call is recorded as an unsuccessful
    /// status, not an error.
    pub async fn test_connection(&mut self) -> ConnectionStatus {
        self.state.testing_connection = true;
        let backend = self.selected_backend();

        let status = match backend.check_health().await {
            Ok(status) => status,
            Err(err) => ConnectionStatus::failed(err.to_string()),
        };

        self.state.testing_connection = false;
        self.state.connection_status = Some(status.clone());
        status
    }

    /// Switch the backend strategy.
    ///
    /// Deliberately asymmetric: switching to mock auto-triggers one sample
    /// extraction for immediate visual feedback (replacing any displayed
    /// result, no confirmation step); switching to live clears all workflow
    /// state. Re-selecting the current mode is a no-op.
    pub async fn set_mode(&mut self, mode: BackendMode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        self.mode = mode;

        match mode {
            BackendMode::Mock => {
                info!("switched to mock backend, loading sample extraction");
                self.begin_processing(MockBackend::sample_candidate()).await
            }
            BackendMode::Live => {
                info!("switched to live backend");
                self.reset();
                Ok(())
            }
        }
    }

    /// Return to `Idle`, clearing every field atomically.
    pub fn reset(&mut self) {
        // Invalidates any response still in flight.
        self.generation += 1;
        self.state = WorkflowState::new();
        debug!("workflow reset");
    }

    /// Serialize the current document for download.
    ///
    /// Only JSON is implemented; other formats are accepted but not yet
    /// available and yield no artifact, as does exporting with no result
    /// displayed.
    pub fn export_current_result(&self, format: ExportFormat) -> Result<Option<ExportArtifact>> {
        match &self.state.document {
            Some(document) => export_document(document, format, chrono::Utc::now()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BackendCall, ScriptedBackend};

    fn pdf(name: &str) -> UploadCandidate {
        UploadCandidate::new(name, 5 * 1024 * 1024, "application/pdf")
    }

    #[tokio::test]
    async fn test_submit_transitions_to_results() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut orch = Orchestrator::with_backends(backend.clone(), backend.clone());

        let outcome = orch.submit(pdf("plan.pdf")).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(orch.state().phase, Phase::Results);
        assert!(orch.state().has_results());
        assert_eq!(orch.state().uploaded_file.as_ref().unwrap().name, "plan.pdf");
    }

    #[tokio::test]
    async fn test_backend_failure_lands_in_error_phase() {
        let backend = Arc::new(ScriptedBackend::new().with_extract_failure("service down"));
        let mut orch = Orchestrator::with_backends(backend.clone(), backend.clone());

        let err = orch.submit(pdf("plan.pdf")).await.unwrap_err();
        assert!(matches!(err, WorkflowError::BackendUnavailable { .. }));
        assert_eq!(orch.state().phase, Phase::Error);
        assert!(!orch.state().has_results());
        assert!(!orch.state().is_processing());
    }

    #[tokio::test]
    async fn test_connection_test_does_not_touch_document() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut orch = Orchestrator::with_backends(backend.clone(), backend.clone());

        orch.submit(pdf("plan.pdf")).await.unwrap();
        let before = orch.state().document.clone();

        let status = orch.test_connection().await;
        assert!(status.success);
        assert_eq!(orch.state().document, before);
        assert!(!orch.state().testing_connection);
        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::Extract {
                    file_name: "plan.pdf".into()
                },
                BackendCall::CheckHealth,
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_health_check_records_unsuccessful_status() {
        let backend = Arc::new(ScriptedBackend::new().with_health_failure("no route"));
        let mut orch = Orchestrator::with_backends(backend.clone(), backend.clone());

        let status = orch.test_connection().await;
        assert!(!status.success);
        assert!(orch.state().connection_status.as_ref().is_some_and(|s| !s.success));
    }

    #[tokio::test]
    async fn test_reselecting_current_mode_is_noop() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut orch = Orchestrator::with_backends(backend.clone(), backend.clone());

        orch.set_mode(BackendMode::Live).await.unwrap();
        assert!(backend.calls().is_empty());
    }
}
