//! Evaluation result assembly and the accuracy-test trigger.
//!
//! The evaluation service does the comparison; this module turns its wire
//! payload into an immutable [`EvaluationResult`] (grouping items per
//! category and filling in any aggregates the service omitted) and guards
//! the two trigger paths (by preset, by upload) against empty selections.

pub mod display;

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, WorkflowError};
use crate::traits::backend::EvaluationBackend;
use crate::types::document::Category;
use crate::types::evaluation::{CategoryMetrics, EvaluationPayload, EvaluationResult};
use crate::types::upload::UploadCandidate;
use crate::validate::{validate_candidate, UploadLimits};

impl EvaluationResult {
    /// Assemble a result from the service's wire payload.
    ///
    /// Items are grouped per category in canonical order. Aggregates the
    /// payload supplies are kept verbatim; anything missing is derived from
    /// the raw items per the fixed formulas. The model never recomputes
    /// metrics the source already provided.
    pub fn from_payload(payload: EvaluationPayload) -> Self {
        let mut items = indexmap::IndexMap::new();
        for category in Category::ALL {
            items.insert(category, Vec::new());
        }
        for item in payload.items {
            items
                .entry(item.category)
                .or_insert_with(Vec::new)
                .push(item);
        }

        let category_metrics = match payload.category_metrics {
            Some(supplied) => supplied,
            None => Category::ALL
                .iter()
                .map(|c| (*c, CategoryMetrics::from_items(&items[c])))
                .collect(),
        };

        let overall = match payload.overall {
            Some(supplied) => supplied,
            None => CategoryMetrics::from_items(items.values().flatten()),
        };

        Self {
            id: Uuid::new_v4(),
            test_case: payload.test_case,
            expected: payload.expected,
            actual: payload.actual,
            items,
            category_metrics,
            overall,
        }
    }
}

/// Which selection the evaluation screen is operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// A known test case identified by preset id.
    Preset,

    /// A user-uploaded file scored against its reference answer.
    Upload,
}

/// Trigger for evaluation runs.
///
/// Validates the selection before any network call: preset mode with no
/// preset chosen, or upload mode with no file chosen, fails with
/// [`WorkflowError::NoSelection`] locally.
pub struct EvaluationRunner {
    backend: Arc<dyn EvaluationBackend>,
}

impl EvaluationRunner {
    /// Create a runner over the given evaluation backend.
    pub fn new(backend: Arc<dyn EvaluationBackend>) -> Self {
        Self { backend }
    }

    /// Run an evaluation for whichever selection the current mode uses.
    ///
    /// Preset mode reads only `preset_id`; upload mode reads only
    /// `candidate`. A missing selection for the active mode fails with
    /// [`WorkflowError::NoSelection`] before any network call.
    pub async fn run(
        &self,
        mode: EvaluationMode,
        preset_id: Option<&str>,
        candidate: Option<&UploadCandidate>,
        variant: &str,
    ) -> Result<EvaluationResult> {
        match mode {
            EvaluationMode::Preset => self.run_preset(preset_id, variant).await,
            EvaluationMode::Upload => self.run_upload(candidate, variant).await,
        }
    }

    /// Run an evaluation for a preset test case.
    pub async fn run_preset(
        &self,
        preset_id: Option<&str>,
        variant: &str,
    ) -> Result<EvaluationResult> {
        let preset_id = preset_id
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| WorkflowError::NoSelection {
                expected: "preset".into(),
            })?;

        debug!(preset_id, variant, "running preset evaluation");
        let result = self.backend.evaluate_preset(preset_id, variant).await?;
        info!(
            test_case = %result.test_case,
            f1 = result.overall.f1,
            "evaluation completed"
        );
        Ok(result)
    }

    /// Run an evaluation for an uploaded file.
    ///
    /// The file must be a PDF within the evaluation-path ceiling (10 MiB).
    pub async fn run_upload(
        &self,
        candidate: Option<&UploadCandidate>,
        variant: &str,
    ) -> Result<EvaluationResult> {
        let candidate = candidate.ok_or_else(|| WorkflowError::NoSelection {
            expected: "file".into(),
        })?;
        validate_candidate(candidate, UploadLimits::EVALUATION)?;

        debug!(file = %candidate.file_name, variant, "running upload evaluation");
        let result = self.backend.evaluate_upload(candidate, variant).await?;
        info!(
            test_case = %result.test_case,
            f1 = result.overall.f1,
            "evaluation completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::ExtractedDocument;
    use crate::types::evaluation::{ComparisonItem, MatchKind};

    fn item(category: Category, kind: MatchKind) -> ComparisonItem {
        ComparisonItem {
            kind,
            category,
            expected_value: Some("expected".into()),
            actual_value: Some("actual".into()),
            note: String::new(),
        }
    }

    fn payload(items: Vec<ComparisonItem>) -> EvaluationPayload {
        EvaluationPayload {
            test_case: "bear-creek".into(),
            expected: ExtractedDocument::default(),
            actual: ExtractedDocument::default(),
            items,
            category_metrics: None,
            overall: None,
        }
    }

    #[test]
    fn test_assembly_groups_items_per_category() {
        let result = EvaluationResult::from_payload(payload(vec![
            item(Category::Goals, MatchKind::Exact),
            item(Category::Contacts, MatchKind::Missing),
            item(Category::Goals, MatchKind::Partial),
        ]));

        assert_eq!(result.items[&Category::Goals].len(), 2);
        assert_eq!(result.items[&Category::Contacts].len(), 1);
        assert_eq!(result.items[&Category::Practices].len(), 0);
        // One metrics block per category, in canonical order.
        assert_eq!(result.category_metrics.len(), Category::ALL.len());
        assert_eq!(
            result.items.keys().copied().collect::<Vec<_>>(),
            Category::ALL.to_vec()
        );
    }

    #[test]
    fn test_assembly_derives_metrics_when_absent() {
        let result = EvaluationResult::from_payload(payload(vec![
            item(Category::Goals, MatchKind::Exact),
            item(Category::Goals, MatchKind::Missing),
        ]));

        let goals = &result.category_metrics[&Category::Goals];
        assert_eq!(goals.correct_count, 1);
        assert_eq!(goals.total_extracted, 1);
        assert_eq!(goals.total_expected, 2);
        assert!((goals.recall - 0.5).abs() < f64::EPSILON);
        assert_eq!(result.overall.total_expected, 2);
    }

    #[test]
    fn test_assembly_keeps_supplied_aggregates_verbatim() {
        let supplied = CategoryMetrics::from_counts(7, 10, 14);
        let mut p = payload(vec![item(Category::Goals, MatchKind::Exact)]);
        p.overall = Some(supplied.clone());

        let result = EvaluationResult::from_payload(p);
        assert_eq!(result.overall, supplied);
    }

    #[tokio::test]
    async fn test_preset_run_requires_selection() {
        let backend = Arc::new(crate::testing::ScriptedBackend::new());
        let runner = EvaluationRunner::new(backend.clone());

        let err = runner.run_preset(None, "standard").await.unwrap_err();
        assert!(matches!(err, WorkflowError::NoSelection { .. }));
        let err = runner.run_preset(Some("  "), "standard").await.unwrap_err();
        assert!(matches!(err, WorkflowError::NoSelection { .. }));
        // No network call happened.
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_run_validates_before_calling() {
        let backend = Arc::new(crate::testing::ScriptedBackend::new());
        let runner = EvaluationRunner::new(backend.clone());

        let err = runner.run_upload(None, "standard").await.unwrap_err();
        assert!(matches!(err, WorkflowError::NoSelection { .. }));

        let oversize = UploadCandidate::new(
            "plan.pdf",
            crate::validate::MAX_EVALUATION_UPLOAD_BYTES + 1,
            "application/pdf",
        );
        let err = runner
            .run_upload(Some(&oversize), "standard")
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::FileTooLarge { .. }));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_run_dispatches_on_mode() {
        let backend = Arc::new(crate::testing::ScriptedBackend::new());
        let runner = EvaluationRunner::new(backend.clone());
        let candidate = UploadCandidate::new("plan.pdf", 1024, "application/pdf");

        // Preset mode ignores the candidate: with no preset chosen the run
        // fails locally even though a file is selected.
        let err = runner
            .run(EvaluationMode::Preset, None, Some(&candidate), "standard")
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoSelection { .. }));
        assert!(backend.calls().is_empty());

        let result = runner
            .run(EvaluationMode::Preset, Some("bear-creek"), None, "standard")
            .await
            .unwrap();
        assert_eq!(result.test_case, "bear-creek");

        let result = runner
            .run(EvaluationMode::Upload, None, Some(&candidate), "standard")
            .await
            .unwrap();
        assert_eq!(result.test_case, "plan.pdf");

        use crate::testing::BackendCall;
        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::EvaluatePreset {
                    preset_id: "bear-creek".into()
                },
                BackendCall::EvaluateUpload {
                    file_name: "plan.pdf".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_run_reaches_backend_when_valid() {
        let backend = Arc::new(crate::testing::ScriptedBackend::new());
        let runner = EvaluationRunner::new(backend.clone());

        let candidate = UploadCandidate::new("plan.pdf", 1024, "application/pdf");
        let result = runner.run_upload(Some(&candidate), "standard").await.unwrap();
        assert_eq!(result.test_case, "plan.pdf");
        assert_eq!(backend.calls().len(), 1);
    }
}
