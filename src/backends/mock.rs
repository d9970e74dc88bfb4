//! Canned backend for demos and offline use.
//!
//! Returns a fixed sample watershed plan after a randomized delay, so the
//! workflow can be exercised end to end without a live service. Carries no
//! extraction logic of its own.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::traits::backend::{
    ConnectionStatus, EvaluationBackend, ExtractionBackend, ExtractionOutcome,
};
use crate::types::document::{
    Category, Contact, ExtractedDocument, GeographicArea, Goal, ImplementationActivity,
    MonitoringParameter, Organization, OutreachActivity, Practice,
};
use crate::types::evaluation::{
    ComparisonItem, EvaluationPayload, EvaluationResult, MatchKind,
};
use crate::types::upload::UploadCandidate;
use crate::validate::ACCEPTED_MIME_TYPE;

/// A stand-in extraction/evaluation backend returning canned data.
///
/// The delay simulates processing time (1–3 seconds by default, jittered).
/// Tests can flatten it with [`MockBackend::with_delay`].
pub struct MockBackend {
    delay_min: Duration,
    delay_max: Duration,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            delay_min: Duration::from_millis(1000),
            delay_max: Duration::from_millis(3000),
        }
    }
}

impl MockBackend {
    /// Create a mock with the default 1000–3000 ms delay window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed delay instead of the jittered window.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_min = delay;
        self.delay_max = delay;
        self
    }

    /// Use a custom jitter window.
    pub fn with_delay_range(mut self, min: Duration, max: Duration) -> Self {
        self.delay_min = min;
        self.delay_max = max;
        self
    }

    /// The synthetic candidate submitted when the user toggles to mock mode.
    pub fn sample_candidate() -> UploadCandidate {
        UploadCandidate::new("sample-watershed-plan.pdf", 2_457_600, ACCEPTED_MIME_TYPE)
    }

    /// The canned sample document.
    pub fn sample_document() -> ExtractedDocument {
        let mut doc = ExtractedDocument {
            goals: vec![
                Goal {
                    description: "Reduce total phosphorus loading to Bear Creek by 40%".into(),
                    schedule: Some("by 2030".into()),
                },
                Goal {
                    description: "Restore 12 miles of riparian habitat for native trout".into(),
                    schedule: Some("by 2028".into()),
                },
            ],
            practices: vec![
                Practice {
                    name: "Riparian buffer strips".into(),
                    description: Some("30-foot vegetated buffers on agricultural reaches".into()),
                },
                Practice {
                    name: "Cover cropping".into(),
                    description: Some("Winter cover crops on row-crop fields in the upper basin".into()),
                },
                Practice {
                    name: "Streambank stabilization".into(),
                    description: None,
                },
            ],
            implementation_activities: vec![
                ImplementationActivity {
                    description: "Install buffer strips on 40 priority parcels".into(),
                    responsible_party: Some("Bear Creek Conservation District".into()),
                    schedule: Some("2026-2028".into()),
                },
                ImplementationActivity {
                    description: "Cost-share program for cover crop adoption".into(),
                    responsible_party: Some("County SWCD".into()),
                    schedule: Some("annual".into()),
                },
            ],
            monitoring_parameters: vec![
                MonitoringParameter {
                    parameter: "Total phosphorus".into(),
                    frequency: Some("monthly".into()),
                    target_value: Some("< 0.08 mg/L".into()),
                },
                MonitoringParameter {
                    parameter: "Turbidity".into(),
                    frequency: Some("biweekly".into()),
                    target_value: Some("< 25 NTU".into()),
                },
                MonitoringParameter {
                    parameter: "Macroinvertebrate index".into(),
                    frequency: Some("annual".into()),
                    target_value: None,
                },
            ],
            outreach_activities: vec![
                OutreachActivity {
                    description: "Annual landowner field day on buffer maintenance".into(),
                    audience: Some("riparian landowners".into()),
                },
                OutreachActivity {
                    description: "Classroom water-quality monitoring program".into(),
                    audience: Some("area high schools".into()),
                },
            ],
            geographic_areas: vec![
                GeographicArea {
                    name: "Bear Creek Watershed".into(),
                    huc_code: Some("070801050304".into()),
                },
                GeographicArea {
                    name: "Upper Bear Creek subwatershed".into(),
                    huc_code: None,
                },
            ],
            contacts: vec![Contact {
                name: "Jamie Orr".into(),
                role: Some("Watershed Coordinator".into()),
                organization: Some("Bear Creek Conservation District".into()),
                email: Some("jorr@bearcreekcd.org".into()),
            }],
            organizations: vec![
                Organization {
                    name: "Bear Creek Conservation District".into(),
                    role: Some("lead agency".into()),
                },
                Organization {
                    name: "State Department of Natural Resources".into(),
                    role: Some("funding partner".into()),
                },
            ],
            report_summary: Default::default(),
        };
        doc.update_summary();
        doc
    }

    /// The canned evaluation run used by the accuracy screen in mock mode.
    pub fn sample_evaluation(test_case: &str) -> EvaluationResult {
        let expected = Self::sample_document();

        // The "actual" run misses one goal and invents an extra practice.
        let mut actual = expected.clone();
        let dropped_goal = actual.goals.pop();
        actual.practices.push(Practice {
            name: "Rain gardens".into(),
            description: None,
        });
        actual.update_summary();

        let mut items = vec![ComparisonItem {
            kind: MatchKind::Exact,
            category: Category::Goals,
            expected_value: Some(expected.goals[0].description.clone()),
            actual_value: Some(actual.goals[0].description.clone()),
            note: "verbatim match".into(),
        }];
        if let Some(goal) = dropped_goal {
            items.push(ComparisonItem {
                kind: MatchKind::Missing,
                category: Category::Goals,
                expected_value: Some(goal.description),
                actual_value: None,
                note: "not present in extraction output".into(),
            });
        }
        for practice in &expected.practices {
            items.push(ComparisonItem {
                kind: MatchKind::Exact,
                category: Category::Practices,
                expected_value: Some(practice.name.clone()),
                actual_value: Some(practice.name.clone()),
                note: String::new(),
            });
        }
        items.push(ComparisonItem {
            kind: MatchKind::Extra,
            category: Category::Practices,
            expected_value: None,
            actual_value: Some("Rain gardens".into()),
            note: "no corresponding practice in the reference answer".into(),
        });
        items.push(ComparisonItem {
            kind: MatchKind::Partial,
            category: Category::Contacts,
            expected_value: Some("Jamie Orr, Watershed Coordinator".into()),
            actual_value: Some("J. Orr".into()),
            note: "name matches, role missing".into(),
        });

        EvaluationResult::from_payload(EvaluationPayload {
            test_case: test_case.into(),
            expected,
            actual,
            items,
            category_metrics: None,
            overall: None,
        })
    }

    async fn simulate_processing(&self) {
        let delay = if self.delay_max > self.delay_min {
            let window = (self.delay_max - self.delay_min).as_millis() as u64;
            self.delay_min + Duration::from_millis(fastrand::u64(0..=window))
        } else {
            self.delay_min
        };
        debug!(delay_ms = delay.as_millis() as u64, "mock backend processing");
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl ExtractionBackend for MockBackend {
    async fn extract(&self, candidate: &UploadCandidate) -> Result<ExtractionOutcome> {
        self.simulate_processing().await;
        Ok(ExtractionOutcome {
            document: Self::sample_document(),
            file: candidate.summary(),
        })
    }

    async fn check_health(&self) -> Result<ConnectionStatus> {
        Ok(ConnectionStatus::ok("Mock extraction service ready", "mock"))
    }
}

#[async_trait]
impl EvaluationBackend for MockBackend {
    async fn evaluate_preset(&self, preset_id: &str, _variant: &str) -> Result<EvaluationResult> {
        self.simulate_processing().await;
        Ok(Self::sample_evaluation(preset_id))
    }

    async fn evaluate_upload(
        &self,
        candidate: &UploadCandidate,
        _variant: &str,
    ) -> Result<EvaluationResult> {
        self.simulate_processing().await;
        Ok(Self::sample_evaluation(&candidate.file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extract_returns_sample_with_candidate_metadata() {
        let backend = MockBackend::new().with_delay(Duration::ZERO);
        let candidate = UploadCandidate::new("my-plan.pdf", 5000, ACCEPTED_MIME_TYPE);

        let outcome = backend.extract(&candidate).await.unwrap();
        assert_eq!(outcome.file.name, "my-plan.pdf");
        assert_eq!(outcome.file.size, 5000);
        assert_eq!(outcome.document.report_summary.total_goals, 2);
    }

    #[tokio::test]
    async fn test_health_reports_mock_mode() {
        let backend = MockBackend::new();
        let status = backend.check_health().await.unwrap();
        assert!(status.success);
        assert_eq!(status.mode.as_deref(), Some("mock"));
    }

    #[test]
    fn test_sample_document_covers_every_section() {
        let doc = MockBackend::sample_document();
        for category in Category::ALL {
            assert!(doc.section_count(category) > 0, "{category} is empty");
        }
        assert!((doc.report_summary.completion_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_evaluation_has_all_four_kinds() {
        let result = MockBackend::sample_evaluation("demo");
        let kinds: std::collections::HashSet<_> = result
            .items
            .values()
            .flatten()
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds.len(), 4);
        assert!(result.overall.f1 > 0.0);
    }
}
