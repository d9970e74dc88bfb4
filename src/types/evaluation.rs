//! Evaluation diff and metrics types.
//!
//! An accuracy test compares an *actual* extracted document against an
//! *expected* reference answer. The comparison itself happens in the
//! evaluation service; this module holds the resulting item-level
//! classifications and the precision/recall/F1 aggregates derived from them.
//!
//! Wire format is camelCase JSON, matching the evaluation service contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::document::{Category, ExtractedDocument};

/// Classification outcome for one compared item.
///
/// Fixed, exhaustive, and mutually exclusive per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Actual and expected items are considered equivalent.
    Exact,

    /// Actual and expected overlap in meaning but differ materially.
    Partial,

    /// Actual contains an item with no corresponding expected item.
    Extra,

    /// Expected contains an item with no corresponding actual item.
    Missing,
}

impl MatchKind {
    /// Stable wire identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Partial => "partial",
            MatchKind::Extra => "extra",
            MatchKind::Missing => "missing",
        }
    }
}

/// One classification outcome produced by the evaluation service.
///
/// Consumed read-only; the model never reclassifies items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub kind: MatchKind,
    pub category: Category,

    /// The reference value, absent for `extra` items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,

    /// The extracted value, absent for `missing` items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,

    /// Evaluator's note on the classification, for human review.
    #[serde(default)]
    pub note: String,
}

/// Precision/recall/F1 aggregates for one category (or overall).
///
/// All ratios are in `[0,1]` and guarded against division by zero: a ratio
/// is `0` (never NaN) when its denominator is `0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,

    /// Number of `exact` classifications. Partial matches count toward
    /// neither precision nor recall.
    pub correct_count: usize,

    /// Items present in the actual document (exact + partial + extra).
    pub total_extracted: usize,

    /// Items present in the expected document (exact + partial + missing).
    pub total_expected: usize,
}

impl CategoryMetrics {
    /// Derive metrics from raw counts per the fixed formulas.
    ///
    /// `precision = correct / total_extracted`, `recall = correct /
    /// total_expected`, `f1 = 2pr / (p + r)`; each defined as `0` when its
    /// denominator is `0`.
    pub fn from_counts(correct_count: usize, total_extracted: usize, total_expected: usize) -> Self {
        let precision = if total_extracted == 0 {
            0.0
        } else {
            correct_count as f64 / total_extracted as f64
        };
        let recall = if total_expected == 0 {
            0.0
        } else {
            correct_count as f64 / total_expected as f64
        };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            precision,
            recall,
            f1,
            correct_count,
            total_extracted,
            total_expected,
        }
    }

    /// Derive metrics from a slice of classified items.
    ///
    /// Only `exact` counts as correct. `extra` items inflate the extracted
    /// total, `missing` items inflate the expected total, and `partial`
    /// items inflate both without counting as correct.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a ComparisonItem>) -> Self {
        let mut correct = 0usize;
        let mut extracted = 0usize;
        let mut expected = 0usize;

        for item in items {
            match item.kind {
                MatchKind::Exact => {
                    correct += 1;
                    extracted += 1;
                    expected += 1;
                }
                MatchKind::Partial => {
                    extracted += 1;
                    expected += 1;
                }
                MatchKind::Extra => extracted += 1,
                MatchKind::Missing => expected += 1,
            }
        }

        Self::from_counts(correct, extracted, expected)
    }
}

/// The complete outcome of one evaluation run.
///
/// Immutable once received; its lifecycle is a single run. Items and metrics
/// are keyed per category in canonical order, plus one overall aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Identifier for this run.
    pub id: Uuid,

    /// The preset identifier or uploaded file name being evaluated.
    pub test_case: String,

    /// The reference answer.
    pub expected: ExtractedDocument,

    /// The document the extraction actually produced.
    pub actual: ExtractedDocument,

    /// Every classified item, grouped per category.
    pub items: IndexMap<Category, Vec<ComparisonItem>>,

    /// One metrics block per category.
    pub category_metrics: IndexMap<Category, CategoryMetrics>,

    /// Aggregate over all categories.
    pub overall: CategoryMetrics,
}

/// The evaluation service's wire payload, before assembly.
///
/// Aggregates are optional: some service versions supply them, others send
/// only the raw item list. [`EvaluationResult::from_payload`] keeps supplied
/// aggregates verbatim and derives the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    pub test_case: String,
    pub expected: ExtractedDocument,
    pub actual: ExtractedDocument,

    #[serde(default)]
    pub items: Vec<ComparisonItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_metrics: Option<IndexMap<Category, CategoryMetrics>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<CategoryMetrics>,
}
