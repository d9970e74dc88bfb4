//! Serializing the current result into a downloadable artifact.

use chrono::{DateTime, Utc};

use crate::error::{Result, WorkflowError};
use crate::types::document::ExtractedDocument;

/// Requested download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON. The only round-trippable format, and the only
    /// one implemented.
    Json,

    /// Accepted but not yet available.
    Csv,

    /// Accepted but not yet available.
    Pdf,
}

/// A downloadable artifact produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `watershed-plan-extraction-<timestamp>.json`, timestamp at seconds
    /// resolution with colons replaced by hyphens.
    pub file_name: String,

    pub mime_type: &'static str,

    pub contents: String,
}

/// Serialize a document for download.
///
/// Formats other than JSON return `Ok(None)`: the request is accepted but
/// performs no action.
pub fn export_document(
    document: &ExtractedDocument,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<Option<ExportArtifact>> {
    match format {
        ExportFormat::Json => {
            let contents = serde_json::to_string_pretty(document)
                .map_err(|e| WorkflowError::Serialization(e.to_string()))?;
            let file_name = format!(
                "watershed-plan-extraction-{}.json",
                now.format("%Y-%m-%dT%H-%M-%SZ")
            );
            Ok(Some(ExportArtifact {
                file_name,
                mime_type: "application/json",
                contents,
            }))
        }
        ExportFormat::Csv | ExportFormat::Pdf => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MockBackend;
    use chrono::TimeZone;

    #[test]
    fn test_artifact_name_has_no_colons() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 14, 30, 5).unwrap();
        let artifact = export_document(&ExtractedDocument::default(), ExportFormat::Json, now)
            .unwrap()
            .unwrap();
        assert_eq!(
            artifact.file_name,
            "watershed-plan-extraction-2026-08-26T14-30-05Z.json"
        );
        assert!(!artifact.file_name.contains(':'));
    }

    #[test]
    fn test_export_round_trips() {
        let document = MockBackend::sample_document();
        let artifact = export_document(&document, ExportFormat::Json, Utc::now())
            .unwrap()
            .unwrap();

        let parsed: ExtractedDocument = serde_json::from_str(&artifact.contents).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_unimplemented_formats_yield_no_artifact() {
        let document = MockBackend::sample_document();
        assert!(export_document(&document, ExportFormat::Csv, Utc::now())
            .unwrap()
            .is_none());
        assert!(export_document(&document, ExportFormat::Pdf, Utc::now())
            .unwrap()
            .is_none());
    }
}
