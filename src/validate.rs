//! Acceptance rules applied to a candidate file before any state transition.
//!
//! Validation never mutates workflow state beyond recording the error; the
//! previously selected file, if any, is left untouched so the user can retry.

use crate::error::{Result, WorkflowError};
use crate::types::upload::UploadCandidate;

/// The single accepted document type.
pub const ACCEPTED_MIME_TYPE: &str = "application/pdf";

/// Byte ceiling for drag/drop and generic selection (100 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Byte ceiling for the evaluation-upload path (10 MiB).
pub const MAX_EVALUATION_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Size ceiling for one upload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_bytes: u64,
}

impl UploadLimits {
    /// Limits for the main extraction path.
    pub const EXTRACTION: UploadLimits = UploadLimits {
        max_bytes: MAX_UPLOAD_BYTES,
    };

    /// Limits for the evaluation-upload path.
    pub const EVALUATION: UploadLimits = UploadLimits {
        max_bytes: MAX_EVALUATION_UPLOAD_BYTES,
    };
}

/// Check a candidate against the accepted type and the applicable ceiling.
///
/// Type is checked before size, so a file that is both oversized and of the
/// wrong type reports [`WorkflowError::InvalidFileType`].
pub fn validate_candidate(candidate: &UploadCandidate, limits: UploadLimits) -> Result<()> {
    if candidate.mime_type != ACCEPTED_MIME_TYPE {
        return Err(WorkflowError::InvalidFileType {
            mime_type: candidate.mime_type.clone(),
        });
    }

    if candidate.size > limits.max_bytes {
        return Err(WorkflowError::FileTooLarge {
            size: candidate.size,
            limit: limits.max_bytes,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_under_ceiling() {
        let candidate = UploadCandidate::new("plan.pdf", 5 * 1024 * 1024, ACCEPTED_MIME_TYPE);
        assert!(validate_candidate(&candidate, UploadLimits::EXTRACTION).is_ok());
    }

    #[test]
    fn test_rejects_wrong_type() {
        let candidate = UploadCandidate::new("plan.docx", 1024, "application/msword");
        let err = validate_candidate(&candidate, UploadLimits::EXTRACTION).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidFileType {
                mime_type: "application/msword".into()
            }
        );
    }

    #[test]
    fn test_rejects_oversize() {
        let candidate =
            UploadCandidate::new("plan.pdf", MAX_UPLOAD_BYTES + 1, ACCEPTED_MIME_TYPE);
        let err = validate_candidate(&candidate, UploadLimits::EXTRACTION).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::FileTooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES,
            }
        );
    }

    #[test]
    fn test_exact_ceiling_is_accepted() {
        let candidate = UploadCandidate::new("plan.pdf", MAX_UPLOAD_BYTES, ACCEPTED_MIME_TYPE);
        assert!(validate_candidate(&candidate, UploadLimits::EXTRACTION).is_ok());
    }

    #[test]
    fn test_evaluation_path_has_smaller_ceiling() {
        let candidate =
            UploadCandidate::new("plan.pdf", MAX_EVALUATION_UPLOAD_BYTES + 1, ACCEPTED_MIME_TYPE);
        assert!(validate_candidate(&candidate, UploadLimits::EXTRACTION).is_ok());
        assert!(validate_candidate(&candidate, UploadLimits::EVALUATION).is_err());
    }

    #[test]
    fn test_type_checked_before_size() {
        let candidate = UploadCandidate::new("huge.png", MAX_UPLOAD_BYTES * 2, "image/png");
        let err = validate_candidate(&candidate, UploadLimits::EXTRACTION).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidFileType { .. }));
    }
}
