//! Typed errors for the extraction workflow.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Every variant is recoverable
//! by user retry or reset; none is fatal to the process.

use thiserror::Error;

/// Errors that can occur in the upload/extraction workflow and the
/// evaluation trigger.
///
/// The type is `Clone + PartialEq` so it can be stored in
/// [`WorkflowState`](crate::workflow::WorkflowState) as the last user-visible
/// error and asserted on directly in tests. Source errors from transports or
/// serializers are flattened to their display strings at the call boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Selected or dropped file's declared type is not the accepted type.
    #[error("unsupported file type: {mime_type} (only PDF documents are accepted)")]
    InvalidFileType { mime_type: String },

    /// Selected or dropped file exceeds the applicable size ceiling.
    #[error("file is {size} bytes, which exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    /// The extraction or evaluation call failed at the transport level,
    /// or the backend returned a failure status.
    #[error("extraction service unavailable: {message}")]
    BackendUnavailable { message: String },

    /// An evaluation run was requested with nothing to evaluate: preset mode
    /// with no preset chosen, or upload mode with no file chosen.
    #[error("no {expected} selected")]
    NoSelection { expected: String },

    /// Serializing a document for export failed.
    #[error("export serialization failed: {0}")]
    Serialization(String),
}

impl WorkflowError {
    /// Wrap a transport-level failure as a backend-unavailable error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
        }
    }

    /// True for errors resolved entirely before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType { .. } | Self::FileTooLarge { .. } | Self::NoSelection { .. }
        )
    }
}

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(WorkflowError::InvalidFileType {
            mime_type: "image/png".into()
        }
        .is_validation());
        assert!(WorkflowError::FileTooLarge {
            size: 1,
            limit: 0
        }
        .is_validation());
        assert!(WorkflowError::NoSelection {
            expected: "preset".into()
        }
        .is_validation());
        assert!(!WorkflowError::backend("timeout").is_validation());
    }

    #[test]
    fn test_display_messages_are_user_facing() {
        let err = WorkflowError::InvalidFileType {
            mime_type: "text/plain".into(),
        };
        assert!(err.to_string().contains("text/plain"));

        let err = WorkflowError::FileTooLarge {
            size: 200,
            limit: 100,
        };
        assert!(err.to_string().contains("200"));
        assert!(err.to_string().contains("100"));
    }
}
