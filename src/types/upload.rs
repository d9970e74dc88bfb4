//! File candidate and summary types for the upload workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single in-flight file reference, created on user selection or drop.
///
/// Ephemeral: discarded on validation failure or once submission begins.
/// The size and MIME type are the browser's/filesystem's claim about the
/// file, validated by [`validate_candidate`](crate::validate::validate_candidate)
/// before any state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate {
    pub file_name: String,

    /// Declared size in bytes.
    pub size: u64,

    /// Declared MIME type, e.g. `application/pdf`.
    pub mime_type: String,

    /// Raw file contents, when already read into memory.
    pub bytes: Vec<u8>,

    /// When the user selected or dropped the file.
    pub selected_at: DateTime<Utc>,
}

impl UploadCandidate {
    /// Create a candidate from file metadata alone.
    pub fn new(file_name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            mime_type: mime_type.into(),
            bytes: Vec::new(),
            selected_at: Utc::now(),
        }
    }

    /// Attach file contents. The declared size is updated to match.
    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.size = bytes.len() as u64;
        self.bytes = bytes;
        self
    }

    /// Summary metadata for this candidate.
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.file_name.clone(),
            size: self.size,
        }
    }
}

/// Metadata recorded for a submitted file, displayed alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub size: u64,
}

impl From<&UploadCandidate> for FileSummary {
    fn from(candidate: &UploadCandidate) -> Self {
        candidate.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_bytes_updates_declared_size() {
        let candidate =
            UploadCandidate::new("plan.pdf", 0, "application/pdf").with_bytes(vec![0u8; 64]);
        assert_eq!(candidate.size, 64);
        assert_eq!(candidate.summary().size, 64);
        assert_eq!(candidate.summary().name, "plan.pdf");
    }
}
