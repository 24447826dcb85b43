//! Artifact export/import errors.

use super::error_code::{self, ReadinessErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported schema version {found} (expected major {expected_major})")]
    SchemaMismatch { found: String, expected_major: u64 },

    #[error("Expected artifact kind '{expected}', found '{found}'")]
    WrongArtifactKind { expected: String, found: String },
}

impl ReadinessErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaMismatch { .. } | Self::WrongArtifactKind { .. } => {
                error_code::SCHEMA_MISMATCH
            }
            Self::Serialization(_) => error_code::EXPORT_ERROR,
        }
    }
}
