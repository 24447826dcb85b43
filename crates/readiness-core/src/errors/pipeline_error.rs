//! Top-level pipeline error wrapping the subsystem errors.

use super::error_code::ReadinessErrorCode;
use super::{ConfigError, ExportError, GraphError};

/// Error returned by a full Coupling → Gap → Drift run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl ReadinessErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
        }
    }
}
