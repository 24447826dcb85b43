//! Dependency graph validation errors.

use super::error_code::{self, ReadinessErrorCode};

/// Raised before any coupling metric is computed. A graph that fails
/// validation is never partially processed.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Edge #{edge_index} ({from} -> {to}) references unknown node id '{missing}'")]
    UnknownNode {
        edge_index: usize,
        from: String,
        to: String,
        missing: String,
    },

    #[error("Duplicate node id '{0}'")]
    DuplicateNodeId(String),

    #[error("Duplicate component name '{0}'; component names must be unique")]
    DuplicateComponentName(String),

    #[error("Edge #{edge_index} has invalid {field}: {value}")]
    InvalidEdgeValue {
        edge_index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Node '{node}' has abstractness {value} outside [0, 1]")]
    InvalidAbstractness { node: String, value: f64 },
}

impl ReadinessErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_VALIDATION_ERROR
    }
}
