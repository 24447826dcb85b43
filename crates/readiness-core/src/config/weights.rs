//! Weight-group helpers shared by all config sections.

use serde::{Deserialize, Serialize};

use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;

/// Validate that every weight is in `[0, 1]` and the group sums to 1.0.
pub fn validate_weight_group(field: &str, weights: &[f64]) -> Result<(), ConfigError> {
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0 || **w > 1.0) {
        return Err(ConfigError::validation(
            field,
            format!("every weight must be within [0, 1], got {w}"),
        ));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::validation(
            field,
            format!("weights must sum to 1.0, got {sum:.6}"),
        ));
    }
    Ok(())
}

/// Validate that a ladder of thresholds is finite, non-negative and strictly increasing.
pub fn validate_ladder(field: &str, ladder: &[f64]) -> Result<(), ConfigError> {
    if ladder.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ConfigError::validation(
            field,
            "thresholds must be finite and non-negative",
        ));
    }
    if ladder.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::validation(
            field,
            format!("thresholds must be strictly increasing, got {ladder:?}"),
        ));
    }
    Ok(())
}

/// Weights for per-component risk and for the migration-complexity contribution.
///
/// `circular` is a flat addition for components inside a dependency cycle in
/// the risk score, and the weight of the saturated cycle factor in the
/// complexity contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingWeights {
    pub afferent: f64,
    pub efferent: f64,
    pub instability: f64,
    pub distance: f64,
    pub temporal: f64,
    pub circular: f64,
}

impl CouplingWeights {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.afferent,
            self.efferent,
            self.instability,
            self.distance,
            self.temporal,
            self.circular,
        ]
    }

    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        validate_weight_group(field, &self.as_array())
    }
}

impl Default for CouplingWeights {
    fn default() -> Self {
        Self {
            afferent: 0.25,
            efferent: 0.25,
            instability: 0.20,
            distance: 0.15,
            temporal: 0.10,
            circular: 0.05,
        }
    }
}
