//! Coupling analyzer configuration.

use serde::{Deserialize, Serialize};

use super::weights::CouplingWeights;
use crate::constants::*;
use crate::errors::ConfigError;

/// Thresholds and weights for the coupling metrics analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CouplingConfig {
    /// Afferent coupling above this marks a hotspot. Default: 5.
    pub max_afferent: Option<u32>,
    /// Efferent coupling above this marks a hotspot. Default: 5.
    pub max_efferent: Option<u32>,
    /// Instability above this marks a hotspot. Default: 0.8.
    pub max_instability: Option<f64>,
    /// Total call frequency through a component above this marks temporal coupling. Default: 1000.
    pub max_call_frequency: Option<f64>,
    /// Per-component risk weights.
    pub risk_weights: Option<CouplingWeights>,
    /// Weights of the migration-complexity contribution. Default: same as risk weights.
    pub complexity_weights: Option<CouplingWeights>,
    /// Longest elementary cycle that is enumerated. Default: 6.
    pub max_cycle_length: Option<usize>,
    /// Upper bound on reported cycles. Default: 100.
    pub max_reported_cycles: Option<usize>,
    /// Cycle count at which the circular complexity factor saturates. Default: 5.
    pub circular_saturation: Option<u32>,
    /// Node count from which metrics are computed in parallel. Default: 256.
    pub parallel_threshold: Option<usize>,
}

impl CouplingConfig {
    pub fn effective_max_afferent(&self) -> u32 {
        self.max_afferent.unwrap_or(DEFAULT_MAX_AFFERENT)
    }

    pub fn effective_max_efferent(&self) -> u32 {
        self.max_efferent.unwrap_or(DEFAULT_MAX_EFFERENT)
    }

    pub fn effective_max_instability(&self) -> f64 {
        self.max_instability.unwrap_or(DEFAULT_MAX_INSTABILITY)
    }

    pub fn effective_max_call_frequency(&self) -> f64 {
        self.max_call_frequency.unwrap_or(DEFAULT_MAX_CALL_FREQUENCY)
    }

    pub fn effective_risk_weights(&self) -> CouplingWeights {
        self.risk_weights.unwrap_or_default()
    }

    pub fn effective_complexity_weights(&self) -> CouplingWeights {
        self.complexity_weights.unwrap_or_default()
    }

    pub fn effective_max_cycle_length(&self) -> usize {
        self.max_cycle_length.unwrap_or(DEFAULT_MAX_CYCLE_LENGTH)
    }

    pub fn effective_max_reported_cycles(&self) -> usize {
        self.max_reported_cycles.unwrap_or(DEFAULT_MAX_REPORTED_CYCLES)
    }

    pub fn effective_circular_saturation(&self) -> u32 {
        self.circular_saturation.unwrap_or(DEFAULT_CIRCULAR_SATURATION)
    }

    pub fn effective_parallel_threshold(&self) -> usize {
        self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_afferent == Some(0) {
            return Err(ConfigError::validation(
                "coupling.max_afferent",
                "must be greater than 0",
            ));
        }
        if self.max_efferent == Some(0) {
            return Err(ConfigError::validation(
                "coupling.max_efferent",
                "must be greater than 0",
            ));
        }
        if let Some(i) = self.max_instability {
            if !(i > 0.0 && i <= 1.0) {
                return Err(ConfigError::validation(
                    "coupling.max_instability",
                    "must be within (0, 1]",
                ));
            }
        }
        if let Some(f) = self.max_call_frequency {
            if !(f.is_finite() && f > 0.0) {
                return Err(ConfigError::validation(
                    "coupling.max_call_frequency",
                    "must be a positive number",
                ));
            }
        }
        if let Some(w) = &self.risk_weights {
            w.validate("coupling.risk_weights")?;
        }
        if let Some(w) = &self.complexity_weights {
            w.validate("coupling.complexity_weights")?;
        }
        if let Some(len) = self.max_cycle_length {
            if len < 2 {
                return Err(ConfigError::validation(
                    "coupling.max_cycle_length",
                    "must be at least 2",
                ));
            }
        }
        if self.circular_saturation == Some(0) {
            return Err(ConfigError::validation(
                "coupling.circular_saturation",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
