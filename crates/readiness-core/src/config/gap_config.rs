//! Gap & readiness analyzer configuration.

use serde::{Deserialize, Serialize};

use super::weights::{validate_ladder, validate_weight_group};
use crate::constants::*;
use crate::errors::ConfigError;
use crate::types::Severity;

/// Ratio ladder mapping `measured / threshold` to a severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityRatios {
    /// Ratios strictly above this are HIGH. Default: 1.5.
    pub high: f64,
    /// Ratios strictly above this are CRITICAL. Default: 2.0.
    pub critical: f64,
}

impl Default for SeverityRatios {
    fn default() -> Self {
        Self {
            high: 1.5,
            critical: 2.0,
        }
    }
}

impl SeverityRatios {
    pub fn classify(&self, ratio: f64) -> Severity {
        Severity::from_ratio(ratio, self.high, self.critical)
    }
}

/// Complexity points contributed by one finding of each severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPoints {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub info: f64,
}

impl Default for SeverityPoints {
    fn default() -> Self {
        Self {
            critical: 40.0,
            high: 25.0,
            medium: 15.0,
            low: 5.0,
            info: 1.0,
        }
    }
}

impl SeverityPoints {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

/// Weights of the five complexity sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityWeights {
    pub architectural: f64,
    pub coupling: f64,
    pub performance: f64,
    pub technology: f64,
    pub data: f64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            architectural: 0.25,
            coupling: 0.25,
            performance: 0.20,
            technology: 0.20,
            data: 0.10,
        }
    }
}

impl ComplexityWeights {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.architectural,
            self.coupling,
            self.performance,
            self.technology,
            self.data,
        ]
    }
}

/// Weights of the readiness score. `complexity` applies to the inverted
/// overall complexity, the others to the readiness gaps `100 - x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessWeights {
    pub complexity: f64,
    pub technical: f64,
    pub architectural: f64,
    pub performance: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            complexity: 0.4,
            technical: 0.3,
            architectural: 0.2,
            performance: 0.1,
        }
    }
}

impl ReadinessWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.complexity,
            self.technical,
            self.architectural,
            self.performance,
        ]
    }
}

/// Configuration for the gap and readiness analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GapConfig {
    /// P95 latency threshold in milliseconds. Default: 500.
    pub p95_threshold_ms: Option<f64>,
    /// P99 latency threshold in milliseconds. Default: 1000.
    pub p99_threshold_ms: Option<f64>,
    /// Maximum acceptable error rate as a fraction. Default: 0.01.
    pub max_error_rate: Option<f64>,
    /// Minimum acceptable throughput in requests per second. Default: 100.
    pub min_throughput_rps: Option<f64>,
    /// Maximum acceptable coupling density. Default: 0.3.
    pub max_coupling_density: Option<f64>,
    /// Cloud readiness scores below this raise a technology finding. Default: 50.
    pub min_cloud_readiness: Option<f64>,
    /// Runtime samples below this are reported as a degraded input. Default: 100.
    pub min_sample_size: Option<u64>,
    pub severity_ratios: Option<SeverityRatios>,
    pub severity_points: Option<SeverityPoints>,
    pub complexity_weights: Option<ComplexityWeights>,
    pub readiness_weights: Option<ReadinessWeights>,
    /// CRITICAL findings at or above this count force NO GO. Default: 1.
    pub critical_blocker_threshold: Option<u32>,
    /// Readiness at or above this is GO. Default: 70.
    pub go_threshold: Option<f64>,
    /// Readiness at or above this is CONDITIONAL GO. Default: 50.
    pub conditional_threshold: Option<f64>,
    /// Organizational readiness when none is supplied. Default: 50.
    pub default_organizational_readiness: Option<f64>,
}

impl GapConfig {
    pub fn effective_p95_threshold_ms(&self) -> f64 {
        self.p95_threshold_ms.unwrap_or(DEFAULT_P95_THRESHOLD_MS)
    }

    pub fn effective_p99_threshold_ms(&self) -> f64 {
        self.p99_threshold_ms.unwrap_or(DEFAULT_P99_THRESHOLD_MS)
    }

    pub fn effective_max_error_rate(&self) -> f64 {
        self.max_error_rate.unwrap_or(DEFAULT_MAX_ERROR_RATE)
    }

    pub fn effective_min_throughput_rps(&self) -> f64 {
        self.min_throughput_rps.unwrap_or(DEFAULT_MIN_THROUGHPUT_RPS)
    }

    pub fn effective_max_coupling_density(&self) -> f64 {
        self.max_coupling_density.unwrap_or(DEFAULT_MAX_COUPLING_DENSITY)
    }

    pub fn effective_min_cloud_readiness(&self) -> f64 {
        self.min_cloud_readiness.unwrap_or(DEFAULT_MIN_CLOUD_READINESS)
    }

    pub fn effective_min_sample_size(&self) -> u64 {
        self.min_sample_size.unwrap_or(DEFAULT_MIN_SAMPLE_SIZE)
    }

    pub fn effective_severity_ratios(&self) -> SeverityRatios {
        self.severity_ratios.unwrap_or_default()
    }

    pub fn effective_severity_points(&self) -> SeverityPoints {
        self.severity_points.unwrap_or_default()
    }

    pub fn effective_complexity_weights(&self) -> ComplexityWeights {
        self.complexity_weights.unwrap_or_default()
    }

    pub fn effective_readiness_weights(&self) -> ReadinessWeights {
        self.readiness_weights.unwrap_or_default()
    }

    pub fn effective_critical_blocker_threshold(&self) -> u32 {
        self.critical_blocker_threshold
            .unwrap_or(DEFAULT_CRITICAL_BLOCKER_THRESHOLD)
    }

    pub fn effective_go_threshold(&self) -> f64 {
        self.go_threshold.unwrap_or(DEFAULT_GO_THRESHOLD)
    }

    pub fn effective_conditional_threshold(&self) -> f64 {
        self.conditional_threshold
            .unwrap_or(DEFAULT_CONDITIONAL_THRESHOLD)
    }

    pub fn effective_default_organizational_readiness(&self) -> f64 {
        self.default_organizational_readiness
            .unwrap_or(DEFAULT_ORGANIZATIONAL_READINESS)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gap.p95_threshold_ms", self.p95_threshold_ms),
            ("gap.p99_threshold_ms", self.p99_threshold_ms),
            ("gap.max_error_rate", self.max_error_rate),
            ("gap.min_throughput_rps", self.min_throughput_rps),
            ("gap.max_coupling_density", self.max_coupling_density),
        ];
        for (field, value) in positive {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ConfigError::validation(field, "must be a positive number"));
                }
            }
        }
        let percentages = [
            ("gap.min_cloud_readiness", self.min_cloud_readiness),
            ("gap.go_threshold", self.go_threshold),
            ("gap.conditional_threshold", self.conditional_threshold),
            (
                "gap.default_organizational_readiness",
                self.default_organizational_readiness,
            ),
        ];
        for (field, value) in percentages {
            if let Some(v) = value {
                if !(0.0..=100.0).contains(&v) {
                    return Err(ConfigError::validation(field, "must be between 0 and 100"));
                }
            }
        }
        if self.effective_conditional_threshold() > self.effective_go_threshold() {
            return Err(ConfigError::validation(
                "gap.conditional_threshold",
                "must not exceed gap.go_threshold",
            ));
        }
        if self.critical_blocker_threshold == Some(0) {
            return Err(ConfigError::validation(
                "gap.critical_blocker_threshold",
                "must be at least 1",
            ));
        }
        if let Some(r) = &self.severity_ratios {
            validate_ladder("gap.severity_ratios", &[1.0, r.high, r.critical])?;
        }
        if let Some(p) = &self.severity_points {
            validate_ladder(
                "gap.severity_points",
                &[p.info, p.low, p.medium, p.high, p.critical],
            )?;
        }
        if let Some(w) = &self.complexity_weights {
            validate_weight_group("gap.complexity_weights", &w.as_array())?;
        }
        if let Some(w) = &self.readiness_weights {
            validate_weight_group("gap.readiness_weights", &w.as_array())?;
        }
        Ok(())
    }
}
