//! Drift detector configuration.

use serde::{Deserialize, Serialize};

use super::weights::{validate_ladder, validate_weight_group};
use crate::constants::*;
use crate::errors::ConfigError;
use crate::types::MetricCategory;

/// Degradation threshold (percent, sign-normalized) per metric category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryThresholds {
    pub performance: f64,
    pub coupling: f64,
    pub complexity: f64,
    pub quality: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            performance: 10.0,
            coupling: 15.0,
            complexity: 15.0,
            quality: 10.0,
        }
    }
}

impl CategoryThresholds {
    pub fn for_category(&self, category: MetricCategory) -> f64 {
        match category {
            MetricCategory::Performance => self.performance,
            MetricCategory::Coupling => self.coupling,
            MetricCategory::Complexity => self.complexity,
            MetricCategory::Quality => self.quality,
        }
    }
}

/// Rollup weight per metric category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub performance: f64,
    pub coupling: f64,
    pub complexity: f64,
    pub quality: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            performance: 0.35,
            coupling: 0.25,
            complexity: 0.20,
            quality: 0.20,
        }
    }
}

impl CategoryWeights {
    pub fn for_category(&self, category: MetricCategory) -> f64 {
        match category {
            MetricCategory::Performance => self.performance,
            MetricCategory::Coupling => self.coupling,
            MetricCategory::Complexity => self.complexity,
            MetricCategory::Quality => self.quality,
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.performance, self.coupling, self.complexity, self.quality]
    }
}

/// Lower bounds (percent) of each drift severity band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityAnchors {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    /// Changes strictly above this are CRITICAL.
    pub critical: f64,
}

impl Default for SeverityAnchors {
    fn default() -> Self {
        Self {
            low: 6.0,
            medium: 12.0,
            high: 21.0,
            critical: 30.0,
        }
    }
}

/// Configuration for the drift detector.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DriftConfig {
    /// |change| at or below this is STABLE. Default: 5.
    pub stable_range_pct: Option<f64>,
    /// change at or below `-improvement_threshold_pct` is IMPROVING. Default: 5.
    pub improvement_threshold_pct: Option<f64>,
    pub degradation_thresholds: Option<CategoryThresholds>,
    pub severity_anchors: Option<SeverityAnchors>,
    /// Residual coefficient of variation above which a series is VOLATILE. Default: 0.2.
    pub volatile_variance: Option<f64>,
    /// Baselines required before series trends and volatility are computed. Default: 3.
    pub min_data_points: Option<usize>,
    pub category_weights: Option<CategoryWeights>,
    /// Cap on |change| used in score arithmetic. Default: 1000.
    pub max_change_pct: Option<f64>,
}

impl DriftConfig {
    pub fn effective_stable_range_pct(&self) -> f64 {
        self.stable_range_pct.unwrap_or(DEFAULT_STABLE_RANGE_PCT)
    }

    pub fn effective_improvement_threshold_pct(&self) -> f64 {
        self.improvement_threshold_pct
            .unwrap_or(DEFAULT_IMPROVEMENT_THRESHOLD_PCT)
    }

    pub fn effective_degradation_thresholds(&self) -> CategoryThresholds {
        self.degradation_thresholds.unwrap_or_default()
    }

    pub fn effective_severity_anchors(&self) -> SeverityAnchors {
        self.severity_anchors.unwrap_or_default()
    }

    pub fn effective_volatile_variance(&self) -> f64 {
        self.volatile_variance.unwrap_or(DEFAULT_VOLATILE_VARIANCE)
    }

    pub fn effective_min_data_points(&self) -> usize {
        self.min_data_points.unwrap_or(DEFAULT_MIN_DATA_POINTS)
    }

    pub fn effective_category_weights(&self) -> CategoryWeights {
        self.category_weights.unwrap_or_default()
    }

    pub fn effective_max_change_pct(&self) -> f64 {
        self.max_change_pct.unwrap_or(DEFAULT_MAX_CHANGE_PCT)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("drift.stable_range_pct", self.stable_range_pct),
            ("drift.improvement_threshold_pct", self.improvement_threshold_pct),
            ("drift.volatile_variance", self.volatile_variance),
        ];
        for (field, value) in non_negative {
            if let Some(v) = value {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(ConfigError::validation(field, "must be a non-negative number"));
                }
            }
        }
        if let Some(cap) = self.max_change_pct {
            if !(cap.is_finite() && cap > 0.0) {
                return Err(ConfigError::validation(
                    "drift.max_change_pct",
                    "must be a positive number",
                ));
            }
        }
        if let Some(n) = self.min_data_points {
            if n < 2 {
                return Err(ConfigError::validation(
                    "drift.min_data_points",
                    "must be at least 2",
                ));
            }
        }
        if let Some(t) = &self.degradation_thresholds {
            let stable = self.effective_stable_range_pct();
            for category in MetricCategory::ALL {
                let v = t.for_category(*category);
                if !v.is_finite() || v < stable {
                    return Err(ConfigError::validation(
                        "drift.degradation_thresholds",
                        format!("{category} threshold {v} must be >= stable_range_pct {stable}"),
                    ));
                }
            }
        }
        if let Some(a) = &self.severity_anchors {
            validate_ladder(
                "drift.severity_anchors",
                &[a.low, a.medium, a.high, a.critical],
            )?;
        }
        if let Some(w) = &self.category_weights {
            validate_weight_group("drift.category_weights", &w.as_array())?;
        }
        Ok(())
    }
}
