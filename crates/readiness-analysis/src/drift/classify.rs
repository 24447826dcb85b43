//! Trend and severity classification for single comparisons and series.

use readiness_core::config::{CategoryThresholds, DriftConfig, SeverityAnchors};
use readiness_core::types::MetricCategory;
use statrs::statistics::Statistics;

use super::types::{DriftSeverity, DriftTrend, MetricDirection};

/// Mean magnitudes below this are treated as zero when computing CV.
const ZERO_MEAN_EPSILON: f64 = 1e-9;
/// Reported coefficient of variation for a noisy series centered on zero.
const MAX_COEFFICIENT_OF_VARIATION: f64 = 1e6;

/// Percentage change from `baseline` to `current`.
///
/// Returns `(raw, normalized)` where `normalized` is sign-flipped for
/// higher-is-better metrics so positive always means worse. A zero baseline
/// yields 0 when unchanged and ±100 otherwise.
pub fn change_percentage(current: f64, baseline: f64, direction: MetricDirection) -> (f64, f64) {
    let raw = if baseline == 0.0 {
        if current == 0.0 {
            0.0
        } else {
            100.0 * current.signum()
        }
    } else {
        (current - baseline) / baseline.abs() * 100.0
    };
    let normalized = match direction {
        MetricDirection::LowerIsBetter => raw,
        MetricDirection::HigherIsBetter => -raw,
    };
    (raw, normalized)
}

/// Least-squares fit of a chronological series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesFit {
    pub slope: f64,
    pub coefficient_of_variation: f64,
    /// Sign-normalized change between the fitted first and last points.
    pub change_percentage: f64,
    pub trend: DriftTrend,
}

/// Resolved thresholds for classification.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    stable_range: f64,
    improvement_threshold: f64,
    degradation: CategoryThresholds,
    anchors: SeverityAnchors,
    volatile_variance: f64,
    max_change: f64,
}

impl Classifier {
    pub fn new(config: &DriftConfig) -> Self {
        Self {
            stable_range: config.effective_stable_range_pct(),
            improvement_threshold: config.effective_improvement_threshold_pct(),
            degradation: config.effective_degradation_thresholds(),
            anchors: config.effective_severity_anchors(),
            volatile_variance: config.effective_volatile_variance(),
            max_change: config.effective_max_change_pct(),
        }
    }

    /// Clamp a change percentage to the configured cap.
    pub fn cap(&self, change: f64) -> f64 {
        change.clamp(-self.max_change, self.max_change)
    }

    /// Point-to-point trend for a sign-normalized change. Changes between
    /// the stable band and the category's degradation threshold stay STABLE.
    pub fn classify_point(&self, change: f64, category: MetricCategory) -> DriftTrend {
        if change.abs() <= self.stable_range {
            DriftTrend::Stable
        } else if change <= -self.improvement_threshold {
            DriftTrend::Improving
        } else if change >= self.degradation.for_category(category) {
            DriftTrend::Degrading
        } else {
            DriftTrend::Stable
        }
    }

    /// Ladder on |change|; NONE for improvements and for any change
    /// that made the metric better.
    pub fn severity(&self, change: f64, trend: DriftTrend) -> DriftSeverity {
        match trend {
            DriftTrend::Improving => DriftSeverity::None,
            DriftTrend::Volatile => self.magnitude(change.abs()),
            DriftTrend::Stable | DriftTrend::Degrading if change <= 0.0 => DriftSeverity::None,
            DriftTrend::Stable | DriftTrend::Degrading => self.magnitude(change),
        }
    }

    /// The ladder alone, without regard to direction.
    pub fn magnitude(&self, abs_change: f64) -> DriftSeverity {
        let a = &self.anchors;
        if abs_change > a.critical {
            DriftSeverity::Critical
        } else if abs_change >= a.high {
            DriftSeverity::High
        } else if abs_change >= a.medium {
            DriftSeverity::Medium
        } else if abs_change >= a.low {
            DriftSeverity::Low
        } else {
            DriftSeverity::None
        }
    }

    pub fn is_volatile(&self, coefficient_of_variation: f64) -> bool {
        coefficient_of_variation > self.volatile_variance
    }

    /// Classify a chronological series (oldest first).
    ///
    /// The trend is VOLATILE when the residual coefficient of variation
    /// around the least-squares line exceeds the configured threshold;
    /// otherwise the fitted first-to-last change goes through
    /// [`Classifier::classify_point`].
    pub fn classify_series(
        &self,
        values: &[f64],
        direction: MetricDirection,
        category: MetricCategory,
    ) -> SeriesFit {
        if values.len() < 2 {
            return SeriesFit {
                slope: 0.0,
                coefficient_of_variation: 0.0,
                change_percentage: 0.0,
                trend: DriftTrend::Stable,
            };
        }

        let n = values.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = values.iter().mean();

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, y) in values.iter().enumerate() {
            let x_diff = i as f64 - x_mean;
            numerator += x_diff * (y - y_mean);
            denominator += x_diff * x_diff;
        }
        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        let residuals: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, y)| y - (slope * i as f64 + intercept))
            .collect();
        let residual_sd = residuals.iter().population_std_dev();
        let coefficient_of_variation = if y_mean.abs() < ZERO_MEAN_EPSILON {
            if residual_sd < ZERO_MEAN_EPSILON {
                0.0
            } else {
                MAX_COEFFICIENT_OF_VARIATION
            }
        } else {
            (residual_sd / y_mean.abs()).min(MAX_COEFFICIENT_OF_VARIATION)
        };

        let fitted_first = intercept;
        let fitted_last = slope * (n - 1.0) + intercept;
        let (_, change) = change_percentage(fitted_last, fitted_first, direction);
        let change = self.cap(change);

        let trend = if self.is_volatile(coefficient_of_variation) {
            DriftTrend::Volatile
        } else {
            self.classify_point(change, category)
        };

        SeriesFit {
            slope,
            coefficient_of_variation,
            change_percentage: change,
            trend,
        }
    }
}
