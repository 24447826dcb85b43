//! Health score and alerts from the nearest baseline comparison.

use readiness_core::constants::NEUTRAL_HEALTH_SCORE;

use super::classify::Classifier;
use super::types::{BaselineComparison, DriftSeverity, DriftTrend, MetricDrift};

/// Share of the drift score subtracted from health.
pub const DRIFT_PENALTY_FACTOR: f64 = 0.5;
/// Cap on the drift-score penalty.
pub const MAX_DRIFT_PENALTY: f64 = 30.0;
/// Penalty when every metric degraded.
pub const DEGRADATION_PENALTY: f64 = 30.0;
/// Bonus when every metric improved.
pub const IMPROVEMENT_BONUS: f64 = 20.0;

/// Health in [0, 100]. No comparison, or one without metrics, is neutral.
pub fn health_score(nearest: Option<&BaselineComparison>) -> f64 {
    let Some(c) = nearest else {
        return NEUTRAL_HEALTH_SCORE;
    };
    if c.total_metrics == 0 {
        return NEUTRAL_HEALTH_SCORE;
    }
    let total = c.total_metrics as f64;
    let score = NEUTRAL_HEALTH_SCORE
        - (c.overall_drift_score * DRIFT_PENALTY_FACTOR).min(MAX_DRIFT_PENALTY)
        - c.degraded_metrics as f64 / total * DEGRADATION_PENALTY
        + c.improved_metrics as f64 / total * IMPROVEMENT_BONUS;
    score.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alerts {
    pub critical: Vec<String>,
    pub warnings: Vec<String>,
    pub highlights: Vec<String>,
}

/// CRITICAL metrics become alerts, HIGH metrics warnings, and improvements
/// of MEDIUM magnitude or more highlights.
pub fn collect_alerts(nearest: Option<&BaselineComparison>, classifier: &Classifier) -> Alerts {
    let mut alerts = Alerts::default();
    let Some(c) = nearest else {
        return alerts;
    };
    for drift in c.drifts() {
        match drift.severity {
            DriftSeverity::Critical => alerts.critical.push(describe(drift, &c.baseline_id)),
            DriftSeverity::High => alerts.warnings.push(describe(drift, &c.baseline_id)),
            _ => {}
        }
        if drift.trend == DriftTrend::Improving
            && classifier.magnitude(drift.change_percentage.abs()) >= DriftSeverity::Medium
        {
            alerts.highlights.push(format!(
                "{} improved by {:.1}% ({} -> {})",
                drift.metric,
                drift.change_percentage.abs(),
                fmt_value(drift.baseline_value),
                fmt_value(drift.current_value)
            ));
        }
    }
    alerts
}

fn describe(drift: &MetricDrift, baseline_id: &str) -> String {
    format!(
        "{} {} by {:.1}% since baseline {} ({} -> {})",
        drift.metric,
        if drift.trend == DriftTrend::Volatile {
            "swung"
        } else {
            "worsened"
        },
        drift.change_percentage.abs(),
        baseline_id,
        fmt_value(drift.baseline_value),
        fmt_value(drift.current_value)
    )
}

fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.3}")
    }
}
