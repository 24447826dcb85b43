//! Drift detector: compares the current snapshot against every baseline.

use chrono::{DateTime, Utc};
use readiness_core::config::DriftConfig;
use readiness_core::errors::ConfigError;
use readiness_core::types::{BTreeMap, FxHashSet, MetricCategory};
use uuid::Uuid;

use super::classify::Classifier;
use super::health::{collect_alerts, health_score};
use super::patterns::{category_recommendation, detect_patterns, recommendation};
use super::snapshot::{AnalysisSnapshot, TrackedMetric};
use super::types::{
    BaselineComparison, DriftAnalysis, DriftPattern, DriftSeverity, DriftTrend, MetricDrift,
    MetricTrend,
};

/// Share of metrics that must degrade (or improve) to set the overall trend.
const MAJORITY_SHIFT: f64 = 0.4;
/// Share of metrics that must be stable for an overall STABLE trend.
const MAJORITY_STABLE: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct DriftDetector {
    config: DriftConfig,
    classifier: Classifier,
}

impl Default for DriftDetector {
    fn default() -> Self {
        let config = DriftConfig::default();
        Self {
            classifier: Classifier::new(&config),
            config,
        }
    }
}

impl DriftDetector {
    pub fn new(config: DriftConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Detect drift with a fresh id and the current time. `baselines` are
    /// ordered most recent first and may be empty.
    pub fn detect(
        &self,
        current: &AnalysisSnapshot,
        application_name: &str,
        baselines: &[AnalysisSnapshot],
    ) -> DriftAnalysis {
        self.detect_at(
            current,
            application_name,
            baselines,
            Uuid::new_v4().to_string(),
            Utc::now(),
        )
    }

    pub fn detect_at(
        &self,
        current: &AnalysisSnapshot,
        application_name: &str,
        baselines: &[AnalysisSnapshot],
        analysis_id: String,
        created_at: DateTime<Utc>,
    ) -> DriftAnalysis {
        let current_metrics = current.metrics();
        let baseline_values: Vec<BTreeMap<String, f64>> = baselines
            .iter()
            .map(|b| b.metrics().into_iter().map(|m| (m.name, m.value)).collect())
            .collect();

        let metric_trends = self.metric_trends(&current_metrics, &baseline_values);
        let volatile: FxHashSet<&str> = metric_trends
            .values()
            .filter(|t| t.trend == DriftTrend::Volatile)
            .map(|t| t.metric.as_str())
            .collect();

        let baseline_comparisons: Vec<BaselineComparison> = baselines
            .iter()
            .zip(&baseline_values)
            .map(|(baseline, values)| self.compare(&current_metrics, baseline, values, &volatile))
            .collect();

        let mut drift_patterns: Vec<DriftPattern> = Vec::new();
        for comparison in &baseline_comparisons {
            for pattern in detect_patterns(comparison) {
                if !drift_patterns.iter().any(|p| p.pattern == pattern.pattern) {
                    drift_patterns.push(pattern);
                }
            }
        }

        let nearest = baseline_comparisons.first();
        let alerts = collect_alerts(nearest, &self.classifier);
        let recommendations = recommendations(nearest, &drift_patterns, &volatile);
        let overall_health_score = health_score(nearest);

        for alert in &alerts.critical {
            tracing::warn!(application = application_name, alert = %alert, "critical drift");
        }

        let analysis = DriftAnalysis {
            analysis_id,
            application_name: application_name.to_string(),
            created_at,
            current_analysis_id: current.analysis_id.clone(),
            total_metrics: nearest.map_or(0, |c| c.total_metrics),
            degraded_metrics: nearest.map_or(0, |c| c.degraded_metrics),
            improved_metrics: nearest.map_or(0, |c| c.improved_metrics),
            stable_metrics: nearest.map_or(0, |c| c.stable_metrics),
            baseline_comparisons,
            drift_patterns,
            metric_trends,
            critical_alerts: alerts.critical,
            degradation_warnings: alerts.warnings,
            improvement_highlights: alerts.highlights,
            recommendations,
            overall_health_score,
        };

        tracing::info!(
            application = application_name,
            baselines = baselines.len(),
            patterns = analysis.drift_patterns.len(),
            critical = analysis.critical_alerts.len(),
            health = analysis.overall_health_score,
            "drift detection complete"
        );
        analysis
    }

    /// Series trends for metrics seen in at least `min_data_points` baselines.
    fn metric_trends(
        &self,
        current: &[TrackedMetric],
        baseline_values: &[BTreeMap<String, f64>],
    ) -> BTreeMap<String, MetricTrend> {
        let min_points = self.config.effective_min_data_points();
        let mut trends = BTreeMap::new();
        if baseline_values.len() < min_points {
            return trends;
        }
        for metric in current {
            // baselines arrive most recent first; the series runs oldest first
            let mut values: Vec<f64> = baseline_values
                .iter()
                .rev()
                .filter_map(|b| b.get(&metric.name).copied())
                .collect();
            if values.len() < min_points {
                continue;
            }
            values.push(metric.value);
            let fit = self
                .classifier
                .classify_series(&values, metric.direction, metric.category);
            trends.insert(
                metric.name.clone(),
                MetricTrend {
                    metric: metric.name.clone(),
                    category: metric.category,
                    values,
                    slope: fit.slope,
                    coefficient_of_variation: fit.coefficient_of_variation,
                    change_percentage: fit.change_percentage,
                    trend: fit.trend,
                },
            );
        }
        trends
    }

    fn compare(
        &self,
        current: &[TrackedMetric],
        baseline: &AnalysisSnapshot,
        values: &BTreeMap<String, f64>,
        volatile: &FxHashSet<&str>,
    ) -> BaselineComparison {
        let mut metric_drifts: BTreeMap<MetricCategory, BTreeMap<String, MetricDrift>> =
            BTreeMap::new();
        for metric in current {
            let Some(&baseline_value) = values.get(&metric.name) else {
                continue;
            };
            let (raw, normalized) =
                super::classify::change_percentage(metric.value, baseline_value, metric.direction);
            let change = self.classifier.cap(normalized);
            let trend = if volatile.contains(metric.name.as_str()) {
                DriftTrend::Volatile
            } else {
                self.classifier.classify_point(change, metric.category)
            };
            metric_drifts.entry(metric.category).or_default().insert(
                metric.name.clone(),
                MetricDrift {
                    metric: metric.name.clone(),
                    category: metric.category,
                    direction: metric.direction,
                    current_value: metric.value,
                    baseline_value,
                    raw_change_percentage: raw,
                    change_percentage: change,
                    trend,
                    severity: self.classifier.severity(change, trend),
                },
            );
        }

        let drifts = || metric_drifts.values().flat_map(|m| m.values());
        let count = |trend: DriftTrend| drifts().filter(|d| d.trend == trend).count();
        let total = drifts().count();
        let degraded = count(DriftTrend::Degrading);
        let improved = count(DriftTrend::Improving);
        let stable = count(DriftTrend::Stable);
        let volatile_count = count(DriftTrend::Volatile);

        let overall_trend = if total == 0 {
            DriftTrend::Stable
        } else {
            let share = |n: usize| n as f64 / total as f64;
            if share(degraded) > MAJORITY_SHIFT {
                DriftTrend::Degrading
            } else if share(improved) > MAJORITY_SHIFT {
                DriftTrend::Improving
            } else if share(stable) > MAJORITY_STABLE {
                DriftTrend::Stable
            } else {
                DriftTrend::Volatile
            }
        };
        let overall_severity = drifts()
            .map(|d| d.severity)
            .max()
            .unwrap_or(DriftSeverity::None);
        let overall_drift_score = self.drift_score(&metric_drifts);

        BaselineComparison {
            baseline_id: baseline.analysis_id.clone(),
            baseline_timestamp: baseline.timestamp,
            metric_drifts,
            overall_drift_score,
            overall_trend,
            overall_severity,
            total_metrics: total,
            degraded_metrics: degraded,
            improved_metrics: improved,
            stable_metrics: stable,
            volatile_metrics: volatile_count,
        }
    }

    /// Category-weighted mean of |change|, renormalized over the categories
    /// present.
    fn drift_score(&self, drifts: &BTreeMap<MetricCategory, BTreeMap<String, MetricDrift>>) -> f64 {
        let weights = self.config.effective_category_weights();
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for (category, metrics) in drifts {
            if metrics.is_empty() {
                continue;
            }
            let mean = metrics
                .values()
                .map(|d| d.change_percentage.abs())
                .sum::<f64>()
                / metrics.len() as f64;
            let w = weights.for_category(*category);
            weighted += w * mean;
            weight_sum += w;
        }
        if weight_sum > 0.0 {
            weighted / weight_sum
        } else {
            0.0
        }
    }
}

fn recommendations(
    nearest: Option<&BaselineComparison>,
    patterns: &[DriftPattern],
    volatile: &FxHashSet<&str>,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |s: String| {
        if !out.contains(&s) {
            out.push(s);
        }
    };

    for pattern in patterns {
        push(recommendation(pattern.pattern).to_string());
    }

    if let Some(c) = nearest {
        for (category, metrics) in &c.metric_drifts {
            let alerted = metrics
                .values()
                .any(|d| d.severity >= DriftSeverity::High && d.trend != DriftTrend::Improving);
            let covered = patterns
                .iter()
                .any(|p| p.baseline_id == c.baseline_id && metrics.values().any(|d| p.pattern.covers(d)));
            if alerted && !covered {
                push(category_recommendation(*category).to_string());
            }
        }
    }

    if !volatile.is_empty() {
        let mut names: Vec<&str> = volatile.iter().copied().collect();
        names.sort_unstable();
        push(format!(
            "Stabilize measurement conditions for volatile metrics: {}",
            names.join(", ")
        ));
    }
    out
}
