//! Point-in-time analysis snapshots compared by the drift detector.
//!
//! Every tracked value is optional: a metric absent from either side of a
//! comparison is skipped for that comparison.

use chrono::{DateTime, Utc};
use readiness_core::types::{MetricCategory, Severity};
use serde::{Deserialize, Serialize};

use super::types::MetricDirection::{self, HigherIsBetter, LowerIsBetter};
use crate::coupling::CouplingMetricsResult;
use crate::gap::{GapAnalysisResult, PerformanceBaseline};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub p50_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p99_ms: Option<f64>,
    pub error_rate: Option<f64>,
    pub throughput_rps: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingSnapshot {
    pub coupling_density: Option<f64>,
    pub circular_dependency_count: Option<f64>,
    pub hotspot_count: Option<f64>,
    pub average_instability: Option<f64>,
    pub average_distance: Option<f64>,
    pub migration_complexity_score: Option<f64>,
    pub total_dependencies: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexitySnapshot {
    pub overall_score: Option<f64>,
    pub architectural: Option<f64>,
    pub coupling: Option<f64>,
    pub performance: Option<f64>,
    pub technology: Option<f64>,
    pub data: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitySnapshot {
    pub readiness_score: Option<f64>,
    pub technical_readiness: Option<f64>,
    pub architectural_readiness: Option<f64>,
    pub performance_readiness: Option<f64>,
    pub discrepancy_count: Option<f64>,
    pub critical_findings: Option<f64>,
    pub high_findings: Option<f64>,
}

/// A snapshot of one analysis run: the current state, or a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub analysis_id: String,
    pub application_name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub performance: Option<PerformanceMetrics>,
    #[serde(default)]
    pub coupling: Option<CouplingSnapshot>,
    #[serde(default)]
    pub complexity: Option<ComplexitySnapshot>,
    #[serde(default)]
    pub quality: Option<QualitySnapshot>,
}

/// One tracked value extracted from a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedMetric {
    /// `<category>.<field>`, e.g. `performance.p95_ms`.
    pub name: String,
    pub category: MetricCategory,
    pub direction: MetricDirection,
    pub value: f64,
}

impl AnalysisSnapshot {
    pub fn new(
        analysis_id: impl Into<String>,
        application_name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            analysis_id: analysis_id.into(),
            application_name: application_name.into(),
            timestamp,
            performance: None,
            coupling: None,
            complexity: None,
            quality: None,
        }
    }

    /// Snapshot of a completed gap analysis, optionally enriched with the
    /// coupling result and runtime baseline it was computed from.
    pub fn from_results(
        gap: &GapAnalysisResult,
        coupling: Option<&CouplingMetricsResult>,
        performance: Option<&PerformanceBaseline>,
    ) -> Self {
        let complexity = &gap.complexity_score;
        let readiness = &gap.readiness_assessment;
        Self {
            analysis_id: gap.analysis_id.clone(),
            application_name: gap.application_name.clone(),
            timestamp: gap.created_at,
            performance: performance.map(|p| PerformanceMetrics {
                p50_ms: Some(p.p50_ms),
                p95_ms: Some(p.p95_ms),
                p99_ms: Some(p.p99_ms),
                error_rate: Some(p.error_rate),
                throughput_rps: Some(p.throughput_rps),
            }),
            coupling: coupling.map(|c| CouplingSnapshot {
                coupling_density: Some(c.coupling_density),
                circular_dependency_count: Some(c.circular_dependencies.len() as f64),
                hotspot_count: Some(c.hotspot_count() as f64),
                average_instability: Some(c.average_instability()),
                average_distance: Some(c.average_distance()),
                migration_complexity_score: Some(c.migration_complexity_score),
                total_dependencies: Some(c.dependency_count as f64),
            }),
            complexity: Some(ComplexitySnapshot {
                overall_score: Some(complexity.overall_score),
                architectural: Some(complexity.architectural),
                coupling: Some(complexity.coupling),
                performance: Some(complexity.performance),
                technology: Some(complexity.technology),
                data: Some(complexity.data),
            }),
            quality: Some(QualitySnapshot {
                readiness_score: Some(readiness.readiness_score),
                technical_readiness: Some(readiness.technical_readiness),
                architectural_readiness: Some(readiness.architectural_readiness),
                performance_readiness: Some(readiness.performance_readiness),
                discrepancy_count: Some(gap.discrepancy_summary.total as f64),
                critical_findings: Some(gap.discrepancy_summary.count(Severity::Critical) as f64),
                high_findings: Some(gap.discrepancy_summary.count(Severity::High) as f64),
            }),
        }
    }

    /// Every present, finite metric in category order.
    pub fn metrics(&self) -> Vec<TrackedMetric> {
        let mut out = Vec::new();
        if let Some(p) = &self.performance {
            push_all(
                &mut out,
                MetricCategory::Performance,
                &[
                    ("p50_ms", LowerIsBetter, p.p50_ms),
                    ("p95_ms", LowerIsBetter, p.p95_ms),
                    ("p99_ms", LowerIsBetter, p.p99_ms),
                    ("error_rate", LowerIsBetter, p.error_rate),
                    ("throughput_rps", HigherIsBetter, p.throughput_rps),
                ],
            );
        }
        if let Some(c) = &self.coupling {
            push_all(
                &mut out,
                MetricCategory::Coupling,
                &[
                    ("coupling_density", LowerIsBetter, c.coupling_density),
                    ("circular_dependency_count", LowerIsBetter, c.circular_dependency_count),
                    ("hotspot_count", LowerIsBetter, c.hotspot_count),
                    ("average_instability", LowerIsBetter, c.average_instability),
                    ("average_distance", LowerIsBetter, c.average_distance),
                    ("migration_complexity_score", LowerIsBetter, c.migration_complexity_score),
                    ("total_dependencies", LowerIsBetter, c.total_dependencies),
                ],
            );
        }
        if let Some(c) = &self.complexity {
            push_all(
                &mut out,
                MetricCategory::Complexity,
                &[
                    ("overall_score", LowerIsBetter, c.overall_score),
                    ("architectural", LowerIsBetter, c.architectural),
                    ("coupling", LowerIsBetter, c.coupling),
                    ("performance", LowerIsBetter, c.performance),
                    ("technology", LowerIsBetter, c.technology),
                    ("data", LowerIsBetter, c.data),
                ],
            );
        }
        if let Some(q) = &self.quality {
            push_all(
                &mut out,
                MetricCategory::Quality,
                &[
                    ("readiness_score", HigherIsBetter, q.readiness_score),
                    ("technical_readiness", HigherIsBetter, q.technical_readiness),
                    ("architectural_readiness", HigherIsBetter, q.architectural_readiness),
                    ("performance_readiness", HigherIsBetter, q.performance_readiness),
                    ("discrepancy_count", LowerIsBetter, q.discrepancy_count),
                    ("critical_findings", LowerIsBetter, q.critical_findings),
                    ("high_findings", LowerIsBetter, q.high_findings),
                ],
            );
        }
        out
    }

    /// Value of a qualified metric name, if present and finite.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics()
            .into_iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }
}

fn push_all(
    out: &mut Vec<TrackedMetric>,
    category: MetricCategory,
    fields: &[(&str, MetricDirection, Option<f64>)],
) {
    for &(field, direction, value) in fields {
        if let Some(value) = value.filter(|v| v.is_finite()) {
            out.push(TrackedMetric {
                name: format!("{}.{field}", category.as_str()),
                category,
                direction,
                value,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_non_finite_values_are_skipped() {
        let mut snap = AnalysisSnapshot::new("s1", "app", Utc::now());
        snap.performance = Some(PerformanceMetrics {
            p95_ms: Some(420.0),
            p99_ms: Some(f64::NAN),
            ..PerformanceMetrics::default()
        });
        let metrics = snap.metrics();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].name, "performance.p95_ms");
        assert_eq!(snap.metric("performance.p99_ms"), None);
    }

    #[test]
    fn throughput_is_higher_is_better() {
        let mut snap = AnalysisSnapshot::new("s1", "app", Utc::now());
        snap.performance = Some(PerformanceMetrics {
            throughput_rps: Some(250.0),
            ..PerformanceMetrics::default()
        });
        assert_eq!(snap.metrics()[0].direction, HigherIsBetter);
    }
}
