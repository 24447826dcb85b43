//! Drift detection output types.

use chrono::{DateTime, Utc};
use readiness_core::types::{BTreeMap, MetricCategory};
use serde::{Deserialize, Serialize};

/// Which way a metric moves when it gets better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    LowerIsBetter,
    HigherIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftTrend {
    Improving,
    Stable,
    Degrading,
    Volatile,
}

impl DriftTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "IMPROVING",
            Self::Stable => "STABLE",
            Self::Degrading => "DEGRADING",
            Self::Volatile => "VOLATILE",
        }
    }
}

impl std::fmt::Display for DriftTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Magnitude of a drift. Ordered so `max()` yields the worst.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftSeverity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl DriftSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for DriftSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drift of one metric against one baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDrift {
    pub metric: String,
    pub category: MetricCategory,
    pub direction: MetricDirection,
    pub current_value: f64,
    pub baseline_value: f64,
    /// `(current - baseline) / baseline * 100`, unsigned by direction.
    pub raw_change_percentage: f64,
    /// Sign-normalized: positive always means worse.
    pub change_percentage: f64,
    pub trend: DriftTrend,
    pub severity: DriftSeverity,
}

/// The current snapshot compared against one baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub baseline_id: String,
    pub baseline_timestamp: DateTime<Utc>,
    pub metric_drifts: BTreeMap<MetricCategory, BTreeMap<String, MetricDrift>>,
    pub overall_drift_score: f64,
    pub overall_trend: DriftTrend,
    pub overall_severity: DriftSeverity,
    pub total_metrics: usize,
    pub degraded_metrics: usize,
    pub improved_metrics: usize,
    pub stable_metrics: usize,
    pub volatile_metrics: usize,
}

impl BaselineComparison {
    pub fn drifts(&self) -> impl Iterator<Item = &MetricDrift> {
        self.metric_drifts.values().flat_map(|m| m.values())
    }

    pub fn get(&self, metric: &str) -> Option<&MetricDrift> {
        self.drifts().find(|d| d.metric == metric)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftPatternKind {
    PerformanceDegradation,
    CouplingIncrease,
    ComplexityGrowth,
    QualityDecline,
    DependencyProliferation,
    ArchitecturalErosion,
}

impl DriftPatternKind {
    pub const ALL: &'static [DriftPatternKind] = &[
        Self::PerformanceDegradation,
        Self::CouplingIncrease,
        Self::ComplexityGrowth,
        Self::QualityDecline,
        Self::DependencyProliferation,
        Self::ArchitecturalErosion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PerformanceDegradation => "performance_degradation",
            Self::CouplingIncrease => "coupling_increase",
            Self::ComplexityGrowth => "complexity_growth",
            Self::QualityDecline => "quality_decline",
            Self::DependencyProliferation => "dependency_proliferation",
            Self::ArchitecturalErosion => "architectural_erosion",
        }
    }
}

impl std::fmt::Display for DriftPatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named multi-metric degradation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftPattern {
    pub pattern: DriftPatternKind,
    /// The baseline the pattern was observed against.
    pub baseline_id: String,
    pub affected_metrics: Vec<String>,
    pub description: String,
    pub severity: DriftSeverity,
}

/// Trend of one metric across the full chronological series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: String,
    pub category: MetricCategory,
    /// Oldest first, current value last.
    pub values: Vec<f64>,
    /// Least-squares slope per step.
    pub slope: f64,
    /// Residual standard deviation over the mean magnitude.
    pub coefficient_of_variation: f64,
    /// Sign-normalized change between the fitted first and last points.
    pub change_percentage: f64,
    pub trend: DriftTrend,
}

/// Output of one drift detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAnalysis {
    pub analysis_id: String,
    pub application_name: String,
    pub created_at: DateTime<Utc>,
    pub current_analysis_id: String,
    /// One per baseline, nearest first.
    pub baseline_comparisons: Vec<BaselineComparison>,
    pub drift_patterns: Vec<DriftPattern>,
    pub metric_trends: BTreeMap<String, MetricTrend>,
    pub critical_alerts: Vec<String>,
    pub degradation_warnings: Vec<String>,
    pub improvement_highlights: Vec<String>,
    pub recommendations: Vec<String>,
    pub overall_health_score: f64,
    pub total_metrics: usize,
    pub degraded_metrics: usize,
    pub improved_metrics: usize,
    pub stable_metrics: usize,
}

impl DriftAnalysis {
    pub fn nearest(&self) -> Option<&BaselineComparison> {
        self.baseline_comparisons.first()
    }

    pub fn has_pattern(&self, kind: DriftPatternKind) -> bool {
        self.drift_patterns.iter().any(|p| p.pattern == kind)
    }
}
