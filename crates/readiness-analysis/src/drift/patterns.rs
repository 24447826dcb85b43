//! Rule-based drift patterns over a single baseline comparison.

use readiness_core::types::MetricCategory;

use super::types::{
    BaselineComparison, DriftPattern, DriftPatternKind, DriftSeverity, DriftTrend, MetricDrift,
};

/// Degrading metrics at or above this severity count toward a pattern.
pub const PATTERN_MIN_SEVERITY: DriftSeverity = DriftSeverity::Medium;
/// Metrics needed before a pattern is raised.
pub const PATTERN_MIN_METRICS: usize = 2;

const DEPENDENCY_METRICS: &[&str] = &[
    "coupling.total_dependencies",
    "coupling.circular_dependency_count",
    "coupling.coupling_density",
    "coupling.hotspot_count",
];

const EROSION_METRICS: &[&str] = &[
    "coupling.average_distance",
    "complexity.architectural",
    "quality.architectural_readiness",
    "quality.discrepancy_count",
];

impl DriftPatternKind {
    /// Whether `drift` belongs to the metric group this pattern watches.
    pub fn covers(&self, drift: &MetricDrift) -> bool {
        match self {
            Self::PerformanceDegradation => drift.category == MetricCategory::Performance,
            Self::CouplingIncrease => drift.category == MetricCategory::Coupling,
            Self::ComplexityGrowth => drift.category == MetricCategory::Complexity,
            Self::QualityDecline => drift.category == MetricCategory::Quality,
            Self::DependencyProliferation => DEPENDENCY_METRICS.contains(&drift.metric.as_str()),
            Self::ArchitecturalErosion => EROSION_METRICS.contains(&drift.metric.as_str()),
        }
    }

    fn describe(&self, count: usize) -> String {
        match self {
            Self::PerformanceDegradation => {
                format!("{count} performance metrics degraded together")
            }
            Self::CouplingIncrease => format!("{count} coupling metrics increased together"),
            Self::ComplexityGrowth => format!("{count} complexity dimensions grew together"),
            Self::QualityDecline => format!("{count} quality indicators declined together"),
            Self::DependencyProliferation => {
                format!("Dependencies are multiplying: {count} dependency metrics degraded")
            }
            Self::ArchitecturalErosion => format!(
                "Implementation is drifting from the intended architecture: {count} structural metrics degraded"
            ),
        }
    }
}

/// Every pattern raised by `comparison`, in [`DriftPatternKind::ALL`] order.
pub fn detect_patterns(comparison: &BaselineComparison) -> Vec<DriftPattern> {
    DriftPatternKind::ALL
        .iter()
        .filter_map(|kind| {
            let hits: Vec<&MetricDrift> = comparison
                .drifts()
                .filter(|d| {
                    kind.covers(d)
                        && d.trend == DriftTrend::Degrading
                        && d.severity >= PATTERN_MIN_SEVERITY
                })
                .collect();
            if hits.len() < PATTERN_MIN_METRICS {
                return None;
            }
            Some(DriftPattern {
                pattern: *kind,
                baseline_id: comparison.baseline_id.clone(),
                affected_metrics: hits.iter().map(|d| d.metric.clone()).collect(),
                description: kind.describe(hits.len()),
                severity: hits
                    .iter()
                    .map(|d| d.severity)
                    .max()
                    .unwrap_or(PATTERN_MIN_SEVERITY),
            })
        })
        .collect()
}

/// Remediation suggestion for a pattern.
pub fn recommendation(kind: DriftPatternKind) -> &'static str {
    match kind {
        DriftPatternKind::PerformanceDegradation => {
            "Profile application to identify performance bottlenecks"
        }
        DriftPatternKind::CouplingIncrease => {
            "Review recent changes for new cross-component dependencies and extract interfaces at hotspots"
        }
        DriftPatternKind::ComplexityGrowth => {
            "Schedule refactoring to reduce complexity before continuing the migration"
        }
        DriftPatternKind::QualityDecline => {
            "Re-run gap analysis and address newly introduced high-severity findings"
        }
        DriftPatternKind::DependencyProliferation => {
            "Audit dependency additions and break newly introduced cycles"
        }
        DriftPatternKind::ArchitecturalErosion => {
            "Re-align the implementation with the target architecture and enforce module boundaries"
        }
    }
}

/// Fallback suggestion for a category with alerts but no pattern.
pub fn category_recommendation(category: MetricCategory) -> &'static str {
    match category {
        MetricCategory::Performance => "Investigate the degraded performance metrics against recent releases",
        MetricCategory::Coupling => "Review coupling hotspots introduced since the last baseline",
        MetricCategory::Complexity => "Revisit the complexity drivers flagged in the latest gap analysis",
        MetricCategory::Quality => "Track the new findings to closure before the next readiness review",
    }
}
