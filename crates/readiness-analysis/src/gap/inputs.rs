//! Inputs to the gap analyzer. Every source is optional.

use readiness_core::types::{FindingCategory, Severity};
use serde::{Deserialize, Serialize};

use crate::coupling::{CouplingMetricsResult, DependencyGraph};

/// Runtime latency, error, and throughput measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBaseline {
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    /// Fraction of failed requests, in [0, 1].
    pub error_rate: f64,
    pub throughput_rps: f64,
    /// Number of requests the percentiles were computed from.
    pub sample_size: u64,
    #[serde(default)]
    pub sampling_window_secs: Option<f64>,
    /// Reliability the collaborator reports for these figures, in [0, 1].
    #[serde(default)]
    pub statistical_confidence: Option<f64>,
}

impl PerformanceBaseline {
    /// True when every measured figure is a finite number. Baselines that
    /// fail this are treated as missing.
    pub fn is_finite(&self) -> bool {
        [
            self.p50_ms,
            self.p95_ms,
            self.p99_ms,
            self.error_rate,
            self.throughput_rps,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// A call between components observed at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedCall {
    /// Node id or component name.
    pub from: String,
    pub to: String,
    pub call_frequency: f64,
}

impl ObservedCall {
    pub fn new(from: impl Into<String>, to: impl Into<String>, call_frequency: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            call_frequency,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeAnalysisResults {
    #[serde(default)]
    pub performance: Option<PerformanceBaseline>,
    #[serde(default)]
    pub observed_calls: Vec<ObservedCall>,
    /// Architectural patterns recognized from traces (e.g. `layered`, `event-driven`).
    #[serde(default)]
    pub observed_patterns: Vec<String>,
}

impl RuntimeAnalysisResults {
    /// The performance baseline, if present and numerically usable.
    pub fn usable_performance(&self) -> Option<&PerformanceBaseline> {
        self.performance.as_ref().filter(|p| p.is_finite())
    }
}

/// A finding produced by an upstream collaborator, normalized into a
/// [`super::DiscrepancyFinding`] by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFinding {
    pub source: String,
    pub category: FindingCategory,
    pub severity: Severity,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub remediation_effort_days: Option<f64>,
    #[serde(default)]
    pub remediation_steps: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ExternalFinding {
    pub fn new(
        source: impl Into<String>,
        category: FindingCategory,
        severity: Severity,
        title: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            category,
            severity,
            title: title.into(),
            description: String::new(),
            evidence: Vec::new(),
            impact: None,
            remediation_effort_days: None,
            remediation_steps: Vec::new(),
            confidence: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticAnalysisResults {
    /// The intended (declared) dependency topology.
    #[serde(default)]
    pub dependency_graph: Option<DependencyGraph>,
    /// Patterns the codebase declares or is designed around.
    #[serde(default)]
    pub architectural_patterns: Vec<String>,
    #[serde(default)]
    pub findings: Vec<ExternalFinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyStatus {
    Deprecated,
    Unsupported,
    EndOfLife,
}

impl TechnologyStatus {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Deprecated => Severity::Medium,
            Self::Unsupported | Self::EndOfLife => Severity::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deprecated => "deprecated",
            Self::Unsupported => "unsupported",
            Self::EndOfLife => "end-of-life",
        }
    }
}

/// A library or platform flagged by the cloud-readiness assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTechnology {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub status: TechnologyStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub replacement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudReadinessReport {
    /// 0-100.
    pub readiness_score: f64,
    #[serde(default)]
    pub flagged_technologies: Vec<FlaggedTechnology>,
    #[serde(default)]
    pub findings: Vec<ExternalFinding>,
}

/// Everything the gap analyzer may consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapInputs {
    #[serde(default)]
    pub static_results: Option<StaticAnalysisResults>,
    #[serde(default)]
    pub runtime_results: Option<RuntimeAnalysisResults>,
    #[serde(default)]
    pub coupling_result: Option<CouplingMetricsResult>,
    #[serde(default)]
    pub cloud_readiness: Option<CloudReadinessReport>,
    /// 0-100. Falls back to the configured neutral default.
    #[serde(default)]
    pub organizational_readiness: Option<f64>,
}

impl GapInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static(mut self, results: StaticAnalysisResults) -> Self {
        self.static_results = Some(results);
        self
    }

    pub fn with_runtime(mut self, results: RuntimeAnalysisResults) -> Self {
        self.runtime_results = Some(results);
        self
    }

    pub fn with_coupling(mut self, result: CouplingMetricsResult) -> Self {
        self.coupling_result = Some(result);
        self
    }

    pub fn with_cloud_readiness(mut self, report: CloudReadinessReport) -> Self {
        self.cloud_readiness = Some(report);
        self
    }

    pub fn with_organizational_readiness(mut self, score: f64) -> Self {
        self.organizational_readiness = Some(score);
        self
    }

    /// Number of the four analysis sources supplied.
    pub fn sources_present(&self) -> usize {
        [
            self.static_results.is_some(),
            self.runtime_results.is_some(),
            self.coupling_result.is_some(),
            self.cloud_readiness.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
