//! Gap analysis output types.

use chrono::{DateTime, Utc};
use readiness_core::types::{BTreeMap, FindingCategory, Severity};
use serde::{Deserialize, Serialize};

/// A single gap between intended and observed state. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancyFinding {
    /// `GAP-<PREFIX>-<NNN>`, numbered per category in emission order.
    pub finding_id: String,
    pub category: FindingCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub impact: String,
    pub remediation_effort_days: f64,
    pub remediation_steps: Vec<String>,
    /// Reliability of the source data, in [0, 1].
    pub confidence_score: f64,
    /// Where the finding came from (`runtime`, `coupling`, an upstream tool name, ...).
    pub source: String,
}

/// Counts of findings by category and severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscrepancySummary {
    pub total: usize,
    pub by_category: BTreeMap<FindingCategory, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    pub total_remediation_days: f64,
}

impl DiscrepancySummary {
    pub fn from_findings(findings: &[DiscrepancyFinding]) -> Self {
        let mut summary = Self {
            total: findings.len(),
            ..Self::default()
        };
        for f in findings {
            *summary.by_category.entry(f.category).or_default() += 1;
            *summary.by_severity.entry(f.severity).or_default() += 1;
            summary.total_remediation_days += f.remediation_effort_days;
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ComplexityLevel {
    /// <30 Low, <50 Medium, ≤70 High, above that Very High.
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            Self::Low
        } else if score < 50.0 {
            Self::Medium
        } else if score <= 70.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn effort_weeks(&self) -> f64 {
        match self {
            Self::Low => 4.0,
            Self::Medium => 12.0,
            Self::High => 24.0,
            Self::VeryHigh => 48.0,
        }
    }

    /// Effort of the next tier up; Very High grows by half.
    pub fn next_tier_effort_weeks(&self) -> f64 {
        match self {
            Self::Low => Self::Medium.effort_weeks(),
            Self::Medium => Self::High.effort_weeks(),
            Self::High => Self::VeryHigh.effort_weeks(),
            Self::VeryHigh => Self::VeryHigh.effort_weeks() * 1.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Five-dimension migration complexity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    pub architectural: f64,
    pub coupling: f64,
    pub performance: f64,
    pub technology: f64,
    pub data: f64,
    pub overall_score: f64,
    pub complexity_level: ComplexityLevel,
    pub estimated_effort_weeks: f64,
    pub complexity_factors: Vec<String>,
    pub simplification_opportunities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadinessCategory {
    Ready,
    #[serde(rename = "Nearly Ready")]
    NearlyReady,
    #[serde(rename = "Needs Work")]
    NeedsWork,
    #[serde(rename = "Not Ready")]
    NotReady,
}

impl ReadinessCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::Ready
        } else if score >= 60.0 {
            Self::NearlyReady
        } else if score >= 40.0 {
            Self::NeedsWork
        } else {
            Self::NotReady
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NearlyReady => "Nearly Ready",
            Self::NeedsWork => "Needs Work",
            Self::NotReady => "Not Ready",
        }
    }
}

impl std::fmt::Display for ReadinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoNoGo {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "CONDITIONAL GO")]
    ConditionalGo,
    #[serde(rename = "NO GO")]
    NoGo,
}

impl GoNoGo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::ConditionalGo => "CONDITIONAL GO",
            Self::NoGo => "NO GO",
        }
    }
}

impl std::fmt::Display for GoNoGo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MigrationApproach {
    #[serde(rename = "Big Bang")]
    BigBang,
    #[serde(rename = "Strangler Fig")]
    StranglerFig,
    #[serde(rename = "Parallel Run")]
    ParallelRun,
}

impl MigrationApproach {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigBang => "Big Bang",
            Self::StranglerFig => "Strangler Fig",
            Self::ParallelRun => "Parallel Run",
        }
    }
}

impl std::fmt::Display for MigrationApproach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationReadinessAssessment {
    pub technical_readiness: f64,
    pub architectural_readiness: f64,
    pub performance_readiness: f64,
    pub organizational_readiness: f64,
    pub readiness_score: f64,
    pub readiness_category: ReadinessCategory,
    pub go_no_go_recommendation: GoNoGo,
    pub critical_blockers: Vec<String>,
    pub prerequisites: Vec<String>,
    pub recommended_approach: MigrationApproach,
    pub estimated_timeline_months: u32,
    pub confidence_level: f64,
}

/// How many of the four optional inputs were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// All four inputs present.
    Complete,
    /// Some inputs missing; findings are narrower.
    Partial,
    /// No inputs at all; the result carries defaults only.
    Insufficient,
}

/// Output of one gap analysis run. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysisResult {
    pub analysis_id: String,
    pub application_name: String,
    pub created_at: DateTime<Utc>,
    pub discrepancies: Vec<DiscrepancyFinding>,
    pub discrepancy_summary: DiscrepancySummary,
    pub complexity_score: ComplexityScore,
    pub readiness_assessment: MigrationReadinessAssessment,
    pub validation_status: ValidationStatus,
    pub validation_warnings: Vec<String>,
}

impl GapAnalysisResult {
    pub fn findings_in(&self, category: FindingCategory) -> impl Iterator<Item = &DiscrepancyFinding> {
        self.discrepancies
            .iter()
            .filter(move |f| f.category == category)
    }

    pub fn critical_count(&self) -> usize {
        self.discrepancy_summary.count(Severity::Critical)
    }
}
