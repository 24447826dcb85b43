//! Readiness assessment, go/no-go decision, and approach selection.

use readiness_core::config::{GapConfig, ReadinessWeights, SeverityPoints};
use readiness_core::types::{FindingCategory, Severity};

use super::types::{
    ComplexityLevel, ComplexityScore, DiscrepancyFinding, GoNoGo, MigrationApproach,
    MigrationReadinessAssessment, ReadinessCategory,
};

/// 100 minus the severity points of findings in `categories`, clamped.
pub fn readiness_from_findings(
    findings: &[DiscrepancyFinding],
    categories: &[FindingCategory],
    points: &SeverityPoints,
) -> f64 {
    let penalty: f64 = findings
        .iter()
        .filter(|f| categories.contains(&f.category))
        .map(|f| points.for_severity(f.severity))
        .sum();
    (100.0 - penalty).clamp(0.0, 100.0)
}

/// `100 - (complexity*w_c + (100-technical)*w_t + (100-architectural)*w_a + (100-performance)*w_p)`,
/// clamped to [0, 100].
pub fn readiness_score(
    complexity_overall: f64,
    technical: f64,
    architectural: f64,
    performance: f64,
    weights: &ReadinessWeights,
) -> f64 {
    let drag = complexity_overall * weights.complexity
        + (100.0 - technical) * weights.technical
        + (100.0 - architectural) * weights.architectural
        + (100.0 - performance) * weights.performance;
    (100.0 - drag).clamp(0.0, 100.0)
}

/// Deterministic decision in priority order: critical blockers, then the
/// GO threshold, then the CONDITIONAL GO threshold.
pub fn decide(critical_count: usize, readiness_score: f64, config: &GapConfig) -> GoNoGo {
    if critical_count >= config.effective_critical_blocker_threshold() as usize {
        GoNoGo::NoGo
    } else if readiness_score >= config.effective_go_threshold() {
        GoNoGo::Go
    } else if readiness_score >= config.effective_conditional_threshold() {
        GoNoGo::ConditionalGo
    } else {
        GoNoGo::NoGo
    }
}

pub fn recommend_approach(level: ComplexityLevel, category: ReadinessCategory) -> MigrationApproach {
    match (level, category) {
        (ComplexityLevel::High | ComplexityLevel::VeryHigh, _) | (_, ReadinessCategory::NotReady) => {
            MigrationApproach::ParallelRun
        }
        (ComplexityLevel::Low, ReadinessCategory::Ready | ReadinessCategory::NearlyReady) => {
            MigrationApproach::BigBang
        }
        _ => MigrationApproach::StranglerFig,
    }
}

/// Effort weeks over four, rounded up; one tier up unless the decision is GO.
pub fn timeline_months(level: ComplexityLevel, decision: GoNoGo) -> u32 {
    let weeks = match decision {
        GoNoGo::Go => level.effort_weeks(),
        GoNoGo::ConditionalGo | GoNoGo::NoGo => level.next_tier_effort_weeks(),
    };
    (weeks / 4.0).ceil() as u32
}

pub fn assess(
    findings: &[DiscrepancyFinding],
    complexity: &ComplexityScore,
    organizational_readiness: f64,
    confidence_level: f64,
    config: &GapConfig,
) -> MigrationReadinessAssessment {
    let points = config.effective_severity_points();
    let technical = readiness_from_findings(findings, &[FindingCategory::Technology], &points);
    let architectural = readiness_from_findings(
        findings,
        &[FindingCategory::Architectural, FindingCategory::Dependency],
        &points,
    );
    let performance = readiness_from_findings(findings, &[FindingCategory::Performance], &points);

    let score = readiness_score(
        complexity.overall_score,
        technical,
        architectural,
        performance,
        &config.effective_readiness_weights(),
    );
    let category = ReadinessCategory::from_score(score);

    let critical: Vec<&DiscrepancyFinding> = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .collect();
    let decision = decide(critical.len(), score, config);
    let critical_blockers = if decision == GoNoGo::NoGo && !critical.is_empty() {
        critical.iter().map(|f| f.title.clone()).collect()
    } else {
        Vec::new()
    };

    MigrationReadinessAssessment {
        technical_readiness: technical,
        architectural_readiness: architectural,
        performance_readiness: performance,
        organizational_readiness: organizational_readiness.clamp(0.0, 100.0),
        readiness_score: score,
        readiness_category: category,
        go_no_go_recommendation: decision,
        critical_blockers,
        prerequisites: prerequisites(
            findings,
            organizational_readiness,
            config.effective_default_organizational_readiness(),
        ),
        recommended_approach: recommend_approach(complexity.complexity_level, category),
        estimated_timeline_months: timeline_months(complexity.complexity_level, decision),
        confidence_level: confidence_level.clamp(0.0, 1.0),
    }
}

/// High and critical findings become prerequisites, most severe first.
/// Organizational readiness below the neutral level adds a training step.
fn prerequisites(
    findings: &[DiscrepancyFinding],
    organizational_readiness: f64,
    neutral_organizational_readiness: f64,
) -> Vec<String> {
    let mut severe: Vec<&DiscrepancyFinding> = findings
        .iter()
        .filter(|f| f.severity >= Severity::High)
        .collect();
    severe.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut out: Vec<String> = severe
        .iter()
        .map(|f| format!("Resolve {}: {}", f.finding_id, f.title))
        .collect();
    if organizational_readiness < neutral_organizational_readiness {
        out.push("Secure team training and ownership for the target platform".to_string());
    }
    out
}
