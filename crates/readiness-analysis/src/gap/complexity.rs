//! Five-dimension migration complexity.
//!
//! Each dimension sums severity points from the findings mapped to it and is
//! clamped to [0, 100]. Coupling takes the larger of the coupling analyzer's
//! contribution and its finding points; technology adds a share of the gap
//! between a perfect and the reported cloud-readiness score.

use readiness_core::config::{ComplexityWeights, SeverityPoints};
use readiness_core::types::{FindingCategory, Severity};

use super::types::{ComplexityLevel, ComplexityScore, DiscrepancyFinding};
use crate::coupling::{CouplingMetricsResult, HotspotType};
use crate::gap::inputs::CloudReadinessReport;

/// Share of the cloud-readiness gap that counts toward technology complexity.
pub const CLOUD_GAP_SHARE: f64 = 0.25;
/// A dimension at or above this is called out as a complexity factor.
const FACTOR_THRESHOLD: f64 = 50.0;
/// A dimension above this gets a simplification suggestion.
const OPPORTUNITY_THRESHOLD: f64 = 30.0;

/// The complexity dimension a finding category feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Architectural,
    Coupling,
    Performance,
    Technology,
    Data,
}

impl Dimension {
    pub fn of(category: FindingCategory) -> Self {
        match category {
            FindingCategory::Architectural => Self::Architectural,
            FindingCategory::Dependency => Self::Coupling,
            FindingCategory::Performance => Self::Performance,
            FindingCategory::Technology | FindingCategory::Security => Self::Technology,
            FindingCategory::Compliance | FindingCategory::DataAccess => Self::Data,
        }
    }
}

/// Sum of severity points of findings in `dimension`.
pub fn dimension_points(
    findings: &[DiscrepancyFinding],
    dimension: Dimension,
    points: &SeverityPoints,
) -> f64 {
    findings
        .iter()
        .filter(|f| Dimension::of(f.category) == dimension)
        .map(|f| points.for_severity(f.severity))
        .sum()
}

/// Fixed weighted sum of the five dimensions.
pub fn overall_score(dimensions: [f64; 5], weights: &ComplexityWeights) -> f64 {
    dimensions
        .iter()
        .zip(weights.as_array())
        .map(|(d, w)| d * w)
        .sum::<f64>()
        .clamp(0.0, 100.0)
}

pub fn score_complexity(
    findings: &[DiscrepancyFinding],
    coupling: Option<&CouplingMetricsResult>,
    cloud: Option<&CloudReadinessReport>,
    points: &SeverityPoints,
    weights: &ComplexityWeights,
) -> ComplexityScore {
    let sum = |d| dimension_points(findings, d, points);

    let architectural = clamp100(sum(Dimension::Architectural));
    let coupling_score = clamp100(
        coupling
            .map(|c| c.migration_complexity_score)
            .unwrap_or(0.0)
            .max(sum(Dimension::Coupling)),
    );
    let performance = clamp100(sum(Dimension::Performance));
    let cloud_gap = cloud
        .map(|c| (100.0 - c.readiness_score).clamp(0.0, 100.0) * CLOUD_GAP_SHARE)
        .unwrap_or(0.0);
    let technology = clamp100(sum(Dimension::Technology) + cloud_gap);
    let data = clamp100(sum(Dimension::Data));

    let dims = [architectural, coupling_score, performance, technology, data];
    let overall = overall_score(dims, weights);
    let level = ComplexityLevel::from_score(overall);

    let labels = ["Architectural", "Coupling", "Performance", "Technology", "Data"];
    let mut complexity_factors: Vec<String> = labels
        .iter()
        .zip(dims)
        .filter(|(_, score)| *score >= FACTOR_THRESHOLD)
        .map(|(label, score)| format!("{label} complexity is high ({score:.1})"))
        .collect();
    let criticals = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .count();
    if criticals > 0 {
        complexity_factors.push(format!("{criticals} critical findings"));
    }
    if let Some(c) = coupling {
        if !c.circular_dependencies.is_empty() {
            complexity_factors.push(format!(
                "{} circular dependencies",
                c.circular_dependencies.len()
            ));
        }
    }

    let simplification_opportunities =
        opportunities(findings, coupling, cloud, dims);

    ComplexityScore {
        architectural,
        coupling: coupling_score,
        performance,
        technology,
        data,
        overall_score: overall,
        complexity_level: level,
        estimated_effort_weeks: level.effort_weeks(),
        complexity_factors,
        simplification_opportunities,
    }
}

fn opportunities(
    findings: &[DiscrepancyFinding],
    coupling: Option<&CouplingMetricsResult>,
    cloud: Option<&CloudReadinessReport>,
    [architectural, coupling_score, performance, technology, data]: [f64; 5],
) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(c) = coupling {
        if !c.circular_dependencies.is_empty() {
            out.push("Break circular dependencies before extracting services".to_string());
        }
        if coupling_score > OPPORTUNITY_THRESHOLD {
            let mut hubs: Vec<&str> = c
                .coupling_hotspots
                .iter()
                .filter(|h| h.hotspot_type == HotspotType::HighAfferent)
                .flat_map(|h| h.components.iter().map(String::as_str))
                .collect();
            hubs.dedup();
            if !hubs.is_empty() {
                out.push(format!(
                    "Introduce stable interfaces in front of heavily used components: {}",
                    hubs.join(", ")
                ));
            }
        }
    }
    if architectural > OPPORTUNITY_THRESHOLD {
        out.push("Align the runtime call topology with the declared architecture".to_string());
    }
    if performance > OPPORTUNITY_THRESHOLD {
        out.push("Fix performance bottlenecks before migration to establish a clean baseline".to_string());
    }
    if technology > OPPORTUNITY_THRESHOLD {
        let flagged: Vec<&str> = cloud
            .map(|c| c.flagged_technologies.iter().map(|t| t.name.as_str()).collect())
            .unwrap_or_default();
        if flagged.is_empty() {
            out.push("Resolve technology findings ahead of the platform move".to_string());
        } else {
            out.push(format!("Replace flagged technologies first: {}", flagged.join(", ")));
        }
    }
    if data > OPPORTUNITY_THRESHOLD {
        out.push("Consolidate data access behind a single repository layer per store".to_string());
    }
    if out.is_empty() && findings.is_empty() {
        out.push("No structural blockers found; migrate incrementally to validate assumptions".to_string());
    }
    out
}

fn clamp100(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gap::discrepancies::pass_through;
    use crate::gap::inputs::ExternalFinding;

    fn finding(category: FindingCategory, severity: Severity) -> DiscrepancyFinding {
        pass_through(&ExternalFinding::new("test", category, severity, "t"))
    }

    #[test]
    fn no_inputs_scores_zero() {
        let s = score_complexity(
            &[],
            None,
            None,
            &SeverityPoints::default(),
            &ComplexityWeights::default(),
        );
        assert_eq!(s.overall_score, 0.0);
        assert_eq!(s.complexity_level, ComplexityLevel::Low);
        assert_eq!(s.estimated_effort_weeks, 4.0);
    }

    #[test]
    fn security_feeds_technology() {
        let findings = vec![finding(FindingCategory::Security, Severity::Critical)];
        let s = score_complexity(
            &findings,
            None,
            None,
            &SeverityPoints::default(),
            &ComplexityWeights::default(),
        );
        assert_eq!(s.technology, 40.0);
        assert!((s.overall_score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn dimensions_clamp_at_100() {
        let findings: Vec<_> = (0..5)
            .map(|_| finding(FindingCategory::Performance, Severity::Critical))
            .collect();
        let s = score_complexity(
            &findings,
            None,
            None,
            &SeverityPoints::default(),
            &ComplexityWeights::default(),
        );
        assert_eq!(s.performance, 100.0);
        assert!(s.complexity_factors.iter().any(|f| f.starts_with("Performance")));
    }

    #[test]
    fn cloud_gap_adds_to_technology() {
        let cloud = CloudReadinessReport {
            readiness_score: 60.0,
            flagged_technologies: vec![],
            findings: vec![],
        };
        let s = score_complexity(
            &[],
            None,
            Some(&cloud),
            &SeverityPoints::default(),
            &ComplexityWeights::default(),
        );
        assert_eq!(s.technology, 10.0);
    }
}
