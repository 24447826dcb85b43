//! Discrepancy identification: one rule family per finding category.
//!
//! Each rule compares a measured value against a configured threshold and
//! emits a [`DiscrepancyFinding`] on violation. Ids are assigned afterwards
//! by [`assign_finding_ids`] so numbering is stable per category.

use std::collections::BTreeSet;

use readiness_core::config::GapConfig;
use readiness_core::types::{BTreeMap, FindingCategory, FxHashMap, Severity};

use super::inputs::{
    CloudReadinessReport, ExternalFinding, PerformanceBaseline, RuntimeAnalysisResults,
    StaticAnalysisResults,
};
use super::types::DiscrepancyFinding;
use crate::coupling::{CouplingMetricsResult, HotspotType};

/// Confidence of findings derived from static structure.
pub const STATIC_CONFIDENCE: f64 = 0.9;
/// Confidence of findings derived from the cloud-readiness assessment.
pub const CLOUD_CONFIDENCE: f64 = 0.85;
/// Confidence of topology findings when no performance sample is available.
pub const UNSAMPLED_RUNTIME_CONFIDENCE: f64 = 0.6;
/// Confidence assumed for upstream findings that carry none.
pub const DEFAULT_EXTERNAL_CONFIDENCE: f64 = 0.8;

/// Maximum evidence lines attached to a single finding.
const MAX_EVIDENCE: usize = 10;

/// Base remediation days per category, before the severity multiplier.
pub fn base_remediation_days(category: FindingCategory) -> f64 {
    match category {
        FindingCategory::Architectural => 10.0,
        FindingCategory::Performance => 5.0,
        FindingCategory::Dependency => 8.0,
        FindingCategory::Technology => 6.0,
        FindingCategory::Security => 4.0,
        FindingCategory::Compliance => 5.0,
        FindingCategory::DataAccess => 6.0,
    }
}

/// Reliability of runtime measurements: grows with sample size, shrinks
/// with the error rate. Always in [0, 1].
pub fn runtime_confidence(sample_size: u64, error_rate: f64, min_sample_size: u64) -> f64 {
    let n = sample_size as f64;
    let sample_factor = n / (n + min_sample_size.max(1) as f64);
    let error_rate = if error_rate.is_finite() {
        error_rate.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let error_penalty = 1.0 - 0.5 * error_rate;
    (sample_factor * error_penalty).clamp(0.0, 1.0)
}

/// [`runtime_confidence`] scaled by the collaborator's own statistical
/// confidence, when it reports one.
pub fn performance_confidence(perf: &PerformanceBaseline, min_sample_size: u64) -> f64 {
    let reported = perf
        .statistical_confidence
        .filter(|c| c.is_finite())
        .map_or(1.0, |c| c.clamp(0.0, 1.0));
    runtime_confidence(perf.sample_size, perf.error_rate, min_sample_size) * reported
}

struct Draft {
    category: FindingCategory,
    severity: Severity,
    title: String,
    description: String,
    evidence: Vec<String>,
    impact: String,
    remediation_steps: Vec<String>,
    confidence: f64,
    source: &'static str,
}

impl Draft {
    fn build(self) -> DiscrepancyFinding {
        DiscrepancyFinding {
            finding_id: String::new(),
            remediation_effort_days: base_remediation_days(self.category)
                * self.severity.effort_multiplier(),
            category: self.category,
            severity: self.severity,
            title: self.title,
            description: self.description,
            evidence: self.evidence,
            impact: self.impact,
            remediation_steps: self.remediation_steps,
            confidence_score: self.confidence.clamp(0.0, 1.0),
            source: self.source.to_string(),
        }
    }
}

/// Applies the configured thresholds to each input source.
pub struct DiscrepancyRules<'a> {
    config: &'a GapConfig,
}

impl<'a> DiscrepancyRules<'a> {
    pub fn new(config: &'a GapConfig) -> Self {
        Self { config }
    }

    /// P95, P99, error rate, and throughput, each checked independently.
    pub fn performance(&self, perf: &PerformanceBaseline) -> Vec<DiscrepancyFinding> {
        let ratios = self.config.effective_severity_ratios();
        let confidence = performance_confidence(perf, self.config.effective_min_sample_size());
        let sample = format!(
            "sample size {} ({})",
            perf.sample_size,
            perf.sampling_window_secs
                .map(|s| format!("{s:.0}s window"))
                .unwrap_or_else(|| "window unknown".to_string())
        );
        let mut findings = Vec::new();

        let latency_checks = [
            ("P95", perf.p95_ms, self.config.effective_p95_threshold_ms()),
            ("P99", perf.p99_ms, self.config.effective_p99_threshold_ms()),
        ];
        for (label, value, threshold) in latency_checks {
            if value > threshold {
                let ratio = value / threshold;
                findings.push(
                    Draft {
                        category: FindingCategory::Performance,
                        severity: ratios.classify(ratio),
                        title: format!("{label} latency above threshold"),
                        description: format!(
                            "{label} response time is {value:.0}ms against a {threshold:.0}ms threshold ({ratio:.1}x)"
                        ),
                        evidence: vec![
                            format!("{label} = {value:.1}ms"),
                            format!("P50 = {:.1}ms", perf.p50_ms),
                            sample.clone(),
                        ],
                        impact: "Latency will compound once in-process calls become network calls".to_string(),
                        remediation_steps: vec![
                            "Profile the slowest endpoints and their downstream calls".to_string(),
                            "Add caching for repeated reads on the hot path".to_string(),
                            "Re-measure after fixes to establish a clean pre-migration baseline".to_string(),
                        ],
                        confidence,
                        source: "runtime",
                    }
                    .build(),
                );
            }
        }

        let max_error_rate = self.config.effective_max_error_rate();
        if perf.error_rate > max_error_rate {
            let ratio = perf.error_rate / max_error_rate;
            findings.push(
                Draft {
                    category: FindingCategory::Performance,
                    severity: ratios.classify(ratio),
                    title: "Error rate above threshold".to_string(),
                    description: format!(
                        "Error rate is {:.2}% against a {:.2}% threshold",
                        perf.error_rate * 100.0,
                        max_error_rate * 100.0
                    ),
                    evidence: vec![format!("error_rate = {:.4}", perf.error_rate), sample.clone()],
                    impact: "Existing failures will be hard to tell apart from migration regressions".to_string(),
                    remediation_steps: vec![
                        "Triage the top failing operations by volume".to_string(),
                        "Fix or explicitly accept known failures before cut-over".to_string(),
                    ],
                    confidence,
                    source: "runtime",
                }
                .build(),
            );
        }

        let min_throughput = self.config.effective_min_throughput_rps();
        if perf.throughput_rps < min_throughput {
            let severity = if perf.throughput_rps <= 0.0 {
                Severity::Critical
            } else {
                ratios.classify(min_throughput / perf.throughput_rps)
            };
            findings.push(
                Draft {
                    category: FindingCategory::Performance,
                    severity,
                    title: "Throughput below minimum".to_string(),
                    description: format!(
                        "Throughput is {:.1} rps against a {min_throughput:.1} rps minimum",
                        perf.throughput_rps
                    ),
                    evidence: vec![format!("throughput_rps = {:.2}", perf.throughput_rps), sample],
                    impact: "The target platform must be sized beyond current capacity to absorb load".to_string(),
                    remediation_steps: vec![
                        "Identify the saturated resource (CPU, I/O, connection pool)".to_string(),
                        "Load test the target environment before cut-over".to_string(),
                    ],
                    confidence,
                    source: "runtime",
                }
                .build(),
            );
        }

        findings
    }

    /// Cycles, density, and coupling hotspots from the coupling analyzer.
    ///
    /// Threshold hotspots are capped at HIGH: they gate ordering and
    /// prerequisites but never block on their own. Only cycles (and the
    /// upstream findings) can raise a CRITICAL dependency blocker.
    pub fn dependency(&self, coupling: &CouplingMetricsResult) -> Vec<DiscrepancyFinding> {
        let mut findings = Vec::new();

        let cycles = coupling.circular_dependencies.len();
        if cycles > 0 {
            let severity = match cycles {
                n if n >= 10 => Severity::Critical,
                n if n >= 3 => Severity::High,
                _ => Severity::Medium,
            };
            let more = if coupling.cycles_truncated { "+" } else { "" };
            findings.push(
                Draft {
                    category: FindingCategory::Dependency,
                    severity,
                    title: "Circular dependencies present".to_string(),
                    description: format!("{cycles}{more} circular dependencies detected"),
                    evidence: coupling
                        .circular_dependencies
                        .iter()
                        .take(MAX_EVIDENCE)
                        .map(ToString::to_string)
                        .collect(),
                    impact: "Components in a cycle cannot be migrated independently".to_string(),
                    remediation_steps: vec![
                        "Break each cycle with dependency inversion on its weakest edge".to_string(),
                        "Extract shared types into a common package".to_string(),
                    ],
                    confidence: STATIC_CONFIDENCE,
                    source: "coupling",
                }
                .build(),
            );
        }

        let max_density = self.config.effective_max_coupling_density();
        if coupling.coupling_density > max_density {
            let ratio = coupling.coupling_density / max_density;
            findings.push(
                Draft {
                    category: FindingCategory::Dependency,
                    severity: self.config.effective_severity_ratios().classify(ratio),
                    title: "Coupling density above threshold".to_string(),
                    description: format!(
                        "Coupling density is {:.3} against a {max_density:.3} threshold",
                        coupling.coupling_density
                    ),
                    evidence: vec![
                        format!("components = {}", coupling.component_count),
                        format!("dependencies = {}", coupling.dependency_count),
                    ],
                    impact: "Dense graphs leave few clean seams for incremental extraction".to_string(),
                    remediation_steps: vec![
                        "Group components into bounded contexts and route cross-context calls through interfaces".to_string(),
                    ],
                    confidence: STATIC_CONFIDENCE,
                    source: "coupling",
                }
                .build(),
            );
        }

        let severe: Vec<_> = coupling
            .hotspots_at_least(Severity::High)
            .filter(|h| h.hotspot_type != HotspotType::CircularDependency)
            .collect();
        if !severe.is_empty() {
            let worst = severe
                .iter()
                .map(|h| h.severity)
                .max()
                .unwrap_or(Severity::High)
                .min(Severity::High);
            findings.push(
                Draft {
                    category: FindingCategory::Dependency,
                    severity: worst,
                    title: "Severe coupling hotspots".to_string(),
                    description: format!("{} components exceed coupling thresholds by 1.5x or more", severe.len()),
                    evidence: severe
                        .iter()
                        .take(MAX_EVIDENCE)
                        .map(|h| h.description.clone())
                        .collect(),
                    impact: "Hotspots set the migration order: their dependents cannot move first".to_string(),
                    remediation_steps: severe
                        .iter()
                        .flat_map(|h| h.remediation_suggestions.iter().cloned())
                        .fold(Vec::new(), |mut acc, s| {
                            if !acc.contains(&s) {
                                acc.push(s);
                            }
                            acc
                        }),
                    confidence: STATIC_CONFIDENCE,
                    source: "coupling",
                }
                .build(),
            );
        }

        findings
    }

    /// Intended (static) against observed (runtime) topology and patterns.
    pub fn architectural(
        &self,
        declared: &StaticAnalysisResults,
        runtime: &RuntimeAnalysisResults,
    ) -> Vec<DiscrepancyFinding> {
        let mut findings = Vec::new();
        let confidence = runtime
            .usable_performance()
            .map(|p| performance_confidence(p, self.config.effective_min_sample_size()))
            .unwrap_or(UNSAMPLED_RUNTIME_CONFIDENCE)
            .min(STATIC_CONFIDENCE);

        if let Some(graph) = &declared.dependency_graph {
            if !runtime.observed_calls.is_empty() {
                let names: FxHashMap<&str, &str> = graph
                    .nodes
                    .iter()
                    .map(|n| (n.id.as_str(), n.name.as_str()))
                    .collect();
                let declared_pairs: BTreeSet<(String, String)> = graph
                    .edges
                    .iter()
                    .filter(|e| e.from != e.to)
                    .map(|e| (name_of(&names, &e.from), name_of(&names, &e.to)))
                    .collect();
                let mut observed: BTreeMap<(String, String), f64> = BTreeMap::new();
                for call in runtime.observed_calls.iter().filter(|c| c.from != c.to) {
                    *observed
                        .entry((name_of(&names, &call.from), name_of(&names, &call.to)))
                        .or_default() += call.call_frequency.max(0.0);
                }

                let undeclared: Vec<_> = observed
                    .iter()
                    .filter(|(pair, _)| !declared_pairs.contains(*pair))
                    .collect();
                if !undeclared.is_empty() {
                    let ratio = undeclared.len() as f64 / observed.len() as f64;
                    let severity = if ratio > 0.3 {
                        Severity::High
                    } else if ratio > 0.1 {
                        Severity::Medium
                    } else {
                        Severity::Low
                    };
                    findings.push(
                        Draft {
                            category: FindingCategory::Architectural,
                            severity,
                            title: "Undeclared runtime dependencies".to_string(),
                            description: format!(
                                "{} of {} observed call paths are absent from the declared dependency graph",
                                undeclared.len(),
                                observed.len()
                            ),
                            evidence: undeclared
                                .iter()
                                .take(MAX_EVIDENCE)
                                .map(|((from, to), freq)| format!("{from} -> {to} ({freq:.0} calls)"))
                                .collect(),
                            impact: "Hidden dependencies break when components are split across deployment boundaries".to_string(),
                            remediation_steps: vec![
                                "Trace how each undeclared call is wired (reflection, configuration, shared clients)".to_string(),
                                "Declare or remove each dependency before planning extraction order".to_string(),
                            ],
                            confidence,
                            source: "runtime",
                        }
                        .build(),
                    );
                }

                let unexercised: Vec<_> = declared_pairs
                    .iter()
                    .filter(|pair| !observed.contains_key(*pair))
                    .collect();
                if !unexercised.is_empty() {
                    let ratio = unexercised.len() as f64 / declared_pairs.len() as f64;
                    findings.push(
                        Draft {
                            category: FindingCategory::Architectural,
                            severity: if ratio > 0.5 { Severity::Low } else { Severity::Info },
                            title: "Declared dependencies not exercised at runtime".to_string(),
                            description: format!(
                                "{} of {} declared dependencies were never observed",
                                unexercised.len(),
                                declared_pairs.len()
                            ),
                            evidence: unexercised
                                .iter()
                                .take(MAX_EVIDENCE)
                                .map(|(from, to)| format!("{from} -> {to}"))
                                .collect(),
                            impact: "Dead dependencies inflate coupling and migration scope".to_string(),
                            remediation_steps: vec![
                                "Confirm the paths are dead (or only used by rare jobs) and remove them".to_string(),
                            ],
                            confidence,
                            source: "runtime",
                        }
                        .build(),
                    );
                }
            }
        }

        if !declared.architectural_patterns.is_empty() && !runtime.observed_patterns.is_empty() {
            let observed: Vec<String> = runtime
                .observed_patterns
                .iter()
                .map(|p| p.to_lowercase())
                .collect();
            let missing: Vec<&String> = declared
                .architectural_patterns
                .iter()
                .filter(|p| !observed.contains(&p.to_lowercase()))
                .collect();
            if !missing.is_empty() {
                let severity = if missing.len() == declared.architectural_patterns.len() {
                    Severity::High
                } else {
                    Severity::Medium
                };
                findings.push(
                    Draft {
                        category: FindingCategory::Architectural,
                        severity,
                        title: "Architectural pattern mismatch".to_string(),
                        description: format!(
                            "{} declared patterns are not reflected in runtime behavior",
                            missing.len()
                        ),
                        evidence: missing
                            .iter()
                            .map(|p| format!("declared but not observed: {p}"))
                            .chain(
                                runtime
                                    .observed_patterns
                                    .iter()
                                    .map(|p| format!("observed: {p}")),
                            )
                            .take(MAX_EVIDENCE)
                            .collect(),
                        impact: "Migration plans built on the declared architecture will miss real interactions".to_string(),
                        remediation_steps: vec![
                            "Document the architecture the system actually follows".to_string(),
                            "Decide whether to restore the intended pattern before or during migration".to_string(),
                        ],
                        confidence,
                        source: "runtime",
                    }
                    .build(),
                );
            }
        }

        findings
    }

    /// Flagged technologies and a low overall cloud-readiness score.
    pub fn technology(&self, cloud: &CloudReadinessReport) -> Vec<DiscrepancyFinding> {
        let mut findings: Vec<DiscrepancyFinding> = cloud
            .flagged_technologies
            .iter()
            .map(|tech| {
                let version = tech
                    .version
                    .as_deref()
                    .map(|v| format!(" {v}"))
                    .unwrap_or_default();
                let mut steps = Vec::new();
                if let Some(replacement) = &tech.replacement {
                    steps.push(format!("Replace {} with {replacement}", tech.name));
                } else {
                    steps.push(format!("Identify a supported replacement for {}", tech.name));
                }
                steps.push("Cover the affected integration points with tests before swapping".to_string());
                Draft {
                    category: FindingCategory::Technology,
                    severity: tech.status.severity(),
                    title: format!("{}{version} is {}", tech.name, tech.status.as_str()),
                    description: if tech.reason.is_empty() {
                        format!("{} is flagged as {}", tech.name, tech.status.as_str())
                    } else {
                        tech.reason.clone()
                    },
                    evidence: vec![format!("{}{version}: {}", tech.name, tech.status.as_str())],
                    impact: "The target platform may not run or support this technology".to_string(),
                    remediation_steps: steps,
                    confidence: CLOUD_CONFIDENCE,
                    source: "cloud_readiness",
                }
                .build()
            })
            .collect();

        let min_score = self.config.effective_min_cloud_readiness();
        if cloud.readiness_score < min_score {
            let severity = if cloud.readiness_score < min_score / 2.0 {
                Severity::High
            } else {
                Severity::Medium
            };
            findings.push(
                Draft {
                    category: FindingCategory::Technology,
                    severity,
                    title: "Low cloud readiness".to_string(),
                    description: format!(
                        "Cloud readiness score is {:.0} against a minimum of {min_score:.0}",
                        cloud.readiness_score
                    ),
                    evidence: vec![format!("readiness_score = {:.1}", cloud.readiness_score)],
                    impact: "Platform adaptation work will dominate the migration".to_string(),
                    remediation_steps: vec![
                        "Address the cloud-readiness report's blocking items first".to_string(),
                    ],
                    confidence: CLOUD_CONFIDENCE,
                    source: "cloud_readiness",
                }
                .build(),
            );
        }

        findings
    }
}

/// Normalizes an upstream finding into the common shape.
pub fn pass_through(finding: &ExternalFinding) -> DiscrepancyFinding {
    DiscrepancyFinding {
        finding_id: String::new(),
        category: finding.category,
        severity: finding.severity,
        title: finding.title.clone(),
        description: if finding.description.is_empty() {
            finding.title.clone()
        } else {
            finding.description.clone()
        },
        evidence: finding.evidence.clone(),
        impact: finding
            .impact
            .clone()
            .unwrap_or_else(|| format!("Reported by {}", finding.source)),
        remediation_effort_days: finding
            .remediation_effort_days
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or_else(|| {
                base_remediation_days(finding.category) * finding.severity.effort_multiplier()
            }),
        remediation_steps: finding.remediation_steps.clone(),
        confidence_score: finding
            .confidence
            .filter(|c| c.is_finite())
            .unwrap_or(DEFAULT_EXTERNAL_CONFIDENCE)
            .clamp(0.0, 1.0),
        source: finding.source.clone(),
    }
}

/// Numbers findings `GAP-<PREFIX>-001`, `-002`, ... per category, in order.
pub fn assign_finding_ids(findings: &mut [DiscrepancyFinding]) {
    let mut counters: BTreeMap<FindingCategory, usize> = BTreeMap::new();
    for finding in findings {
        let n = counters.entry(finding.category).or_default();
        *n += 1;
        finding.finding_id = format!("GAP-{}-{:03}", finding.category.id_prefix(), n);
    }
}

fn name_of(names: &FxHashMap<&str, &str>, id: &str) -> String {
    names.get(id).copied().unwrap_or(id).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::DependencyGraph;
    use crate::gap::inputs::ObservedCall;

    fn perf(p95: f64) -> PerformanceBaseline {
        PerformanceBaseline {
            p50_ms: 100.0,
            p95_ms: p95,
            p99_ms: 900.0,
            error_rate: 0.001,
            throughput_rps: 500.0,
            sample_size: 10_000,
            sampling_window_secs: Some(3600.0),
            statistical_confidence: None,
        }
    }

    #[test]
    fn p95_severity_ladder() {
        let config = GapConfig::default();
        let rules = DiscrepancyRules::new(&config);
        assert!(rules.performance(&perf(500.0)).is_empty());
        assert_eq!(rules.performance(&perf(700.0))[0].severity, Severity::Medium);
        assert_eq!(rules.performance(&perf(800.0))[0].severity, Severity::High);
        assert_eq!(rules.performance(&perf(1200.0))[0].severity, Severity::Critical);
    }

    #[test]
    fn confidence_grows_with_sample_size() {
        let small = runtime_confidence(10, 0.0, 100);
        let large = runtime_confidence(10_000, 0.0, 100);
        assert!(small < large);
        assert!(runtime_confidence(1000, 0.5, 100) < runtime_confidence(1000, 0.0, 100));
        assert_eq!(runtime_confidence(0, 0.0, 100), 0.0);
    }

    #[test]
    fn reported_confidence_caps_runtime_confidence() {
        let mut baseline = perf(900.0);
        let measured = performance_confidence(&baseline, 100);
        baseline.statistical_confidence = Some(0.25);
        assert!((performance_confidence(&baseline, 100) - measured * 0.25).abs() < 1e-12);
        baseline.statistical_confidence = Some(f64::NAN);
        assert_eq!(performance_confidence(&baseline, 100), measured);
        assert_eq!(runtime_confidence(1000, f64::NAN, 100), runtime_confidence(1000, 1.0, 100));
    }

    #[test]
    fn undeclared_calls_resolved_by_id() {
        let config = GapConfig::default();
        let rules = DiscrepancyRules::new(&config);
        let declared = StaticAnalysisResults {
            dependency_graph: Some(
                DependencyGraph::new()
                    .with_component("api")
                    .with_component("db")
                    .with_dependency("api", "db"),
            ),
            ..StaticAnalysisResults::default()
        };
        let runtime = RuntimeAnalysisResults {
            observed_calls: vec![
                ObservedCall::new("api", "db", 50.0),
                ObservedCall::new("db", "api", 5.0),
            ],
            ..RuntimeAnalysisResults::default()
        };
        let findings = rules.architectural(&declared, &runtime);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Undeclared runtime dependencies");
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].evidence, vec!["db -> api (5 calls)".to_string()]);
    }

    #[test]
    fn ids_numbered_per_category() {
        let mk = |category| {
            pass_through(&ExternalFinding::new("scanner", category, Severity::Low, "x"))
        };
        let mut findings = vec![
            mk(FindingCategory::Security),
            mk(FindingCategory::Performance),
            mk(FindingCategory::Security),
        ];
        assign_finding_ids(&mut findings);
        assert_eq!(findings[0].finding_id, "GAP-SEC-001");
        assert_eq!(findings[1].finding_id, "GAP-PERF-001");
        assert_eq!(findings[2].finding_id, "GAP-SEC-002");
    }

    #[test]
    fn pass_through_fills_defaults() {
        let f = pass_through(&ExternalFinding::new(
            "sast",
            FindingCategory::Security,
            Severity::High,
            "Hardcoded secret",
        ));
        assert_eq!(f.confidence_score, DEFAULT_EXTERNAL_CONFIDENCE);
        assert_eq!(f.remediation_effort_days, 6.0);
        assert_eq!(f.description, "Hardcoded secret");
    }
}
