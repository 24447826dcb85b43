//! Gap analyzer tests: discrepancy rules, complexity, readiness, go/no-go.

use chrono::{TimeZone, Utc};
use readiness_analysis::coupling::{CouplingAnalyzer, DependencyGraph};
use readiness_analysis::gap::*;
use readiness_core::config::GapConfig;
use readiness_core::types::{FindingCategory, Severity};

fn make_perf(p95_ms: f64) -> PerformanceBaseline {
    PerformanceBaseline {
        p50_ms: 120.0,
        p95_ms,
        p99_ms: 900.0,
        error_rate: 0.001,
        throughput_rps: 450.0,
        sample_size: 20_000,
        sampling_window_secs: Some(3600.0),
        statistical_confidence: None,
    }
}

fn make_runtime(p95_ms: f64) -> RuntimeAnalysisResults {
    RuntimeAnalysisResults {
        performance: Some(make_perf(p95_ms)),
        ..RuntimeAnalysisResults::default()
    }
}

fn make_cloud(score: f64) -> CloudReadinessReport {
    CloudReadinessReport {
        readiness_score: score,
        flagged_technologies: Vec::new(),
        findings: Vec::new(),
    }
}

fn analyze(inputs: &GapInputs) -> GapAnalysisResult {
    GapAnalyzer::default().analyze(inputs, "orders-service")
}

// P95 of 1200ms against 500ms is 2.4x: critical, and it blocks the migration.
#[test]
fn p95_far_over_threshold_is_a_critical_blocker() {
    let result = analyze(&GapInputs::new().with_runtime(make_runtime(1200.0)));

    assert_eq!(result.discrepancies.len(), 1);
    let finding = &result.discrepancies[0];
    assert_eq!(finding.finding_id, "GAP-PERF-001");
    assert_eq!(finding.category, FindingCategory::Performance);
    assert_eq!(finding.severity, Severity::Critical);
    assert_eq!(finding.remediation_effort_days, 10.0);
    assert!(finding.evidence.iter().any(|e| e.contains("1200")));

    let readiness = &result.readiness_assessment;
    assert_eq!(readiness.go_no_go_recommendation, GoNoGo::NoGo);
    assert_eq!(readiness.critical_blockers, vec!["P95 latency above threshold".to_string()]);
    assert_eq!(readiness.performance_readiness, 60.0);
    // perf dimension 40 at weight 0.2
    assert!((result.complexity_score.overall_score - 8.0).abs() < 1e-9);
    assert_eq!(result.complexity_score.complexity_level, ComplexityLevel::Low);
    // Low is 4 weeks; a non-GO decision plans one tier up (12 weeks).
    assert_eq!(readiness.estimated_timeline_months, 3);
    assert_eq!(result.critical_count(), 1);
}

#[test]
fn clean_inputs_are_a_go() {
    let inputs = GapInputs::new()
        .with_runtime(make_runtime(300.0))
        .with_cloud_readiness(make_cloud(100.0))
        .with_organizational_readiness(80.0);
    let result = analyze(&inputs);

    assert!(result.discrepancies.is_empty());
    let readiness = &result.readiness_assessment;
    assert_eq!(readiness.readiness_score, 100.0);
    assert_eq!(readiness.readiness_category, ReadinessCategory::Ready);
    assert_eq!(readiness.go_no_go_recommendation, GoNoGo::Go);
    assert_eq!(readiness.recommended_approach, MigrationApproach::BigBang);
    assert_eq!(readiness.estimated_timeline_months, 1);
    assert!(readiness.critical_blockers.is_empty());
    assert!(readiness.prerequisites.is_empty());
    // two of four sources: 0.4 + 0.6 * 0.5
    assert!((readiness.confidence_level - 0.7).abs() < 1e-9);
}

// One medium P95 finding: 100 - (3 * 0.4 + 15 * 0.1) = 97.3.
#[test]
fn medium_finding_still_a_go_with_reduced_score() {
    let result = analyze(&GapInputs::new().with_runtime(make_runtime(600.0)));
    assert_eq!(result.discrepancies[0].severity, Severity::Medium);
    let readiness = &result.readiness_assessment;
    assert!((readiness.readiness_score - 97.3).abs() < 1e-9);
    assert_eq!(readiness.go_no_go_recommendation, GoNoGo::Go);
    assert!(readiness.critical_blockers.is_empty());
}

#[test]
fn go_threshold_boundary() {
    let config = GapConfig::default();
    assert_eq!(readiness::decide(0, 82.0, &config), GoNoGo::Go);
    assert_eq!(readiness::decide(0, 70.0, &config), GoNoGo::Go);
    assert_eq!(readiness::decide(2, 82.0, &config), GoNoGo::NoGo);
}

#[test]
fn missing_inputs_warn_and_mark_partial() {
    let result = analyze(&GapInputs::new().with_runtime(make_runtime(300.0)));
    assert_eq!(result.validation_status, ValidationStatus::Partial);
    // static, coupling, cloud, organizational
    assert_eq!(result.validation_warnings.len(), 4);
    assert!(result
        .validation_warnings
        .iter()
        .any(|w| w.starts_with("coupling_result not supplied")));
    assert_eq!(result.readiness_assessment.organizational_readiness, 50.0);
}

#[test]
fn small_sample_is_warned_and_lowers_confidence() {
    let mut runtime = make_runtime(1200.0);
    if let Some(perf) = runtime.performance.as_mut() {
        perf.sample_size = 10;
    }
    let result = analyze(&GapInputs::new().with_runtime(runtime));
    assert!(result
        .validation_warnings
        .iter()
        .any(|w| w.contains("sample size 10 below minimum 100")));
    assert!(result.discrepancies[0].confidence_score < 0.1);
}

#[test]
fn reported_statistical_confidence_scales_finding_confidence() {
    let trusted = analyze(&GapInputs::new().with_runtime(make_runtime(1200.0)));

    let mut runtime = make_runtime(1200.0);
    if let Some(perf) = runtime.performance.as_mut() {
        perf.statistical_confidence = Some(0.5);
    }
    let doubtful = analyze(&GapInputs::new().with_runtime(runtime));

    let high = trusted.discrepancies[0].confidence_score;
    let low = doubtful.discrepancies[0].confidence_score;
    assert!((low - high * 0.5).abs() < 1e-12);
    assert!(
        doubtful.readiness_assessment.confidence_level
            < trusted.readiness_assessment.confidence_level
    );
}

#[test]
fn non_finite_performance_is_treated_as_missing() {
    let mut runtime = make_runtime(1200.0);
    if let Some(perf) = runtime.performance.as_mut() {
        perf.error_rate = f64::NAN;
    }
    let result = analyze(&GapInputs::new().with_runtime(runtime));

    assert!(result.discrepancies.is_empty());
    assert!(result
        .validation_warnings
        .iter()
        .any(|w| w.contains("non-finite values")));
    let confidence = result.readiness_assessment.confidence_level;
    assert!((0.0..=1.0).contains(&confidence));

    let json = readiness_analysis::reporting::export_gap(&result).unwrap();
    assert_eq!(readiness_analysis::reporting::import_gap(&json).unwrap(), result);
}

#[test]
fn undeclared_runtime_calls_are_architectural_findings() {
    let declared = StaticAnalysisResults {
        dependency_graph: Some(
            DependencyGraph::new()
                .with_component("web")
                .with_component("orders")
                .with_component("billing")
                .with_dependency("web", "orders"),
        ),
        ..StaticAnalysisResults::default()
    };
    let runtime = RuntimeAnalysisResults {
        performance: Some(make_perf(300.0)),
        observed_calls: vec![
            ObservedCall::new("web", "orders", 900.0),
            ObservedCall::new("orders", "billing", 40.0),
        ],
        ..RuntimeAnalysisResults::default()
    };
    let result = analyze(&GapInputs::new().with_static(declared).with_runtime(runtime));

    let arch: Vec<_> = result.findings_in(FindingCategory::Architectural).collect();
    assert_eq!(arch.len(), 1);
    assert_eq!(arch[0].finding_id, "GAP-ARCH-001");
    assert_eq!(arch[0].severity, Severity::High);
    assert_eq!(arch[0].evidence, vec!["orders -> billing (40 calls)".to_string()]);
}

#[test]
fn declared_pattern_missing_at_runtime() {
    let declared = StaticAnalysisResults {
        architectural_patterns: vec!["layered".to_string(), "event-driven".to_string()],
        ..StaticAnalysisResults::default()
    };
    let runtime = RuntimeAnalysisResults {
        observed_patterns: vec!["Layered".to_string()],
        ..RuntimeAnalysisResults::default()
    };
    let result = analyze(&GapInputs::new().with_static(declared).with_runtime(runtime));
    let finding = result
        .discrepancies
        .iter()
        .find(|f| f.title == "Architectural pattern mismatch")
        .expect("pattern mismatch finding");
    assert_eq!(finding.severity, Severity::Medium);
}

#[test]
fn critical_hotspot_is_capped_below_blocker() {
    let mut graph = DependencyGraph::new().with_component("core");
    for i in 0..12 {
        let name = format!("d{i:02}");
        graph = graph.with_component(&name).with_dependency(&name, "core");
    }
    let mut coupling = CouplingAnalyzer::default().analyze(&graph, "orders-service").unwrap();
    assert!(!coupling.coupling_hotspots.is_empty());
    for hotspot in &mut coupling.coupling_hotspots {
        hotspot.severity = Severity::Critical;
    }

    let result = analyze(&GapInputs::new().with_coupling(coupling));
    let severe = result
        .findings_in(FindingCategory::Dependency)
        .find(|f| f.title == "Severe coupling hotspots")
        .expect("hotspot finding");
    assert_eq!(severe.severity, Severity::High);
    assert_eq!(result.critical_count(), 0);
    assert!(result.readiness_assessment.critical_blockers.is_empty());
}

#[test]
fn cycles_become_a_dependency_finding() {
    let mut graph = DependencyGraph::new();
    for pair in [("a1", "a2"), ("b1", "b2"), ("c1", "c2")] {
        graph = graph
            .with_component(pair.0)
            .with_component(pair.1)
            .with_dependency(pair.0, pair.1)
            .with_dependency(pair.1, pair.0);
    }
    let coupling = CouplingAnalyzer::default().analyze(&graph, "orders-service").unwrap();
    assert_eq!(coupling.circular_dependencies.len(), 3);

    let result = analyze(&GapInputs::new().with_coupling(coupling));
    let dep: Vec<_> = result.findings_in(FindingCategory::Dependency).collect();
    assert_eq!(dep.len(), 1);
    assert_eq!(dep[0].finding_id, "GAP-DEP-001");
    assert_eq!(dep[0].severity, Severity::High);
    assert_eq!(dep[0].evidence.len(), 3);
    assert!(result.complexity_score.coupling >= 25.0);
    assert!(result
        .complexity_score
        .complexity_factors
        .iter()
        .any(|f| f == "3 circular dependencies"));
}

#[test]
fn flagged_technology_and_low_cloud_score() {
    let cloud = CloudReadinessReport {
        readiness_score: 40.0,
        flagged_technologies: vec![FlaggedTechnology {
            name: "Struts".to_string(),
            version: Some("1.3".to_string()),
            status: TechnologyStatus::EndOfLife,
            reason: String::new(),
            replacement: Some("Spring MVC".to_string()),
        }],
        findings: vec![ExternalFinding::new(
            "cloud-scanner",
            FindingCategory::Security,
            Severity::Low,
            "Plaintext secrets in config",
        )],
    };
    let result = analyze(&GapInputs::new().with_cloud_readiness(cloud));

    let ids: Vec<&str> = result
        .discrepancies
        .iter()
        .map(|f| f.finding_id.as_str())
        .collect();
    assert_eq!(ids, vec!["GAP-TECH-001", "GAP-TECH-002", "GAP-SEC-001"]);

    let tech = &result.discrepancies[0];
    assert_eq!(tech.title, "Struts 1.3 is end-of-life");
    assert_eq!(tech.severity, Severity::High);
    assert_eq!(tech.remediation_steps[0], "Replace Struts with Spring MVC");
    assert_eq!(result.discrepancies[1].severity, Severity::Medium);

    let upstream = &result.discrepancies[2];
    assert_eq!(upstream.source, "cloud-scanner");
    assert_eq!(upstream.confidence_score, 0.8);
    assert_eq!(upstream.remediation_effort_days, 2.0);

    // 25 + 15 + 5 from findings, plus 60 * 0.25 from the cloud gap
    assert_eq!(result.complexity_score.technology, 60.0);
}

#[test]
fn low_organizational_readiness_adds_training_prerequisite() {
    let result = analyze(
        &GapInputs::new()
            .with_runtime(make_runtime(1200.0))
            .with_organizational_readiness(20.0),
    );
    let prereqs = &result.readiness_assessment.prerequisites;
    assert_eq!(prereqs[0], "Resolve GAP-PERF-001: P95 latency above threshold");
    assert!(prereqs.last().is_some_and(|p| p.contains("training")));
}

#[test]
fn summary_counts_match_findings() {
    let mut runtime = make_runtime(1200.0);
    if let Some(perf) = runtime.performance.as_mut() {
        perf.error_rate = 0.05;
        perf.throughput_rps = 0.0;
    }
    let result = analyze(&GapInputs::new().with_runtime(runtime));
    let summary = &result.discrepancy_summary;
    assert_eq!(summary.total, 3);
    assert_eq!(summary.count(Severity::Critical), 3);
    assert_eq!(summary.by_category[&FindingCategory::Performance], 3);
    assert_eq!(summary.total_remediation_days, 30.0);
}

#[test]
fn analyze_at_is_reproducible() {
    let inputs = GapInputs::new().with_runtime(make_runtime(800.0));
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let analyzer = GapAnalyzer::default();
    let a = analyzer.analyze_at(&inputs, "svc", "run-1".to_string(), at);
    let b = analyzer.analyze_at(&inputs, "svc", "run-1".to_string(), at);
    assert_eq!(a, b);
    assert_eq!(a.analysis_id, "run-1");
}
