//! End-to-end pipeline tests: Coupling → Gap → Drift over one request.

use readiness_analysis::coupling::{DependencyGraph, HotspotType};
use readiness_analysis::drift::{DriftPatternKind, DriftTrend};
use readiness_analysis::gap::*;
use readiness_analysis::pipeline::{PipelineRequest, ReadinessPipeline};
use readiness_core::config::ReadinessConfig;
use readiness_core::errors::{PipelineError, ReadinessErrorCode};

fn make_graph() -> DependencyGraph {
    DependencyGraph::new()
        .with_component("web.Controller")
        .with_component("orders.Service")
        .with_component("orders.Repository")
        .with_component("billing.Client")
        .with_dependency("web.Controller", "orders.Service")
        .with_dependency("orders.Service", "orders.Repository")
        .with_dependency("orders.Service", "billing.Client")
}

fn make_runtime(p95_ms: f64, p99_ms: f64) -> RuntimeAnalysisResults {
    RuntimeAnalysisResults {
        performance: Some(PerformanceBaseline {
            p50_ms: 80.0,
            p95_ms,
            p99_ms,
            error_rate: 0.002,
            throughput_rps: 800.0,
            sample_size: 50_000,
            sampling_window_secs: Some(86_400.0),
            statistical_confidence: None,
        }),
        observed_calls: vec![
            ObservedCall::new("web.Controller", "orders.Service", 2500.0),
            ObservedCall::new("orders.Service", "orders.Repository", 300.0),
            ObservedCall::new("orders.Service", "billing.Client", 120.0),
        ],
        observed_patterns: Vec::new(),
    }
}

fn make_request(p95_ms: f64, p99_ms: f64) -> PipelineRequest {
    let mut request = PipelineRequest::new("orders-service");
    request.static_results = Some(StaticAnalysisResults {
        dependency_graph: Some(make_graph()),
        ..StaticAnalysisResults::default()
    });
    request.runtime_results = Some(make_runtime(p95_ms, p99_ms));
    request.cloud_readiness = Some(CloudReadinessReport {
        readiness_score: 90.0,
        flagged_technologies: Vec::new(),
        findings: Vec::new(),
    });
    request.organizational_readiness = Some(70.0);
    request
}

#[test]
fn full_run_produces_every_artifact() {
    let pipeline = ReadinessPipeline::new(&ReadinessConfig::default()).unwrap();
    let report = pipeline.run(&make_request(300.0, 700.0)).unwrap();

    let coupling = report.coupling.as_ref().expect("graph was supplied");
    assert_eq!(coupling.component_count, 4);
    assert_eq!(coupling.dependency_count, 3);
    // observed calls feed temporal coupling on the edge that carries them
    assert_eq!(
        coupling.component_coupling["web.Controller"].temporal_frequency,
        2500.0
    );
    assert!(coupling
        .coupling_hotspots
        .iter()
        .any(|h| h.hotspot_type == HotspotType::TemporalCoupling));

    assert_eq!(report.gap.validation_status, ValidationStatus::Complete);
    assert!(report.gap.validation_warnings.is_empty());
    assert!(report.gap.findings_in(readiness_core::types::FindingCategory::Performance).next().is_none());

    assert_eq!(report.snapshot.analysis_id, report.gap.analysis_id);
    assert_eq!(report.snapshot.metric("performance.p95_ms"), Some(300.0));
    assert_eq!(report.snapshot.metric("coupling.total_dependencies"), Some(3.0));

    assert!(report.drift.baseline_comparisons.is_empty());
    assert_eq!(report.drift.current_analysis_id, report.gap.analysis_id);
    assert_eq!(report.drift.overall_health_score, 100.0);
}

#[test]
fn previous_snapshot_becomes_the_next_baseline() {
    let pipeline = ReadinessPipeline::default();
    let first = pipeline.run(&make_request(300.0, 700.0)).unwrap();

    let mut request = make_request(450.0, 980.0);
    request.baselines = vec![first.snapshot.clone()];
    let second = pipeline.run(&request).unwrap();

    let nearest = second.drift.nearest().expect("one baseline");
    assert_eq!(nearest.baseline_id, first.gap.analysis_id);
    let p95 = nearest.get("performance.p95_ms").unwrap();
    assert_eq!(p95.trend, DriftTrend::Degrading);
    assert!(second.drift.has_pattern(DriftPatternKind::PerformanceDegradation));
    assert!(second.drift.overall_health_score < 100.0);
}

#[test]
fn invalid_graph_fails_the_run() {
    let mut request = make_request(300.0, 700.0);
    request.dependency_graph = Some(
        DependencyGraph::new()
            .with_component("a")
            .with_dependency("a", "ghost"),
    );
    let err = ReadinessPipeline::default().run(&request).unwrap_err();
    assert!(matches!(err, PipelineError::Graph(_)));
    assert_eq!(err.error_code(), "GRAPH_VALIDATION_ERROR");
}

#[test]
fn explicit_graph_overrides_static_graph() {
    let mut request = make_request(300.0, 700.0);
    request.dependency_graph = Some(DependencyGraph::new().with_component("solo"));
    let report = ReadinessPipeline::default().run(&request).unwrap();
    assert_eq!(report.coupling.unwrap().component_count, 1);
}

#[test]
fn missing_graph_skips_coupling_but_not_gap() {
    let mut request = PipelineRequest::new("legacy-batch");
    request.runtime_results = Some(make_runtime(1200.0, 700.0));
    let report = ReadinessPipeline::default().run(&request).unwrap();

    assert!(report.coupling.is_none());
    assert_eq!(report.gap.validation_status, ValidationStatus::Partial);
    assert_eq!(
        report.gap.readiness_assessment.go_no_go_recommendation,
        GoNoGo::NoGo
    );
    assert!(report.snapshot.coupling.is_none());
}

#[test]
fn config_from_toml_changes_the_decision() {
    let config = ReadinessConfig::from_toml(
        r#"
[gap]
critical_blocker_threshold = 2
"#,
    )
    .unwrap();
    let pipeline = ReadinessPipeline::new(&config).unwrap();

    let mut request = PipelineRequest::new("legacy-batch");
    request.runtime_results = Some(make_runtime(1200.0, 700.0));
    let report = pipeline.run(&request).unwrap();

    assert_eq!(report.gap.critical_count(), 1);
    assert_ne!(
        report.gap.readiness_assessment.go_no_go_recommendation,
        GoNoGo::NoGo
    );
    assert!(report.gap.readiness_assessment.critical_blockers.is_empty());
}

#[test]
fn invalid_config_is_rejected_before_running() {
    assert!(ReadinessConfig::from_toml("[coupling]\nmax_cycle_length = 1\n").is_err());

    let mut config = ReadinessConfig::default();
    config.drift.min_data_points = Some(1);
    let err = ReadinessPipeline::new(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}
