//! Versioned export tests: envelope header checks and artifact round trips.

use readiness_analysis::coupling::{CouplingAnalyzer, DependencyGraph};
use readiness_analysis::gap::{GapAnalyzer, GapInputs, PerformanceBaseline, RuntimeAnalysisResults};
use readiness_analysis::pipeline::{PipelineRequest, ReadinessPipeline};
use readiness_analysis::reporting::*;
use readiness_core::constants::SCHEMA_VERSION;
use readiness_core::errors::{ExportError, ReadinessErrorCode};

fn make_gap() -> readiness_analysis::gap::GapAnalysisResult {
    let runtime = RuntimeAnalysisResults {
        performance: Some(PerformanceBaseline {
            p50_ms: 90.0,
            p95_ms: 1200.0,
            p99_ms: 1800.0,
            error_rate: 0.02,
            throughput_rps: 75.0,
            sample_size: 5_000,
            sampling_window_secs: None,
            statistical_confidence: None,
        }),
        ..RuntimeAnalysisResults::default()
    };
    GapAnalyzer::default().analyze(&GapInputs::new().with_runtime(runtime), "orders-service")
}

#[test]
fn gap_result_survives_export_and_import() {
    let gap = make_gap();
    let json = export_gap(&gap).unwrap();
    assert!(json.contains(&format!("\"schema_version\": \"{SCHEMA_VERSION}\"")));
    assert!(json.contains("\"artifact_kind\": \"gap_analysis\""));
    assert!(json.contains("\"CRITICAL\""));

    let back = import_gap(&json).unwrap();
    assert_eq!(back, gap);
}

#[test]
fn import_rejects_a_different_artifact_kind() {
    let json = export_gap(&make_gap()).unwrap();
    let err = import_drift(&json).unwrap_err();
    match &err {
        ExportError::WrongArtifactKind { expected, found } => {
            assert_eq!(expected, "drift_analysis");
            assert_eq!(found, "gap_analysis");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), "SCHEMA_MISMATCH");
}

#[test]
fn import_rejects_a_newer_major_version() {
    let json = export_gap(&make_gap())
        .unwrap()
        .replacen(&format!("\"{SCHEMA_VERSION}\""), "\"2.0.0\"", 1);
    let err = import_gap(&json).unwrap_err();
    match err {
        ExportError::SchemaMismatch {
            found,
            expected_major,
        } => {
            assert_eq!(found, "2.0.0");
            assert_eq!(expected_major, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn minor_version_bump_is_accepted() {
    let gap = make_gap();
    let json = export_gap(&gap)
        .unwrap()
        .replacen(&format!("\"{SCHEMA_VERSION}\""), "\"1.4.0\"", 1);
    assert_eq!(import_gap(&json).unwrap(), gap);
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = import_coupling("{ not json").unwrap_err();
    assert!(matches!(err, ExportError::Serialization(_)));
    assert_eq!(err.error_code(), "EXPORT_ERROR");
}

#[test]
fn coupling_result_round_trips_through_a_file() {
    let graph = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_component("c")
        .with_dependency("a", "b")
        .with_dependency("b", "c")
        .with_dependency("c", "a");
    let result = CouplingAnalyzer::default().analyze(&graph, "app").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coupling.json");
    std::fs::write(&path, export_coupling(&result).unwrap()).unwrap();
    let back = import_coupling(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, result);
}

#[test]
fn pipeline_report_and_snapshot_round_trip() {
    let mut request = PipelineRequest::new("orders-service");
    request.dependency_graph = Some(
        DependencyGraph::new()
            .with_component("web")
            .with_component("orders")
            .with_dependency("web", "orders"),
    );
    let report = ReadinessPipeline::default().run(&request).unwrap();

    let back = import_report(&export_report(&report).unwrap()).unwrap();
    assert_eq!(back, report);

    let snapshot = import_snapshot(&export_snapshot(&report.snapshot).unwrap()).unwrap();
    assert_eq!(snapshot, report.snapshot);
}

#[test]
fn envelope_carries_kind_and_timestamp() {
    let json = export_drift(&ReadinessPipeline::default()
        .run(&PipelineRequest::new("svc"))
        .unwrap()
        .drift)
    .unwrap();
    let envelope: ArtifactEnvelope<serde_json::Value> =
        import(ArtifactKind::DriftAnalysis, &json).unwrap();
    assert_eq!(envelope.artifact_kind, ArtifactKind::DriftAnalysis);
    assert_eq!(envelope.schema_version, SCHEMA_VERSION);
    assert!(envelope.payload.get("overall_health_score").is_some());
}
