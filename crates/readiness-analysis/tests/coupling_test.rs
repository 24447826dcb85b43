//! Coupling analyzer tests: Martin metrics, density, cycles, hotspots, packages.

use readiness_analysis::coupling::*;
use readiness_core::config::CouplingConfig;
use readiness_core::errors::{GraphError, ReadinessErrorCode};
use readiness_core::types::Severity;

fn analyze(graph: &DependencyGraph) -> CouplingMetricsResult {
    CouplingAnalyzer::default()
        .analyze(graph, "test-app")
        .expect("graph should be valid")
}

/// Four components, ten incoming edges on `x`, nothing outgoing.
#[test]
fn heavily_depended_component_is_a_hotspot() {
    let mut graph = DependencyGraph::new()
        .with_component("x")
        .with_component("a")
        .with_component("b")
        .with_component("c");
    for (from, n) in [("a", 4), ("b", 3), ("c", 3)] {
        for _ in 0..n {
            graph = graph.with_dependency(from, "x");
        }
    }

    let result = analyze(&graph);
    let x = &result.component_coupling["x"];
    assert_eq!(x.afferent_coupling, 10);
    assert_eq!(x.efferent_coupling, 0);
    assert_eq!(x.instability, 0.0);
    assert!(x.is_hotspot);
    assert_eq!(x.dependents, vec!["a", "b", "c"]);

    let hotspot = result
        .coupling_hotspots
        .iter()
        .find(|h| h.hotspot_type == HotspotType::HighAfferent)
        .expect("afferent hotspot");
    assert_eq!(hotspot.components, vec!["x".to_string()]);
    assert_eq!(hotspot.severity, Severity::High);
    assert!(!hotspot.remediation_suggestions.is_empty());

    // three distinct pairs out of 4 * 3 possible
    assert!((result.coupling_density - 0.25).abs() < 1e-12);
    assert_eq!(result.dependency_count, 10);
}

#[test]
fn single_component_has_zero_density() {
    let result = analyze(&DependencyGraph::new().with_component("solo"));
    assert_eq!(result.coupling_density, 0.0);
    assert_eq!(result.component_count, 1);
    assert_eq!(result.component_coupling["solo"].instability, 0.0);
}

#[test]
fn empty_graph_is_not_an_error() {
    let result = analyze(&DependencyGraph::new());
    assert!(result.component_coupling.is_empty());
    assert_eq!(result.migration_complexity_score, 0.0);
    assert_eq!(result.application_name, "test-app");
}

#[test]
fn unknown_edge_target_is_rejected_with_edge_details() {
    let graph = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_dependency("a", "b")
        .with_dependency("b", "missing");
    let err = CouplingAnalyzer::default()
        .analyze(&graph, "app")
        .unwrap_err();
    match &err {
        GraphError::UnknownNode {
            edge_index,
            missing,
            ..
        } => {
            assert_eq!(*edge_index, 1);
            assert_eq!(missing, "missing");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), "GRAPH_VALIDATION_ERROR");
}

#[test]
fn cycle_members_are_hotspots_and_reported_once() {
    let graph = DependencyGraph::new()
        .with_component("orders")
        .with_component("billing")
        .with_component("users")
        .with_dependency("orders", "billing")
        .with_dependency("billing", "users")
        .with_dependency("users", "orders");
    let result = analyze(&graph);

    assert_eq!(result.circular_dependencies.len(), 1);
    assert_eq!(
        result.circular_dependencies[0].components,
        vec!["billing", "users", "orders"]
    );
    for name in ["orders", "billing", "users"] {
        let c = &result.component_coupling[name];
        assert!(c.in_cycle, "{name} should be in the cycle");
        assert!(c.is_hotspot);
    }
    let cycle_hotspots: Vec<_> = result
        .coupling_hotspots
        .iter()
        .filter(|h| h.hotspot_type == HotspotType::CircularDependency)
        .collect();
    assert_eq!(cycle_hotspots.len(), 1);
    assert_eq!(cycle_hotspots[0].severity, Severity::High);
}

// Ca = Ce = 1: 0.25*0.1 + 0.25*0.1 + 0.2*0.5 + 0.15*0.5, plus 0.05 for the cycle.
#[test]
fn cycle_adds_the_circular_weight_to_risk() {
    let looped = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_dependency("a", "b")
        .with_dependency("b", "a");
    let result = analyze(&looped);
    let a = &result.component_coupling["a"];
    assert!(a.in_cycle);
    assert!(
        (a.risk_score - 0.275).abs() < 1e-9,
        "risk was {}",
        a.risk_score
    );
    assert_eq!(result.circular_dependencies[0].len(), 2);
}

#[test]
fn self_loop_flagged_but_not_counted() {
    let graph = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_dependency("a", "a")
        .with_dependency("a", "b");
    let result = analyze(&graph);
    let a = &result.component_coupling["a"];
    assert!(a.has_self_dependency);
    assert_eq!(a.efferent_coupling, 1);
    assert_eq!(a.afferent_coupling, 0);
    assert_eq!(result.self_dependencies, vec!["a".to_string()]);
    assert!(result.circular_dependencies.is_empty());
}

#[test]
fn temporal_coupling_hotspot_needs_call_frequency() {
    let mut graph = DependencyGraph::new().with_component("api").with_component("cache");
    graph.add_edge(Edge::new("api", "cache").with_call_frequency(5000.0));
    let result = analyze(&graph);

    let temporal: Vec<_> = result
        .coupling_hotspots
        .iter()
        .filter(|h| h.hotspot_type == HotspotType::TemporalCoupling)
        .collect();
    assert_eq!(temporal.len(), 2);
    assert!(temporal.iter().all(|h| h.severity == Severity::Critical));
    assert_eq!(result.component_coupling["cache"].temporal_frequency, 5000.0);
}

#[test]
fn packages_roll_up_by_name_prefix() {
    let graph = DependencyGraph::new()
        .with_component("billing.Invoice")
        .with_component("billing.Ledger")
        .with_component("users.Account")
        .with_dependency("billing.Invoice", "billing.Ledger")
        .with_dependency("billing.Invoice", "users.Account");
    let result = analyze(&graph);

    let billing = &result.package_metrics["billing"];
    assert_eq!(billing.component_count, 2);
    assert_eq!(billing.internal_dependencies, 1);
    assert_eq!(billing.efferent_coupling, 1);
    assert_eq!(billing.afferent_coupling, 0);
    assert_eq!(billing.instability, 1.0);
    assert!((billing.cohesion - 0.5).abs() < 1e-12);

    let users = &result.package_metrics["users"];
    assert_eq!(users.afferent_coupling, 1);
    assert_eq!(users.instability, 0.0);
}

#[test]
fn explicit_package_and_abstractness_are_respected() {
    let mut graph = DependencyGraph::new();
    graph.add_node(
        Node::new("1", "PaymentGateway")
            .with_kind(ComponentKind::Interface)
            .with_package("payments")
            .with_abstractness(1.0),
    );
    graph.add_node(Node::new("2", "Checkout").with_package("payments"));
    graph.add_edge(Edge::new("2", "1"));
    let result = analyze(&graph);

    let gateway = &result.component_coupling["PaymentGateway"];
    assert_eq!(gateway.package, "payments");
    assert_eq!(gateway.kind, ComponentKind::Interface);
    assert_eq!(gateway.distance_from_main_sequence, 0.0);
    assert_eq!(gateway.zone, ZoneClassification::MainSequence);
    assert_eq!(result.package_metrics.len(), 1);
}

#[test]
fn results_do_not_depend_on_input_order() {
    let forward = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_component("c")
        .with_dependency("a", "b")
        .with_dependency("b", "c")
        .with_dependency("c", "a");
    let mut reversed = DependencyGraph::new();
    for node in forward.nodes.iter().rev() {
        reversed.add_node(node.clone());
    }
    for edge in forward.edges.iter().rev() {
        reversed.add_edge(edge.clone());
    }
    assert_eq!(analyze(&forward), analyze(&reversed));
}

#[test]
fn parallel_path_matches_sequential_path() {
    let mut graph = DependencyGraph::new();
    for i in 0..40 {
        graph = graph.with_component(&format!("svc{i:02}"));
    }
    for i in 0..40 {
        graph = graph
            .with_dependency(&format!("svc{i:02}"), &format!("svc{:02}", (i * 7 + 3) % 40))
            .with_dependency(&format!("svc{i:02}"), &format!("svc{:02}", (i + 1) % 40));
    }
    let sequential = CouplingAnalyzer::default().analyze(&graph, "app").unwrap();
    let parallel = CouplingAnalyzer::new(CouplingConfig {
        parallel_threshold: Some(1),
        ..CouplingConfig::default()
    })
    .unwrap()
    .analyze(&graph, "app")
    .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn complexity_contribution_saturates_with_cycles() {
    let mut graph = DependencyGraph::new();
    for i in 0..12 {
        graph = graph.with_component(&format!("n{i}"));
    }
    for i in (0..12).step_by(2) {
        graph = graph
            .with_dependency(&format!("n{i}"), &format!("n{}", i + 1))
            .with_dependency(&format!("n{}", i + 1), &format!("n{i}"));
    }
    let result = analyze(&graph);
    assert_eq!(result.circular_dependencies.len(), 6);
    assert!(result.migration_complexity_score > 0.0);
    assert!(result.migration_complexity_score <= 100.0);
}

#[test]
fn call_frequencies_merge_into_graph_without_mutating_it() {
    let graph = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_dependency("a", "b");
    let enriched = graph.with_call_frequencies([("a", "b", 10.0), ("a", "b", 5.0)]);
    assert_eq!(enriched.edges[0].call_frequency, Some(15.0));
    assert_eq!(graph.edges[0].call_frequency, None);
}

#[test]
fn observed_calls_land_on_one_parallel_edge() {
    let graph = DependencyGraph::new()
        .with_component("a")
        .with_component("b")
        .with_dependency("a", "b")
        .with_dependency("a", "b");
    let enriched = graph.with_call_frequencies([("a", "b", 600.0)]);
    assert_eq!(enriched.edges[0].call_frequency, Some(600.0));
    assert_eq!(enriched.edges[1].call_frequency, None);

    let result = analyze(&enriched);
    assert_eq!(result.component_coupling["a"].temporal_frequency, 600.0);
    assert_eq!(result.component_coupling["a"].efferent_coupling, 2);
    assert!(!result
        .coupling_hotspots
        .iter()
        .any(|h| h.hotspot_type == HotspotType::TemporalCoupling));
}
