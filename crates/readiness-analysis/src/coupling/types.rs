//! Coupling analysis types: the dependency graph input, per-component
//! metrics, cycles, hotspots, and the full result.

use readiness_core::types::{BTreeMap, Severity};
use serde::{Deserialize, Serialize};

/// What a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Module,
    Class,
    Interface,
    Service,
    Database,
    External,
    #[default]
    Unknown,
}

/// A component in the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id, referenced by edges.
    pub id: String,
    /// Unique display name, used as the key in results.
    pub name: String,
    #[serde(default)]
    pub kind: ComponentKind,
    /// Explicit package. When absent, the package is derived from the name.
    #[serde(default)]
    pub package: Option<String>,
    /// Abstractness in [0, 1]. Defaults to 0 (fully concrete).
    #[serde(default)]
    pub abstractness: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ComponentKind::default(),
            package: None,
            abstractness: None,
        }
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_abstractness(mut self, abstractness: f64) -> Self {
        self.abstractness = Some(abstractness);
        self
    }
}

/// A directed dependency `from -> to`. Parallel edges are allowed and
/// each one counts toward Ca/Ce: an edge record stands for one declared
/// dependency (an import, a call site), so Ca/Ce count dependencies rather
/// than distinct neighbours. Self-loops count toward neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Observed calls over the sampling window, when runtime data exists.
    #[serde(default)]
    pub call_frequency: Option<f64>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: None,
            call_frequency: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_call_frequency(mut self, call_frequency: f64) -> Self {
        self.call_frequency = Some(call_frequency);
        self
    }
}

/// Directed dependency graph supplied by static analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, edge: Edge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Convenience for tests and callers building graphs by hand: adds a
    /// node whose id and name are the same string.
    pub fn with_component(mut self, name: &str) -> Self {
        self.nodes.push(Node::new(name, name));
        self
    }

    pub fn with_dependency(mut self, from: &str, to: &str) -> Self {
        self.edges.push(Edge::new(from, to));
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns a copy where edges without a call frequency take the summed
    /// frequency of matching `(from, to)` observations. Each observed pair
    /// lands on the first matching edge only, so parallel edges do not
    /// multiply it. Existing values win.
    pub fn with_call_frequencies<'a, I>(&self, observations: I) -> DependencyGraph
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut observed: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for (from, to, freq) in observations {
            if freq.is_finite() && freq >= 0.0 {
                *observed.entry((from, to)).or_default() += freq;
            }
        }
        let matched: Vec<Option<f64>> = self
            .edges
            .iter()
            .map(|e| observed.remove(&(e.from.as_str(), e.to.as_str())))
            .collect();
        let mut graph = self.clone();
        for (edge, freq) in graph.edges.iter_mut().zip(matched) {
            if edge.call_frequency.is_none() {
                edge.call_frequency = freq;
            }
        }
        graph
    }
}

/// Zone classification on the (I, A) plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneClassification {
    /// Low I, low A: concrete and heavily depended upon. Hard to change.
    ZoneOfPain,
    /// High I, high A: abstract but nobody uses it.
    ZoneOfUselessness,
    /// Near the main sequence line (A + I ≈ 1).
    MainSequence,
}

impl ZoneClassification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZoneOfPain => "zone_of_pain",
            Self::ZoneOfUselessness => "zone_of_uselessness",
            Self::MainSequence => "main_sequence",
        }
    }
}

impl std::fmt::Display for ZoneClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Martin metrics and risk for a single component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCoupling {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
    pub package: String,
    /// Ca: incoming dependency edges, self-loops excluded.
    pub afferent_coupling: u32,
    /// Ce: outgoing dependency edges, self-loops excluded.
    pub efferent_coupling: u32,
    /// Distinct components depending on this one, by name.
    pub dependents: Vec<String>,
    /// Distinct components this one depends on, by name.
    pub dependencies: Vec<String>,
    /// I = Ce / (Ca + Ce), 0 when isolated.
    pub instability: f64,
    pub abstractness: f64,
    /// D = |A + I - 1|.
    pub distance_from_main_sequence: f64,
    pub zone: ZoneClassification,
    /// Sum of call frequencies on incoming and outgoing edges.
    pub temporal_frequency: f64,
    pub in_cycle: bool,
    pub has_self_dependency: bool,
    /// Weighted risk in [0, 1].
    pub risk_score: f64,
    pub is_hotspot: bool,
}

/// Package-level rollup of component metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetrics {
    pub package: String,
    pub component_count: usize,
    /// Dependency edges with both ends inside the package.
    pub internal_dependencies: u32,
    /// Edges entering the package from other packages.
    pub afferent_coupling: u32,
    /// Edges leaving the package to other packages.
    pub efferent_coupling: u32,
    pub instability: f64,
    pub mean_abstractness: f64,
    pub mean_distance: f64,
    /// Internal edges over all edges touching the package, 0 when none.
    pub cohesion: f64,
}

/// An elementary dependency cycle, rotated so the lexicographically smallest
/// component name comes first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyCycle {
    pub components: Vec<String>,
}

impl DependencyCycle {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.iter().any(|c| c == name)
    }
}

impl std::fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.components.join(" -> "))?;
        if let Some(first) = self.components.first() {
            write!(f, " -> {first}")?;
        }
        Ok(())
    }
}

/// Why a component (or cycle) was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotType {
    HighAfferent,
    HighEfferent,
    HighInstability,
    TemporalCoupling,
    CircularDependency,
}

impl HotspotType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HighAfferent => "high_afferent",
            Self::HighEfferent => "high_efferent",
            Self::HighInstability => "high_instability",
            Self::TemporalCoupling => "temporal_coupling",
            Self::CircularDependency => "circular_dependency",
        }
    }
}

impl std::fmt::Display for HotspotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A coupling hotspot with remediation guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub hotspot_type: HotspotType,
    /// One component, or every member of a cycle.
    pub components: Vec<String>,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub remediation_suggestions: Vec<String>,
    pub effort_estimate_days: f64,
    /// The metric that crossed the threshold (cycle length for cycles).
    pub measured_value: f64,
    pub threshold: f64,
}

/// Full coupling analysis result for one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingMetricsResult {
    pub application_name: String,
    /// Keyed by component name.
    pub component_coupling: BTreeMap<String, ComponentCoupling>,
    pub package_metrics: BTreeMap<String, PackageMetrics>,
    /// Distinct ordered pairs over N(N-1), self-loops excluded.
    pub coupling_density: f64,
    pub circular_dependencies: Vec<DependencyCycle>,
    /// True when enumeration stopped at the reporting cap.
    pub cycles_truncated: bool,
    /// Components with an edge to themselves.
    pub self_dependencies: Vec<String>,
    pub coupling_hotspots: Vec<Hotspot>,
    /// 0-100 contribution to overall migration complexity.
    pub migration_complexity_score: f64,
    pub component_count: usize,
    /// Dependency edges excluding self-loops.
    pub dependency_count: usize,
}

impl CouplingMetricsResult {
    pub fn empty(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            ..Self::default()
        }
    }

    pub fn hotspot_count(&self) -> usize {
        self.coupling_hotspots.len()
    }

    pub fn average_instability(&self) -> f64 {
        mean(self.component_coupling.values().map(|c| c.instability))
    }

    pub fn average_distance(&self) -> f64 {
        mean(
            self.component_coupling
                .values()
                .map(|c| c.distance_from_main_sequence),
        )
    }

    pub fn hotspots_at_least(&self, severity: Severity) -> impl Iterator<Item = &Hotspot> {
        self.coupling_hotspots
            .iter()
            .filter(move |h| h.severity >= severity)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
