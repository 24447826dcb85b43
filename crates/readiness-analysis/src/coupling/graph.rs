//! Validation and indexing of the input dependency graph.
//!
//! Every structural problem is reported before any metric is computed.
//! Nodes are indexed in name order so every downstream iteration (metrics,
//! cycle enumeration, hotspots) is deterministic regardless of input order.

use readiness_core::errors::GraphError;
use readiness_core::types::{FxHashMap, FxHashSet};

use super::types::{DependencyGraph, Node};

/// A dependency edge between two distinct indexed nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedEdge {
    pub from: usize,
    pub to: usize,
    pub call_frequency: Option<f64>,
}

/// A validated, index-addressed view over a [`DependencyGraph`].
#[derive(Debug)]
pub struct ValidatedGraph<'g> {
    nodes: Vec<&'g Node>,
    edges: Vec<IndexedEdge>,
    self_loops: Vec<bool>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    has_temporal_data: bool,
}

impl<'g> ValidatedGraph<'g> {
    /// Validates `graph` and builds the index.
    pub fn build(graph: &'g DependencyGraph) -> Result<Self, GraphError> {
        let mut seen_ids: FxHashSet<&str> = FxHashSet::default();
        let mut seen_names: FxHashSet<&str> = FxHashSet::default();
        for node in &graph.nodes {
            if !seen_ids.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNodeId(node.id.clone()));
            }
            if !seen_names.insert(node.name.as_str()) {
                return Err(GraphError::DuplicateComponentName(node.name.clone()));
            }
            if let Some(a) = node.abstractness {
                if !a.is_finite() || !(0.0..=1.0).contains(&a) {
                    return Err(GraphError::InvalidAbstractness {
                        node: node.name.clone(),
                        value: a,
                    });
                }
            }
        }

        let mut nodes: Vec<&Node> = graph.nodes.iter().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        let index: FxHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let n = nodes.len();
        let mut edges = Vec::with_capacity(graph.edges.len());
        let mut self_loops = vec![false; n];
        let mut successors: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); n];
        let mut predecessors: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); n];
        let mut has_temporal_data = false;

        for (edge_index, edge) in graph.edges.iter().enumerate() {
            let resolve = |id: &str| {
                index.get(id).copied().ok_or_else(|| GraphError::UnknownNode {
                    edge_index,
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: id.to_string(),
                })
            };
            let from = resolve(&edge.from)?;
            let to = resolve(&edge.to)?;

            check_edge_value(edge_index, "weight", edge.weight)?;
            check_edge_value(edge_index, "call_frequency", edge.call_frequency)?;
            has_temporal_data |= edge.call_frequency.is_some();

            if from == to {
                self_loops[from] = true;
                continue;
            }
            successors[from].insert(to);
            predecessors[to].insert(from);
            edges.push(IndexedEdge {
                from,
                to,
                call_frequency: edge.call_frequency,
            });
        }

        Ok(Self {
            nodes,
            edges,
            self_loops,
            successors: successors.into_iter().map(sorted).collect(),
            predecessors: predecessors.into_iter().map(sorted).collect(),
            has_temporal_data,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &'g Node {
        self.nodes[index]
    }

    pub fn name(&self, index: usize) -> &'g str {
        self.nodes[index].name.as_str()
    }

    /// Dependency edges with self-loops removed. Parallel edges are kept.
    pub fn edges(&self) -> &[IndexedEdge] {
        &self.edges
    }

    /// Distinct successors of `index`, ascending.
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    /// Distinct predecessors of `index`, ascending.
    pub fn predecessors(&self, index: usize) -> &[usize] {
        &self.predecessors[index]
    }

    pub fn has_self_loop(&self, index: usize) -> bool {
        self.self_loops[index]
    }

    /// Whether any edge carries a call frequency.
    pub fn has_temporal_data(&self) -> bool {
        self.has_temporal_data
    }

    /// Number of distinct ordered pairs `(u, v)` with `u != v`.
    pub fn distinct_pair_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Distinct pairs over N(N-1). Zero for graphs with fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.len();
        if n <= 1 {
            return 0.0;
        }
        self.distinct_pair_count() as f64 / (n * (n - 1)) as f64
    }
}

fn check_edge_value(
    edge_index: usize,
    field: &'static str,
    value: Option<f64>,
) -> Result<(), GraphError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(GraphError::InvalidEdgeValue {
            edge_index,
            field,
            value: v,
        }),
        _ => Ok(()),
    }
}

fn sorted(set: FxHashSet<usize>) -> Vec<usize> {
    let mut v: Vec<usize> = set.into_iter().collect();
    v.sort_unstable();
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::types::Edge;

    #[test]
    fn indexes_nodes_by_name() {
        let graph = DependencyGraph::new()
            .with_component("zeta")
            .with_component("alpha")
            .with_dependency("zeta", "alpha");
        let v = ValidatedGraph::build(&graph).unwrap();
        assert_eq!(v.name(0), "alpha");
        assert_eq!(v.name(1), "zeta");
        assert_eq!(v.successors(1), &[0]);
        assert_eq!(v.predecessors(0), &[1]);
    }

    #[test]
    fn unknown_node_names_the_edge() {
        let graph = DependencyGraph::new()
            .with_component("a")
            .with_dependency("a", "ghost");
        let err = ValidatedGraph::build(&graph).unwrap_err();
        assert!(err.to_string().contains("Edge #0"));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn self_loops_are_flagged_not_counted() {
        let graph = DependencyGraph::new()
            .with_component("a")
            .with_component("b")
            .with_dependency("a", "a")
            .with_dependency("a", "b");
        let v = ValidatedGraph::build(&graph).unwrap();
        assert!(v.has_self_loop(0));
        assert_eq!(v.edges().len(), 1);
        assert_eq!(v.distinct_pair_count(), 1);
        assert!((v.density() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parallel_edges_collapse_in_density() {
        let graph = DependencyGraph::new()
            .with_component("a")
            .with_component("b")
            .with_dependency("a", "b")
            .with_dependency("a", "b");
        let v = ValidatedGraph::build(&graph).unwrap();
        assert_eq!(v.edges().len(), 2);
        assert_eq!(v.distinct_pair_count(), 1);
    }

    #[test]
    fn negative_call_frequency_rejected() {
        let mut graph = DependencyGraph::new().with_component("a").with_component("b");
        graph.add_edge(Edge::new("a", "b").with_call_frequency(-1.0));
        assert!(matches!(
            ValidatedGraph::build(&graph),
            Err(GraphError::InvalidEdgeValue {
                field: "call_frequency",
                ..
            })
        ));
    }

    #[test]
    fn abstractness_out_of_range_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_node(Node::new("a", "a").with_abstractness(1.5));
        assert!(matches!(
            ValidatedGraph::build(&graph),
            Err(GraphError::InvalidAbstractness { .. })
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_node(Node::new("1", "svc"));
        graph.add_node(Node::new("2", "svc"));
        assert!(matches!(
            ValidatedGraph::build(&graph),
            Err(GraphError::DuplicateComponentName(_))
        ));
    }

    #[test]
    fn single_node_density_is_zero() {
        let graph = DependencyGraph::new().with_component("solo");
        let v = ValidatedGraph::build(&graph).unwrap();
        assert_eq!(v.density(), 0.0);
    }
}
