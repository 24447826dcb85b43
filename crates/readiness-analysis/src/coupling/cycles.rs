//! Bounded enumeration of elementary dependency cycles.
//!
//! Tarjan's SCC algorithm (petgraph) narrows the search to strongly
//! connected components with more than one node. Within each SCC, a
//! depth-bounded DFS from every start node only visits nodes with a larger
//! index, so each elementary cycle is found exactly once and already starts
//! at its smallest member. Nodes are indexed in name order, which makes that
//! rotation the canonical one.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use readiness_core::types::FxHashSet;

use super::graph::ValidatedGraph;
use super::types::DependencyCycle;

/// Outcome of cycle enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleSearch {
    /// Cycles as node-index sequences, smallest index first.
    pub cycles: Vec<Vec<usize>>,
    /// Set when enumeration stopped at `max_reported`.
    pub truncated: bool,
}

impl CycleSearch {
    /// Nodes that participate in at least one reported cycle.
    pub fn members(&self) -> FxHashSet<usize> {
        self.cycles.iter().flatten().copied().collect()
    }

    pub fn named(&self, graph: &ValidatedGraph<'_>) -> Vec<DependencyCycle> {
        self.cycles
            .iter()
            .map(|cycle| DependencyCycle {
                components: cycle.iter().map(|&i| graph.name(i).to_string()).collect(),
            })
            .collect()
    }
}

/// Enumerate elementary cycles of length `2..=max_length`, stopping after
/// `max_reported` cycles. Output order is deterministic.
pub fn find_cycles(graph: &ValidatedGraph<'_>, max_length: usize, max_reported: usize) -> CycleSearch {
    let mut search = CycleSearch::default();
    if graph.len() < 2 || max_length < 2 || max_reported == 0 {
        return search;
    }

    let mut pg: DiGraph<usize, ()> = DiGraph::with_capacity(graph.len(), graph.distinct_pair_count());
    let indices: Vec<NodeIndex> = (0..graph.len()).map(|i| pg.add_node(i)).collect();
    for from in 0..graph.len() {
        for &to in graph.successors(from) {
            pg.add_edge(indices[from], indices[to], ());
        }
    }

    let mut components: Vec<Vec<usize>> = tarjan_scc(&pg)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut members: Vec<usize> = scc.into_iter().map(|ix| pg[ix]).collect();
            members.sort_unstable();
            members
        })
        .collect();
    components.sort();

    let mut in_scc = vec![usize::MAX; graph.len()];
    for (scc_id, members) in components.iter().enumerate() {
        for &m in members {
            in_scc[m] = scc_id;
        }
    }

    let mut walker = Walker {
        graph,
        in_scc: &in_scc,
        max_length,
        max_reported,
        path: Vec::with_capacity(max_length),
        on_path: vec![false; graph.len()],
        search: &mut search,
    };

    'outer: for members in &components {
        for &start in members {
            walker.path.clear();
            walker.path.push(start);
            walker.on_path[start] = true;
            let done = walker.extend(start);
            walker.on_path[start] = false;
            if done {
                break 'outer;
            }
        }
    }

    if search.truncated {
        tracing::warn!(
            reported = search.cycles.len(),
            "cycle enumeration stopped at the reporting cap"
        );
    }
    search
}

struct Walker<'a, 'g> {
    graph: &'a ValidatedGraph<'g>,
    in_scc: &'a [usize],
    max_length: usize,
    max_reported: usize,
    path: Vec<usize>,
    on_path: Vec<bool>,
    search: &'a mut CycleSearch,
}

impl Walker<'_, '_> {
    /// Returns true once the reporting cap is hit.
    fn extend(&mut self, start: usize) -> bool {
        let Some(&current) = self.path.last() else {
            return false;
        };
        let scc = self.in_scc[start];
        for &next in self.graph.successors(current) {
            if next == start && self.path.len() >= 2 {
                if self.search.cycles.len() >= self.max_reported {
                    self.search.truncated = true;
                    return true;
                }
                self.search.cycles.push(self.path.clone());
                continue;
            }
            if next <= start
                || self.on_path[next]
                || self.in_scc[next] != scc
                || self.path.len() >= self.max_length
            {
                continue;
            }
            self.path.push(next);
            self.on_path[next] = true;
            let done = self.extend(start);
            self.on_path[next] = false;
            self.path.pop();
            if done {
                return true;
            }
        }
        false
    }
}
