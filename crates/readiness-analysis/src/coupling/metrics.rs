//! Robert C. Martin coupling metrics and per-component risk.
//!
//! Ca and Ce are tallied in a single pass over the edge list; everything
//! else is computed per node from those tallies, so the per-node stage runs
//! on rayon for large graphs without touching shared state.

use rayon::prelude::*;
use readiness_core::config::{CouplingConfig, CouplingWeights};

use super::graph::ValidatedGraph;
use super::zones::classify_zone;
use super::types::ZoneClassification;

/// Multiple of a hotspot threshold at which a normalized term saturates at 1.
pub const NORMALIZATION_SATURATION: f64 = 2.0;

/// Martin metrics for one indexed node, before cycle membership is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseMetrics {
    pub afferent: u32,
    pub efferent: u32,
    pub instability: f64,
    pub abstractness: f64,
    pub distance: f64,
    pub zone: ZoneClassification,
    pub temporal_frequency: f64,
}

/// Normalizes raw counts against the configured hotspot thresholds.
#[derive(Debug, Clone, Copy)]
pub struct RiskModel {
    max_afferent: f64,
    max_efferent: f64,
    max_call_frequency: f64,
    weights: CouplingWeights,
    temporal: bool,
}

impl RiskModel {
    pub fn new(config: &CouplingConfig, weights: CouplingWeights, temporal: bool) -> Self {
        Self {
            max_afferent: f64::from(config.effective_max_afferent()),
            max_efferent: f64::from(config.effective_max_efferent()),
            max_call_frequency: config.effective_max_call_frequency(),
            weights,
            temporal,
        }
    }

    pub fn normalized_afferent(&self, m: &BaseMetrics) -> f64 {
        saturate(f64::from(m.afferent), self.max_afferent)
    }

    pub fn normalized_efferent(&self, m: &BaseMetrics) -> f64 {
        saturate(f64::from(m.efferent), self.max_efferent)
    }

    /// Zero when no edge in the graph carries a call frequency.
    pub fn normalized_temporal(&self, m: &BaseMetrics) -> f64 {
        if self.temporal {
            saturate(m.temporal_frequency, self.max_call_frequency)
        } else {
            0.0
        }
    }

    /// Weighted risk in [0, 1]; the circular weight is a flat addition for
    /// components inside a cycle.
    pub fn risk_score(&self, m: &BaseMetrics, in_cycle: bool) -> f64 {
        let w = &self.weights;
        let mut score = w.afferent * self.normalized_afferent(m)
            + w.efferent * self.normalized_efferent(m)
            + w.instability * m.instability
            + w.distance * m.distance
            + w.temporal * self.normalized_temporal(m);
        if in_cycle {
            score += w.circular;
        }
        score.clamp(0.0, 1.0)
    }

    pub fn weights(&self) -> &CouplingWeights {
        &self.weights
    }
}

/// Compute Martin metrics for every node, in index order.
pub fn compute_base_metrics(graph: &ValidatedGraph<'_>, parallel_threshold: usize) -> Vec<BaseMetrics> {
    let n = graph.len();
    let mut afferent = vec![0u32; n];
    let mut efferent = vec![0u32; n];
    let mut temporal = vec![0.0f64; n];

    for edge in graph.edges() {
        efferent[edge.from] += 1;
        afferent[edge.to] += 1;
        if let Some(freq) = edge.call_frequency {
            temporal[edge.from] += freq;
            temporal[edge.to] += freq;
        }
    }

    let node_metrics = |i: usize| {
        let ca = afferent[i];
        let ce = efferent[i];
        let instability = if ca + ce == 0 {
            0.0
        } else {
            f64::from(ce) / f64::from(ca + ce)
        };
        let abstractness = graph.node(i).abstractness.unwrap_or(0.0);
        BaseMetrics {
            afferent: ca,
            efferent: ce,
            instability,
            abstractness,
            distance: (abstractness + instability - 1.0).abs(),
            zone: classify_zone(instability, abstractness),
            temporal_frequency: temporal[i],
        }
    };

    if n >= parallel_threshold {
        tracing::debug!(nodes = n, "computing coupling metrics in parallel");
        (0..n).into_par_iter().map(node_metrics).collect()
    } else {
        (0..n).map(node_metrics).collect()
    }
}

fn saturate(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return if value > 0.0 { 1.0 } else { 0.0 };
    }
    (value / (threshold * NORMALIZATION_SATURATION)).clamp(0.0, 1.0)
}
