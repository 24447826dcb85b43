//! Coupling analyzer: validated graph in, [`CouplingMetricsResult`] out.

use readiness_core::config::CouplingConfig;
use readiness_core::errors::{ConfigError, GraphError};
use readiness_core::types::BTreeMap;

use super::cycles::find_cycles;
use super::graph::ValidatedGraph;
use super::hotspots::{component_hotspots, cycle_hotspot, HotspotThresholds};
use super::metrics::{compute_base_metrics, BaseMetrics, RiskModel};
use super::packages::{compute_package_metrics, derive_package};
use super::types::{ComponentCoupling, CouplingMetricsResult, DependencyGraph};

/// Computes coupling metrics for one application's dependency graph.
#[derive(Debug, Clone, Default)]
pub struct CouplingAnalyzer {
    config: CouplingConfig,
}

impl CouplingAnalyzer {
    /// Creates an analyzer after validating `config`.
    pub fn new(config: CouplingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }

    /// Analyze `graph`. Structural errors are reported before any metric is
    /// computed; an empty graph yields an empty result.
    pub fn analyze(
        &self,
        graph: &DependencyGraph,
        application_name: &str,
    ) -> Result<CouplingMetricsResult, GraphError> {
        let validated = ValidatedGraph::build(graph)?;
        if validated.is_empty() {
            tracing::debug!(application = application_name, "empty dependency graph");
            return Ok(CouplingMetricsResult::empty(application_name));
        }

        let base = compute_base_metrics(&validated, self.config.effective_parallel_threshold());
        let search = find_cycles(
            &validated,
            self.config.effective_max_cycle_length(),
            self.config.effective_max_reported_cycles(),
        );
        let cycle_members = search.members();
        let cycles = search.named(&validated);
        let temporal = validated.has_temporal_data();

        let risk = RiskModel::new(&self.config, self.config.effective_risk_weights(), temporal);
        let thresholds = HotspotThresholds::from(&self.config);

        let mut hotspots = Vec::new();
        let mut components = BTreeMap::new();
        let mut packages = Vec::with_capacity(validated.len());
        let mut self_dependencies = Vec::new();

        for (i, m) in base.iter().enumerate() {
            let node = validated.node(i);
            let in_cycle = cycle_members.contains(&i);
            let found = component_hotspots(&node.name, m, &thresholds, temporal);
            let package = derive_package(&node.name, node.package.as_deref());
            if validated.has_self_loop(i) {
                self_dependencies.push(node.name.clone());
            }

            components.insert(
                node.name.clone(),
                ComponentCoupling {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    kind: node.kind,
                    package: package.clone(),
                    afferent_coupling: m.afferent,
                    efferent_coupling: m.efferent,
                    dependents: names(&validated, validated.predecessors(i)),
                    dependencies: names(&validated, validated.successors(i)),
                    instability: m.instability,
                    abstractness: m.abstractness,
                    distance_from_main_sequence: m.distance,
                    zone: m.zone,
                    temporal_frequency: m.temporal_frequency,
                    in_cycle,
                    has_self_dependency: validated.has_self_loop(i),
                    risk_score: risk.risk_score(m, in_cycle),
                    is_hotspot: in_cycle || !found.is_empty(),
                },
            );
            packages.push(package);
            hotspots.extend(found);
        }

        let max_cycle_length = self.config.effective_max_cycle_length();
        hotspots.extend(cycles.iter().map(|c| cycle_hotspot(c, max_cycle_length)));

        let migration_complexity_score = self.complexity_contribution(&risk, &base, cycles.len());

        let result = CouplingMetricsResult {
            application_name: application_name.to_string(),
            package_metrics: compute_package_metrics(&validated, &packages, &base),
            component_coupling: components,
            coupling_density: validated.density(),
            cycles_truncated: search.truncated,
            circular_dependencies: cycles,
            self_dependencies,
            coupling_hotspots: hotspots,
            migration_complexity_score,
            component_count: validated.len(),
            dependency_count: validated.edges().len(),
        };

        tracing::info!(
            application = application_name,
            components = result.component_count,
            dependencies = result.dependency_count,
            cycles = result.circular_dependencies.len(),
            hotspots = result.coupling_hotspots.len(),
            density = result.coupling_density,
            complexity = result.migration_complexity_score,
            "coupling analysis complete"
        );
        Ok(result)
    }

    /// 0-100: weighted means of the normalized per-component terms plus a
    /// saturating cycle-count term.
    fn complexity_contribution(&self, risk: &RiskModel, base: &[BaseMetrics], cycle_count: usize) -> f64 {
        let w = self.config.effective_complexity_weights();
        let n = base.len() as f64;
        if base.is_empty() {
            return 0.0;
        }
        let mean = |f: &dyn Fn(&BaseMetrics) -> f64| base.iter().map(f).sum::<f64>() / n;

        let saturation = f64::from(self.config.effective_circular_saturation().max(1));
        let circular = (cycle_count as f64 / saturation).min(1.0);

        let score = w.afferent * mean(&|m| risk.normalized_afferent(m))
            + w.efferent * mean(&|m| risk.normalized_efferent(m))
            + w.instability * mean(&|m| m.instability)
            + w.distance * mean(&|m| m.distance)
            + w.temporal * mean(&|m| risk.normalized_temporal(m))
            + w.circular * circular;
        (score * 100.0).clamp(0.0, 100.0)
    }
}

fn names(graph: &ValidatedGraph<'_>, indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| graph.name(i).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let config = CouplingConfig {
            max_cycle_length: Some(1),
            ..CouplingConfig::default()
        };
        assert!(CouplingAnalyzer::new(config).is_err());
    }

    #[test]
    fn empty_graph_yields_empty_result() {
        let result = CouplingAnalyzer::default()
            .analyze(&DependencyGraph::new(), "empty")
            .unwrap();
        assert_eq!(result.component_count, 0);
        assert_eq!(result.coupling_density, 0.0);
        assert_eq!(result.migration_complexity_score, 0.0);
    }

    #[test]
    fn isolated_components_contribute_only_distance() {
        let graph = DependencyGraph::new().with_component("a").with_component("b");
        let result = CouplingAnalyzer::default().analyze(&graph, "app").unwrap();
        // I = 0, A = 0 so D = 1 for both; only the distance term is non-zero.
        assert!((result.migration_complexity_score - 15.0).abs() < 1e-9);
    }
}
