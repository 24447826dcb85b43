//! Package-level rollup of component coupling.

use readiness_core::types::BTreeMap;

use super::graph::ValidatedGraph;
use super::metrics::BaseMetrics;
use super::types::PackageMetrics;

/// Package assigned to components whose name has no separator.
pub const ROOT_PACKAGE: &str = "<root>";

/// The explicit package if given, otherwise the name up to its last `::`,
/// `.` or `/` separator.
pub fn derive_package(name: &str, explicit: Option<&str>) -> String {
    if let Some(pkg) = explicit.filter(|p| !p.is_empty()) {
        return pkg.to_string();
    }
    let cut = [name.rfind("::"), name.rfind('.'), name.rfind('/')]
        .into_iter()
        .flatten()
        .max();
    match cut {
        Some(pos) if pos > 0 => name[..pos].to_string(),
        _ => ROOT_PACKAGE.to_string(),
    }
}

#[derive(Default)]
struct Tally {
    components: usize,
    internal: u32,
    afferent: u32,
    efferent: u32,
    abstractness: f64,
    distance: f64,
}

/// Aggregate per-package metrics. `packages[i]` is the package of node `i`.
pub fn compute_package_metrics(
    graph: &ValidatedGraph<'_>,
    packages: &[String],
    metrics: &[BaseMetrics],
) -> BTreeMap<String, PackageMetrics> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for (i, pkg) in packages.iter().enumerate() {
        let t = tallies.entry(pkg.as_str()).or_default();
        t.components += 1;
        t.abstractness += metrics[i].abstractness;
        t.distance += metrics[i].distance;
    }

    for edge in graph.edges() {
        let from = packages[edge.from].as_str();
        let to = packages[edge.to].as_str();
        if from == to {
            if let Some(t) = tallies.get_mut(from) {
                t.internal += 1;
            }
        } else {
            if let Some(t) = tallies.get_mut(from) {
                t.efferent += 1;
            }
            if let Some(t) = tallies.get_mut(to) {
                t.afferent += 1;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(pkg, t)| {
            let n = t.components as f64;
            let external = t.afferent + t.efferent;
            let touching = t.internal + external;
            let metrics = PackageMetrics {
                package: pkg.to_string(),
                component_count: t.components,
                internal_dependencies: t.internal,
                afferent_coupling: t.afferent,
                efferent_coupling: t.efferent,
                instability: if external == 0 {
                    0.0
                } else {
                    f64::from(t.efferent) / f64::from(external)
                },
                mean_abstractness: t.abstractness / n,
                mean_distance: t.distance / n,
                cohesion: if touching == 0 {
                    0.0
                } else {
                    f64::from(t.internal) / f64::from(touching)
                },
            };
            (pkg.to_string(), metrics)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_from_separators() {
        assert_eq!(derive_package("billing.invoice.Service", None), "billing.invoice");
        assert_eq!(derive_package("crate::auth::Token", None), "crate::auth");
        assert_eq!(derive_package("src/orders/api", None), "src/orders");
        assert_eq!(derive_package("Standalone", None), ROOT_PACKAGE);
    }

    #[test]
    fn explicit_package_wins() {
        assert_eq!(derive_package("a.b.C", Some("custom")), "custom");
        assert_eq!(derive_package("a.b.C", Some("")), "a.b");
    }

    #[test]
    fn leading_separator_goes_to_root() {
        assert_eq!(derive_package("/etc", None), ROOT_PACKAGE);
    }
}
