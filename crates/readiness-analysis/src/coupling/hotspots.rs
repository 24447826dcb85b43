//! Hotspot detection: threshold breaches per component plus one hotspot
//! per dependency cycle.

use readiness_core::config::CouplingConfig;
use readiness_core::types::Severity;

use super::metrics::BaseMetrics;
use super::types::{DependencyCycle, Hotspot, HotspotType};

/// Ratio over threshold above which a breach is HIGH.
pub const HIGH_RATIO: f64 = 1.5;
/// Ratio over threshold above which a breach is CRITICAL.
pub const CRITICAL_RATIO: f64 = 2.0;

/// Base remediation effort in days before the severity multiplier.
fn base_effort_days(hotspot_type: HotspotType, cycle_length: usize) -> f64 {
    match hotspot_type {
        HotspotType::HighAfferent => 3.0,
        HotspotType::HighEfferent => 3.0,
        HotspotType::HighInstability => 2.0,
        HotspotType::TemporalCoupling => 4.0,
        HotspotType::CircularDependency => 2.0 * cycle_length as f64,
    }
}

/// Severity of a cycle by length: short cycles are the easiest to break.
pub fn cycle_severity(length: usize) -> Severity {
    match length {
        0..=2 => Severity::Medium,
        3..=4 => Severity::High,
        _ => Severity::Critical,
    }
}

/// Thresholds resolved once per run.
#[derive(Debug, Clone, Copy)]
pub struct HotspotThresholds {
    pub max_afferent: f64,
    pub max_efferent: f64,
    pub max_instability: f64,
    pub max_call_frequency: f64,
}

impl From<&CouplingConfig> for HotspotThresholds {
    fn from(config: &CouplingConfig) -> Self {
        Self {
            max_afferent: f64::from(config.effective_max_afferent()),
            max_efferent: f64::from(config.effective_max_efferent()),
            max_instability: config.effective_max_instability(),
            max_call_frequency: config.effective_max_call_frequency(),
        }
    }
}

/// Threshold hotspots for one component, in [`HotspotType`] order.
pub fn component_hotspots(
    name: &str,
    metrics: &BaseMetrics,
    thresholds: &HotspotThresholds,
    temporal: bool,
) -> Vec<Hotspot> {
    let mut hotspots = Vec::new();

    let afferent = f64::from(metrics.afferent);
    if afferent > thresholds.max_afferent {
        hotspots.push(threshold_hotspot(
            HotspotType::HighAfferent,
            name,
            afferent,
            thresholds.max_afferent,
            format!(
                "{name} has {} dependents (threshold {})",
                metrics.afferent, thresholds.max_afferent
            ),
            "Changes to this component ripple into every dependent; it must migrate early or behind a stable facade".to_string(),
            vec![
                "Introduce a stable interface so dependents no longer bind to the implementation".to_string(),
                "Split responsibilities so each dependent only uses the part it needs".to_string(),
            ],
        ));
    }

    let efferent = f64::from(metrics.efferent);
    if efferent > thresholds.max_efferent {
        hotspots.push(threshold_hotspot(
            HotspotType::HighEfferent,
            name,
            efferent,
            thresholds.max_efferent,
            format!(
                "{name} depends on {} components (threshold {})",
                metrics.efferent, thresholds.max_efferent
            ),
            "The component cannot move until most of its dependencies have moved".to_string(),
            vec![
                "Extract orchestration logic into a dedicated coordinator".to_string(),
                "Replace direct calls with events or a shared contract".to_string(),
            ],
        ));
    }

    if metrics.instability > thresholds.max_instability {
        hotspots.push(threshold_hotspot(
            HotspotType::HighInstability,
            name,
            metrics.instability,
            thresholds.max_instability,
            format!(
                "{name} has instability {:.2} (threshold {:.2})",
                metrics.instability, thresholds.max_instability
            ),
            "Highly unstable components change whenever their dependencies change".to_string(),
            vec!["Depend on abstractions rather than concrete implementations".to_string()],
        ));
    }

    if temporal && metrics.temporal_frequency > thresholds.max_call_frequency {
        hotspots.push(threshold_hotspot(
            HotspotType::TemporalCoupling,
            name,
            metrics.temporal_frequency,
            thresholds.max_call_frequency,
            format!(
                "{name} handles {:.0} calls per window (threshold {:.0})",
                metrics.temporal_frequency, thresholds.max_call_frequency
            ),
            "Chatty runtime coupling turns into network latency once components are split".to_string(),
            vec![
                "Batch or cache high-frequency calls".to_string(),
                "Keep chatty collaborators in the same deployment unit".to_string(),
            ],
        ));
    }

    hotspots
}

/// One hotspot for a dependency cycle, covering every member.
pub fn cycle_hotspot(cycle: &DependencyCycle, max_cycle_length: usize) -> Hotspot {
    let length = cycle.len();
    let severity = cycle_severity(length);
    Hotspot {
        hotspot_type: HotspotType::CircularDependency,
        components: cycle.components.clone(),
        severity,
        description: format!("Circular dependency: {cycle}"),
        impact: "Components in a cycle can only be migrated together".to_string(),
        remediation_suggestions: vec![
            "Apply dependency inversion on the weakest edge of the cycle".to_string(),
            "Move shared types into a package both sides can depend on".to_string(),
        ],
        effort_estimate_days: base_effort_days(HotspotType::CircularDependency, length)
            * severity.effort_multiplier(),
        measured_value: length as f64,
        threshold: max_cycle_length as f64,
    }
}

fn threshold_hotspot(
    hotspot_type: HotspotType,
    name: &str,
    value: f64,
    threshold: f64,
    description: String,
    impact: String,
    remediation_suggestions: Vec<String>,
) -> Hotspot {
    let ratio = if threshold > 0.0 {
        value / threshold
    } else {
        f64::INFINITY
    };
    let severity = Severity::from_ratio(ratio, HIGH_RATIO, CRITICAL_RATIO);
    Hotspot {
        hotspot_type,
        components: vec![name.to_string()],
        severity,
        description,
        impact,
        remediation_suggestions,
        effort_estimate_days: base_effort_days(hotspot_type, 1) * severity.effort_multiplier(),
        measured_value: value,
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::types::ZoneClassification;

    fn metrics(afferent: u32, efferent: u32) -> BaseMetrics {
        let instability = if afferent + efferent == 0 {
            0.0
        } else {
            f64::from(efferent) / f64::from(afferent + efferent)
        };
        BaseMetrics {
            afferent,
            efferent,
            instability,
            abstractness: 0.0,
            distance: (instability - 1.0).abs(),
            zone: ZoneClassification::ZoneOfPain,
            temporal_frequency: 0.0,
        }
    }

    fn thresholds() -> HotspotThresholds {
        HotspotThresholds::from(&CouplingConfig::default())
    }

    #[test]
    fn afferent_breach_at_twice_threshold_plus_is_critical() {
        let hs = component_hotspots("core", &metrics(11, 0), &thresholds(), false);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].hotspot_type, HotspotType::HighAfferent);
        assert_eq!(hs[0].severity, Severity::Critical);
        assert_eq!(hs[0].effort_estimate_days, 6.0);
    }

    #[test]
    fn at_threshold_is_not_a_hotspot() {
        assert!(component_hotspots("ok", &metrics(5, 0), &thresholds(), false).is_empty());
    }

    #[test]
    fn unstable_leaf_flagged_on_instability_only() {
        let hs = component_hotspots("leaf", &metrics(0, 2), &thresholds(), false);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0].hotspot_type, HotspotType::HighInstability);
        assert_eq!(hs[0].severity, Severity::Medium);
    }

    #[test]
    fn cycle_severity_grows_with_length() {
        assert_eq!(cycle_severity(2), Severity::Medium);
        assert_eq!(cycle_severity(4), Severity::High);
        assert_eq!(cycle_severity(6), Severity::Critical);
    }

    #[test]
    fn cycle_hotspot_lists_members() {
        let cycle = DependencyCycle {
            components: vec!["a".into(), "b".into(), "c".into()],
        };
        let h = cycle_hotspot(&cycle, 6);
        assert_eq!(h.components.len(), 3);
        assert_eq!(h.description, "Circular dependency: a -> b -> c -> a");
        assert_eq!(h.effort_estimate_days, 9.0);
    }
}
