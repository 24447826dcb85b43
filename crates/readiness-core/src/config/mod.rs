//! Configuration system for the readiness engine.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod coupling_config;
pub mod drift_config;
pub mod gap_config;
pub mod readiness_config;
pub mod weights;

pub use coupling_config::CouplingConfig;
pub use drift_config::{CategoryThresholds, CategoryWeights, DriftConfig, SeverityAnchors};
pub use gap_config::{ComplexityWeights, GapConfig, ReadinessWeights, SeverityPoints, SeverityRatios};
pub use readiness_config::{ConfigOverrides, ReadinessConfig};
pub use weights::CouplingWeights;
