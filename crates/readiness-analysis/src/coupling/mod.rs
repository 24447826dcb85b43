//! Coupling metrics analyzer: Martin metrics, density, cycles, hotspots.
//!
//! Computes Ca (afferent), Ce (efferent), I (instability), A (abstractness),
//! D (distance from main sequence) per component, enumerates elementary
//! dependency cycles up to a length bound, flags hotspots, and rolls the
//! graph up into a 0-100 migration-complexity contribution.

pub mod analyzer;
pub mod cycles;
pub mod graph;
pub mod hotspots;
pub mod metrics;
pub mod packages;
pub mod types;
pub mod zones;

pub use analyzer::CouplingAnalyzer;
pub use graph::ValidatedGraph;
pub use types::*;
pub use zones::classify_zone;
