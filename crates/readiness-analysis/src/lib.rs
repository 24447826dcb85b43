//! Migration readiness analysis engine.
//!
//! Three pure, synchronous analyzers that run as a pipeline per application:
//!
//! - [`coupling`]: Martin metrics, coupling density, bounded cycle enumeration,
//!   hotspots, and a migration-complexity contribution.
//! - [`gap`]: reconciles static, runtime, coupling, and cloud-readiness inputs
//!   into discrepancy findings, a five-dimension complexity score, a readiness
//!   assessment, and a go/no-go recommendation.
//! - [`drift`]: compares the current snapshot against historical baselines and
//!   classifies per-metric trends, patterns, and an overall health score.
//!
//! [`pipeline`] chains the three; [`reporting`] produces versioned exports.

pub mod coupling;
pub mod drift;
pub mod gap;
pub mod pipeline;
pub mod reporting;
