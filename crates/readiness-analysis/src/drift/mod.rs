//! Drift detector.
//!
//! Compares the current analysis snapshot against historical baselines (most
//! recent first), classifies per-metric trend and severity, detects named
//! multi-metric patterns, and rolls the nearest comparison up into a health
//! score with alerts and recommendations.

pub mod classify;
pub mod detector;
pub mod health;
pub mod patterns;
pub mod snapshot;
pub mod types;

pub use classify::{change_percentage, Classifier, SeriesFit};
pub use detector::DriftDetector;
pub use snapshot::{
    AnalysisSnapshot, ComplexitySnapshot, CouplingSnapshot, PerformanceMetrics, QualitySnapshot,
    TrackedMetric,
};
pub use types::*;
