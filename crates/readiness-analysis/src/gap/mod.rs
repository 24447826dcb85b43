//! Gap and readiness analyzer.
//!
//! Reconciles static analysis, runtime observations, coupling metrics, and
//! the cloud-readiness assessment into discrepancy findings, a five-dimension
//! complexity score, a readiness assessment, and a go/no-go recommendation.

pub mod analyzer;
pub mod complexity;
pub mod discrepancies;
pub mod inputs;
pub mod readiness;
pub mod types;

pub use analyzer::GapAnalyzer;
pub use inputs::{
    CloudReadinessReport, ExternalFinding, FlaggedTechnology, GapInputs, ObservedCall,
    PerformanceBaseline, RuntimeAnalysisResults, StaticAnalysisResults, TechnologyStatus,
};
pub use types::*;
