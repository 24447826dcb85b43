//! Coupling → Gap → Drift for one application.
//!
//! Stages run strictly in order because each consumes the previous stage's
//! complete output. Independent applications can run concurrently on
//! separate pipelines or share one (`ReadinessPipeline` is `Sync`).

use readiness_core::config::ReadinessConfig;
use readiness_core::errors::PipelineResult;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::coupling::{CouplingAnalyzer, CouplingMetricsResult, DependencyGraph};
use crate::drift::{AnalysisSnapshot, DriftAnalysis, DriftDetector};
use crate::gap::{
    CloudReadinessReport, GapAnalysisResult, GapAnalyzer, GapInputs, RuntimeAnalysisResults,
    StaticAnalysisResults,
};

/// Everything one pipeline run consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub application_name: String,
    /// Overrides the graph carried in `static_results`.
    #[serde(default)]
    pub dependency_graph: Option<DependencyGraph>,
    #[serde(default)]
    pub static_results: Option<StaticAnalysisResults>,
    #[serde(default)]
    pub runtime_results: Option<RuntimeAnalysisResults>,
    #[serde(default)]
    pub cloud_readiness: Option<CloudReadinessReport>,
    #[serde(default)]
    pub organizational_readiness: Option<f64>,
    /// Historical snapshots, most recent first.
    #[serde(default)]
    pub baselines: Vec<AnalysisSnapshot>,
}

impl PipelineRequest {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            ..Self::default()
        }
    }

    /// The graph to analyze: the explicit one, else the static one.
    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.dependency_graph.as_ref().or_else(|| {
            self.static_results
                .as_ref()
                .and_then(|s| s.dependency_graph.as_ref())
        })
    }
}

/// All artifacts of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub coupling: Option<CouplingMetricsResult>,
    pub gap: GapAnalysisResult,
    /// This run as a baseline for future drift detection.
    pub snapshot: AnalysisSnapshot,
    pub drift: DriftAnalysis,
}

#[derive(Debug, Clone, Default)]
pub struct ReadinessPipeline {
    coupling: CouplingAnalyzer,
    gap: GapAnalyzer,
    drift: DriftDetector,
}

impl ReadinessPipeline {
    /// Builds all three stages, validating each section of `config`.
    pub fn new(config: &ReadinessConfig) -> PipelineResult<Self> {
        Ok(Self {
            coupling: CouplingAnalyzer::new(config.coupling.clone())?,
            gap: GapAnalyzer::new(config.gap.clone())?,
            drift: DriftDetector::new(config.drift.clone())?,
        })
    }

    pub fn coupling(&self) -> &CouplingAnalyzer {
        &self.coupling
    }

    pub fn gap(&self) -> &GapAnalyzer {
        &self.gap
    }

    pub fn drift(&self) -> &DriftDetector {
        &self.drift
    }

    /// Run every stage. Only an invalid dependency graph fails the run;
    /// missing inputs narrow the gap analysis instead.
    #[instrument(skip(self, request), fields(application = %request.application_name))]
    pub fn run(&self, request: &PipelineRequest) -> PipelineResult<PipelineReport> {
        let app = request.application_name.as_str();

        let coupling = match request.graph() {
            Some(graph) => {
                let observed = request
                    .runtime_results
                    .iter()
                    .flat_map(|r| r.observed_calls.iter())
                    .map(|c| (c.from.as_str(), c.to.as_str(), c.call_frequency));
                let enriched = graph.with_call_frequencies(observed);
                Some(self.coupling.analyze(&enriched, app)?)
            }
            None => {
                tracing::debug!("no dependency graph supplied, skipping coupling analysis");
                None
            }
        };

        let inputs = GapInputs {
            static_results: request.static_results.clone(),
            runtime_results: request.runtime_results.clone(),
            coupling_result: coupling.clone(),
            cloud_readiness: request.cloud_readiness.clone(),
            organizational_readiness: request.organizational_readiness,
        };
        let gap = self.gap.analyze(&inputs, app);

        let performance = request
            .runtime_results
            .as_ref()
            .and_then(|r| r.usable_performance());
        let snapshot = AnalysisSnapshot::from_results(&gap, coupling.as_ref(), performance);
        let drift = self.drift.detect(&snapshot, app, &request.baselines);

        Ok(PipelineReport {
            coupling,
            gap,
            snapshot,
            drift,
        })
    }
}
