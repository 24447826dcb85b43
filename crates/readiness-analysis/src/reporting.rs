//! Versioned JSON export of analysis artifacts.
//!
//! Every artifact is wrapped in an envelope carrying the schema version and
//! artifact kind. Import checks both before touching the payload and
//! rejects any major version other than the current one.

use chrono::{DateTime, Utc};
use readiness_core::constants::SCHEMA_VERSION;
use readiness_core::errors::ExportError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::coupling::CouplingMetricsResult;
use crate::drift::{AnalysisSnapshot, DriftAnalysis};
use crate::gap::GapAnalysisResult;
use crate::pipeline::PipelineReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    CouplingMetrics,
    GapAnalysis,
    DriftAnalysis,
    AnalysisSnapshot,
    PipelineReport,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CouplingMetrics => "coupling_metrics",
            Self::GapAnalysis => "gap_analysis",
            Self::DriftAnalysis => "drift_analysis",
            Self::AnalysisSnapshot => "analysis_snapshot",
            Self::PipelineReport => "pipeline_report",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactEnvelope<T> {
    pub schema_version: String,
    pub artifact_kind: ArtifactKind,
    pub generated_at: DateTime<Utc>,
    pub payload: T,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    schema_version: String,
    artifact_kind: String,
}

/// Major component of a `MAJOR.MINOR.PATCH` version string.
pub fn major_version(version: &str) -> Option<u64> {
    version.split('.').next()?.trim().parse().ok()
}

/// Serialize `payload` inside a versioned envelope.
pub fn export<T: Serialize>(kind: ArtifactKind, payload: &T) -> Result<String, ExportError> {
    let envelope = ArtifactEnvelope {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact_kind: kind,
        generated_at: Utc::now(),
        payload,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse an envelope of the expected kind and compatible schema version.
pub fn import<T: DeserializeOwned>(
    kind: ArtifactKind,
    json: &str,
) -> Result<ArtifactEnvelope<T>, ExportError> {
    let header: EnvelopeHeader = serde_json::from_str(json)?;

    let expected_major = major_version(SCHEMA_VERSION).unwrap_or(1);
    if major_version(&header.schema_version) != Some(expected_major) {
        return Err(ExportError::SchemaMismatch {
            found: header.schema_version,
            expected_major,
        });
    }
    if header.artifact_kind != kind.as_str() {
        return Err(ExportError::WrongArtifactKind {
            expected: kind.as_str().to_string(),
            found: header.artifact_kind,
        });
    }

    Ok(serde_json::from_str(json)?)
}

pub fn export_coupling(result: &CouplingMetricsResult) -> Result<String, ExportError> {
    export(ArtifactKind::CouplingMetrics, result)
}

pub fn import_coupling(json: &str) -> Result<CouplingMetricsResult, ExportError> {
    Ok(import(ArtifactKind::CouplingMetrics, json)?.payload)
}

pub fn export_gap(result: &GapAnalysisResult) -> Result<String, ExportError> {
    export(ArtifactKind::GapAnalysis, result)
}

pub fn import_gap(json: &str) -> Result<GapAnalysisResult, ExportError> {
    Ok(import(ArtifactKind::GapAnalysis, json)?.payload)
}

pub fn export_drift(analysis: &DriftAnalysis) -> Result<String, ExportError> {
    export(ArtifactKind::DriftAnalysis, analysis)
}

pub fn import_drift(json: &str) -> Result<DriftAnalysis, ExportError> {
    Ok(import(ArtifactKind::DriftAnalysis, json)?.payload)
}

pub fn export_snapshot(snapshot: &AnalysisSnapshot) -> Result<String, ExportError> {
    export(ArtifactKind::AnalysisSnapshot, snapshot)
}

pub fn import_snapshot(json: &str) -> Result<AnalysisSnapshot, ExportError> {
    Ok(import(ArtifactKind::AnalysisSnapshot, json)?.payload)
}

pub fn export_report(report: &PipelineReport) -> Result<String, ExportError> {
    export(ArtifactKind::PipelineReport, report)
}

pub fn import_report(json: &str) -> Result<PipelineReport, ExportError> {
    Ok(import(ArtifactKind::PipelineReport, json)?.payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_version_parsing() {
        assert_eq!(major_version("1.0.0"), Some(1));
        assert_eq!(major_version("2"), Some(2));
        assert_eq!(major_version("x.1"), None);
    }
}
