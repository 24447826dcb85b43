//! Gap analyzer: reconciles every supplied input source into one
//! [`GapAnalysisResult`]. Missing sources narrow the findings and lower
//! confidence; they never fail the run.

use chrono::{DateTime, Utc};
use readiness_core::config::GapConfig;
use readiness_core::errors::ConfigError;
use uuid::Uuid;

use super::complexity::score_complexity;
use super::discrepancies::{assign_finding_ids, pass_through, DiscrepancyRules};
use super::inputs::GapInputs;
use super::readiness::assess;
use super::types::{DiscrepancyFinding, DiscrepancySummary, GapAnalysisResult, ValidationStatus};

/// Confidence floor when no source is present; full coverage adds the rest.
const BASE_CONFIDENCE: f64 = 0.4;
const INPUT_SOURCES: f64 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct GapAnalyzer {
    config: GapConfig,
}

impl GapAnalyzer {
    pub fn new(config: GapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GapConfig {
        &self.config
    }

    /// Analyze with a fresh id and the current time.
    pub fn analyze(&self, inputs: &GapInputs, application_name: &str) -> GapAnalysisResult {
        self.analyze_at(inputs, application_name, Uuid::new_v4().to_string(), Utc::now())
    }

    /// Analyze with a caller-supplied id and timestamp.
    pub fn analyze_at(
        &self,
        inputs: &GapInputs,
        application_name: &str,
        analysis_id: String,
        created_at: DateTime<Utc>,
    ) -> GapAnalysisResult {
        let findings = self.identify_discrepancies(inputs);
        let complexity = score_complexity(
            &findings,
            inputs.coupling_result.as_ref(),
            inputs.cloud_readiness.as_ref(),
            &self.config.effective_severity_points(),
            &self.config.effective_complexity_weights(),
        );

        let organizational = inputs
            .organizational_readiness
            .filter(|v| v.is_finite())
            .unwrap_or_else(|| self.config.effective_default_organizational_readiness());
        let confidence = confidence_level(&findings, inputs.sources_present());
        let readiness = assess(&findings, &complexity, organizational, confidence, &self.config);

        let (validation_status, validation_warnings) = self.validate_inputs(inputs);
        for warning in &validation_warnings {
            tracing::warn!(application = application_name, warning = %warning, "gap analysis input degraded");
        }

        let result = GapAnalysisResult {
            analysis_id,
            application_name: application_name.to_string(),
            created_at,
            discrepancy_summary: DiscrepancySummary::from_findings(&findings),
            discrepancies: findings,
            complexity_score: complexity,
            readiness_assessment: readiness,
            validation_status,
            validation_warnings,
        };

        tracing::info!(
            application = application_name,
            findings = result.discrepancy_summary.total,
            critical = result.critical_count(),
            complexity = result.complexity_score.overall_score,
            readiness = result.readiness_assessment.readiness_score,
            decision = %result.readiness_assessment.go_no_go_recommendation,
            "gap analysis complete"
        );
        result
    }

    /// Every rule family over whichever sources are present, ids assigned.
    pub fn identify_discrepancies(&self, inputs: &GapInputs) -> Vec<DiscrepancyFinding> {
        let rules = DiscrepancyRules::new(&self.config);
        let mut findings = Vec::new();

        if let (Some(declared), Some(runtime)) = (&inputs.static_results, &inputs.runtime_results) {
            findings.extend(rules.architectural(declared, runtime));
        }
        if let Some(perf) = inputs
            .runtime_results
            .as_ref()
            .and_then(|r| r.usable_performance())
        {
            findings.extend(rules.performance(perf));
        }
        if let Some(coupling) = &inputs.coupling_result {
            findings.extend(rules.dependency(coupling));
        }
        if let Some(cloud) = &inputs.cloud_readiness {
            findings.extend(rules.technology(cloud));
            findings.extend(cloud.findings.iter().map(pass_through));
        }
        if let Some(declared) = &inputs.static_results {
            findings.extend(declared.findings.iter().map(pass_through));
        }

        assign_finding_ids(&mut findings);
        findings
    }

    fn validate_inputs(&self, inputs: &GapInputs) -> (ValidationStatus, Vec<String>) {
        let mut warnings = Vec::new();
        if inputs.static_results.is_none() {
            warnings.push(
                "static_results not supplied: architectural topology checks and static findings skipped"
                    .to_string(),
            );
        }
        match &inputs.runtime_results {
            None => warnings.push(
                "runtime_results not supplied: performance and topology checks skipped".to_string(),
            ),
            Some(runtime) => match &runtime.performance {
                None => warnings.push(
                    "runtime performance baseline missing: performance checks skipped".to_string(),
                ),
                Some(perf) if !perf.is_finite() => warnings.push(
                    "runtime performance baseline has non-finite values: performance checks skipped"
                        .to_string(),
                ),
                Some(perf) if perf.sample_size < self.config.effective_min_sample_size() => {
                    warnings.push(format!(
                        "runtime sample size {} below minimum {}: runtime confidence reduced",
                        perf.sample_size,
                        self.config.effective_min_sample_size()
                    ))
                }
                Some(_) => {}
            },
        }
        if inputs.coupling_result.is_none() {
            warnings.push(
                "coupling_result not supplied: dependency findings skipped and coupling complexity derived from findings only"
                    .to_string(),
            );
        }
        if inputs.cloud_readiness.is_none() {
            warnings.push(
                "cloud_readiness_result not supplied: technology findings limited to upstream pass-through"
                    .to_string(),
            );
        }
        if inputs.organizational_readiness.is_none() {
            warnings.push(format!(
                "organizational_readiness not supplied: using neutral default {}",
                self.config.effective_default_organizational_readiness()
            ));
        }

        let status = match inputs.sources_present() {
            4 => ValidationStatus::Complete,
            0 => ValidationStatus::Insufficient,
            _ => ValidationStatus::Partial,
        };
        (status, warnings)
    }
}

/// Input coverage scaled by the mean confidence of the findings produced.
pub fn confidence_level(findings: &[DiscrepancyFinding], sources_present: usize) -> f64 {
    let coverage = (sources_present as f64 / INPUT_SOURCES).min(1.0);
    let base = BASE_CONFIDENCE + (1.0 - BASE_CONFIDENCE) * coverage;
    let finding_confidence = if findings.is_empty() {
        1.0
    } else {
        findings.iter().map(|f| f.confidence_score).sum::<f64>() / findings.len() as f64
    };
    (base * finding_confidence).clamp(0.0, 1.0)
}
