//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CouplingConfig, DriftConfig, GapConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating the three analyzer sections.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`READINESS_*`)
/// 3. Project config (`readiness.toml` in the project root)
/// 4. User config (`~/.readiness/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReadinessConfig {
    pub coupling: CouplingConfig,
    pub gap: GapConfig,
    pub drift: DriftConfig,
}

/// Caller-supplied overrides, the highest-priority layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_cycle_length: Option<usize>,
    pub critical_blocker_threshold: Option<u32>,
    pub min_data_points: Option<usize>,
    pub organizational_readiness: Option<f64>,
}

/// Copy every `Some` field of `$other.$section` onto `$base.$section`.
macro_rules! merge_fields {
    ($base:expr, $other:expr, $section:ident, [$($field:ident),* $(,)?]) => {
        $(
            if $other.$section.$field.is_some() {
                $base.$section.$field = $other.$section.$field.clone();
            }
        )*
    };
}

impl ReadinessConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %err,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate every section, reporting the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.coupling.validate()?;
        self.gap.validate()?;
        self.drift.validate()?;
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config. Unknown keys are ignored.
    fn merge_toml_file(config: &mut ReadinessConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ReadinessConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    pub fn merge(base: &mut ReadinessConfig, other: &ReadinessConfig) {
        merge_fields!(base, other, coupling, [
            max_afferent,
            max_efferent,
            max_instability,
            max_call_frequency,
            risk_weights,
            complexity_weights,
            max_cycle_length,
            max_reported_cycles,
            circular_saturation,
            parallel_threshold,
        ]);
        merge_fields!(base, other, gap, [
            p95_threshold_ms,
            p99_threshold_ms,
            max_error_rate,
            min_throughput_rps,
            max_coupling_density,
            min_cloud_readiness,
            min_sample_size,
            severity_ratios,
            severity_points,
            complexity_weights,
            readiness_weights,
            critical_blocker_threshold,
            go_threshold,
            conditional_threshold,
            default_organizational_readiness,
        ]);
        merge_fields!(base, other, drift, [
            stable_range_pct,
            improvement_threshold_pct,
            degradation_thresholds,
            severity_anchors,
            volatile_variance,
            min_data_points,
            category_weights,
            max_change_pct,
        ]);
    }

    /// Apply environment variable overrides.
    /// Pattern: `READINESS_COUPLING_MAX_AFFERENT`, `READINESS_GAP_P95_THRESHOLD_MS`, etc.
    fn apply_env_overrides(config: &mut ReadinessConfig) {
        if let Some(v) = env_parse::<u32>("READINESS_COUPLING_MAX_AFFERENT") {
            config.coupling.max_afferent = Some(v);
        }
        if let Some(v) = env_parse::<u32>("READINESS_COUPLING_MAX_EFFERENT") {
            config.coupling.max_efferent = Some(v);
        }
        if let Some(v) = env_parse::<usize>("READINESS_COUPLING_MAX_CYCLE_LENGTH") {
            config.coupling.max_cycle_length = Some(v);
        }
        if let Some(v) = env_parse::<f64>("READINESS_GAP_P95_THRESHOLD_MS") {
            config.gap.p95_threshold_ms = Some(v);
        }
        if let Some(v) = env_parse::<f64>("READINESS_GAP_P99_THRESHOLD_MS") {
            config.gap.p99_threshold_ms = Some(v);
        }
        if let Some(v) = env_parse::<f64>("READINESS_GAP_MAX_ERROR_RATE") {
            config.gap.max_error_rate = Some(v);
        }
        if let Some(v) = env_parse::<u32>("READINESS_GAP_CRITICAL_BLOCKER_THRESHOLD") {
            config.gap.critical_blocker_threshold = Some(v);
        }
        if let Some(v) = env_parse::<usize>("READINESS_DRIFT_MIN_DATA_POINTS") {
            config.drift.min_data_points = Some(v);
        }
        if let Some(v) = env_parse::<f64>("READINESS_DRIFT_VOLATILE_VARIANCE") {
            config.drift.volatile_variance = Some(v);
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut ReadinessConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_cycle_length {
            config.coupling.max_cycle_length = Some(v);
        }
        if let Some(v) = overrides.critical_blocker_threshold {
            config.gap.critical_blocker_threshold = Some(v);
        }
        if let Some(v) = overrides.min_data_points {
            config.drift.min_data_points = Some(v);
        }
        if let Some(v) = overrides.organizational_readiness {
            config.gap.default_organizational_readiness = Some(v);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
