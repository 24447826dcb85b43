//! Shared constants for the readiness engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version stamped on every exported artifact.
/// Bump the major component on breaking field changes.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Tolerance used when checking that a weight group sums to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "READINESS_LOG";

/// Default tracing filter when `READINESS_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "readiness=info";

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "readiness.toml";

/// User-level configuration directory name (under `$HOME`).
pub const USER_CONFIG_DIR: &str = ".readiness";

// ---- Coupling defaults ----

pub const DEFAULT_MAX_AFFERENT: u32 = 5;
pub const DEFAULT_MAX_EFFERENT: u32 = 5;
pub const DEFAULT_MAX_INSTABILITY: f64 = 0.8;
pub const DEFAULT_MAX_CALL_FREQUENCY: f64 = 1000.0;
/// Elementary cycles longer than this are not enumerated.
pub const DEFAULT_MAX_CYCLE_LENGTH: usize = 6;
pub const DEFAULT_MAX_REPORTED_CYCLES: usize = 100;
/// Cycle count at which the circular factor of the complexity score saturates.
pub const DEFAULT_CIRCULAR_SATURATION: u32 = 5;
/// Node count from which per-component metrics are computed on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

// ---- Gap defaults ----

pub const DEFAULT_P95_THRESHOLD_MS: f64 = 500.0;
pub const DEFAULT_P99_THRESHOLD_MS: f64 = 1000.0;
pub const DEFAULT_MAX_ERROR_RATE: f64 = 0.01;
pub const DEFAULT_MIN_THROUGHPUT_RPS: f64 = 100.0;
pub const DEFAULT_MAX_COUPLING_DENSITY: f64 = 0.3;
pub const DEFAULT_MIN_CLOUD_READINESS: f64 = 50.0;
pub const DEFAULT_MIN_SAMPLE_SIZE: u64 = 100;
pub const DEFAULT_CRITICAL_BLOCKER_THRESHOLD: u32 = 1;
pub const DEFAULT_GO_THRESHOLD: f64 = 70.0;
pub const DEFAULT_CONDITIONAL_THRESHOLD: f64 = 50.0;
/// Neutral organizational readiness used when no external value is supplied.
pub const DEFAULT_ORGANIZATIONAL_READINESS: f64 = 50.0;

// ---- Drift defaults ----

pub const DEFAULT_STABLE_RANGE_PCT: f64 = 5.0;
pub const DEFAULT_IMPROVEMENT_THRESHOLD_PCT: f64 = 5.0;
pub const DEFAULT_VOLATILE_VARIANCE: f64 = 0.2;
pub const DEFAULT_MIN_DATA_POINTS: usize = 3;
pub const DEFAULT_MAX_CHANGE_PCT: f64 = 1000.0;
/// Health score reported when there is nothing to compare against.
pub const NEUTRAL_HEALTH_SCORE: f64 = 100.0;
