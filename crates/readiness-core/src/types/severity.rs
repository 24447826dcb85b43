//! Severity ladder shared by hotspots and discrepancy findings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity. Ordered from least to most severe, so `max()` over a
/// collection yields the worst one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: &'static [Severity] = &[
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Classify how far a measured value sits above its threshold.
    ///
    /// `ratio` is `measured / threshold`. Ratios strictly above `critical_ratio`
    /// are critical, strictly above `high_ratio` are high, anything else that
    /// reached this call is medium.
    pub fn from_ratio(ratio: f64, high_ratio: f64, critical_ratio: f64) -> Self {
        if ratio > critical_ratio {
            Self::Critical
        } else if ratio > high_ratio {
            Self::High
        } else {
            Self::Medium
        }
    }

    /// Effort multiplier applied to base remediation estimates.
    pub fn effort_multiplier(&self) -> f64 {
        match self {
            Self::Critical => 2.0,
            Self::High => 1.5,
            Self::Medium => 1.0,
            Self::Low => 0.5,
            Self::Info => 0.25,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
