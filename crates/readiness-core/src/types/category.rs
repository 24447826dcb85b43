//! Closed category enums for discrepancy findings and drift metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a discrepancy finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCategory {
    Architectural,
    Performance,
    Dependency,
    Technology,
    Security,
    Compliance,
    DataAccess,
}

impl FindingCategory {
    pub const ALL: &'static [FindingCategory] = &[
        Self::Architectural,
        Self::Performance,
        Self::Dependency,
        Self::Technology,
        Self::Security,
        Self::Compliance,
        Self::DataAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Architectural => "ARCHITECTURAL",
            Self::Performance => "PERFORMANCE",
            Self::Dependency => "DEPENDENCY",
            Self::Technology => "TECHNOLOGY",
            Self::Security => "SECURITY",
            Self::Compliance => "COMPLIANCE",
            Self::DataAccess => "DATA_ACCESS",
        }
    }

    /// Short prefix used in finding identifiers.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Architectural => "ARCH",
            Self::Performance => "PERF",
            Self::Dependency => "DEP",
            Self::Technology => "TECH",
            Self::Security => "SEC",
            Self::Compliance => "COMP",
            Self::DataAccess => "DATA",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a tracked drift metric. Each category carries its own
/// degradation threshold and rollup weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Performance,
    Coupling,
    Complexity,
    Quality,
}

impl MetricCategory {
    pub const ALL: &'static [MetricCategory] = &[
        Self::Performance,
        Self::Coupling,
        Self::Complexity,
        Self::Quality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Coupling => "coupling",
            Self::Complexity => "complexity",
            Self::Quality => "quality",
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
