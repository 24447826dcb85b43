//! Shared data types: collections, severity ladder, finding and metric categories.

pub mod category;
pub mod collections;
pub mod severity;

pub use category::{FindingCategory, MetricCategory};
pub use collections::{BTreeMap, FxHashMap, FxHashSet};
pub use severity::Severity;
