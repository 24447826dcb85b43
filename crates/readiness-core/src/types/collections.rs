//! Re-exports of the collection types used across the engine.
//!
//! `FxHashMap` for internal lookups, `BTreeMap` for anything that ends up
//! serialized so exported artifacts stay byte-stable.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use std::collections::BTreeMap;
