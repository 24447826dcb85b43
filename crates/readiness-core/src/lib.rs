//! Core types, errors, configuration, and tracing for the readiness engine.
//!
//! Shared by every analyzer in `readiness-analysis`: severity and category
//! enums with a total ordering, one error enum per subsystem, the layered
//! TOML configuration, and the tracing bootstrap.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
