//! Aggregates dependency-health findings from ecosystem-specific analysis
//! tools (Knip, composer-unused, FawltyDeps, the Maven dependency plugin)
//! into one normalized report.
//!
//! The engine detects which ecosystems a project uses by probing for
//! manifest files ([`detector`]), runs one checker per detected ecosystem
//! ([`checker`]), maps each tool's native output to the canonical
//! [`models::Finding`] schema, and enriches findings with declaration
//! positions deduced from the manifests by text heuristics ([`deducer`]).
//! The [`aggregator`] concatenates everything in fixed order; a non-empty
//! finding list is the failure signal of a run.

pub mod aggregator;
pub mod checker;
pub mod cli;
pub mod config;
pub mod deducer;
pub mod detector;
pub mod error;
pub mod models;
pub mod report;
