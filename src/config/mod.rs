//! Configuration management for sdscout.
//!
//! Loads the YAML scan document into typed, validated settings.

mod settings;

pub use settings::{effective_concurrency, NetworkLabel, NetworkSpec, ScanConfig};
