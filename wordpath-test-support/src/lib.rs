//! Shared test utilities used across wordpath crates.

pub mod profile;
pub mod tracing;
