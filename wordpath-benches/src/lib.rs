//! Benchmark support crate for wordpath.
//!
//! Provides synthetic word graphs and parameter types used by the Criterion
//! benchmarks for path search and puzzle-pair generation.

pub mod error;
pub mod params;
pub mod synthetic;
