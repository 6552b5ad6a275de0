//! Benchmark parameter types.

use std::fmt;

/// Shape of a synthetic graph in a benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of words in the graph.
    pub word_count: usize,
    /// Outgoing edges per word.
    pub neighbours: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.word_count, self.neighbours)
    }
}
