//! Benchmark setup error type.

use wordpath_core::EngineError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// More neighbours were requested than the graph has other words.
    #[error("{neighbours} neighbours requested but only {available} other words exist")]
    TooManyNeighbours {
        /// Requested neighbours per word.
        neighbours: usize,
        /// Words available as neighbours.
        available: usize,
    },
    /// The engine rejected benchmark input.
    #[error("engine operation failed: {0}")]
    Engine(#[from] EngineError),
}
