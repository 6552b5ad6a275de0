//! Seeded random word graphs.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index::sample};
use wordpath_core::{GraphModel, LayoutPosition, Node};

use crate::error::BenchSetupError;

/// Configuration for [`generate_graph`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of words.
    pub word_count: usize,
    /// Outgoing edges per word, to distinct other words.
    pub neighbours: usize,
    /// Layout coordinates are drawn from `-extent..extent` on both axes.
    pub layout_extent: f64,
    /// RNG seed.
    pub seed: u64,
}

/// Name of word `index` in a synthetic graph.
#[must_use]
pub fn synthetic_word(index: usize) -> String {
    format!("word{index:05}")
}

/// Builds a graph where every word links to `neighbours` random other words
/// with similarities in `0.05..0.95`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when the word count or neighbour
/// count is zero, and [`BenchSetupError::TooManyNeighbours`] when a word
/// cannot have that many distinct neighbours.
pub fn generate_graph(config: &SyntheticGraphConfig) -> Result<GraphModel, BenchSetupError> {
    if config.word_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "word_count",
        });
    }
    if config.neighbours == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "neighbours",
        });
    }
    let available = config.word_count - 1;
    if config.neighbours > available {
        return Err(BenchSetupError::TooManyNeighbours {
            neighbours: config.neighbours,
            available,
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let extent = config.layout_extent.abs();
    let mut builder = GraphModel::builder();
    for index in 0..config.word_count {
        let mut node = Node::new();
        if extent > 0.0 {
            node = node.with_layout(LayoutPosition::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            ));
        }
        for other in sample(&mut rng, available, config.neighbours) {
            let target = if other >= index { other + 1 } else { other };
            node = node.with_edge(&synthetic_word(target), rng.gen_range(0.05..0.95));
        }
        builder = builder.node(&synthetic_word(index), node);
    }
    Ok(builder.build())
}
