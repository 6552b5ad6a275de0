//! Semantic shortest paths over word-similarity graphs.
//!
//! A [`GraphModel`] maps normalised words to their weighted neighbours. The
//! [`ShortestPathFinder`] walks it with cost `1 - similarity`, and the
//! [`PuzzlePairGenerator`] samples word pairs whose optimal path makes a fair
//! puzzle under a set of [`PuzzleConstraints`].
//!
//! # Examples
//! ```
//! use wordpath_core::{find_shortest_path, load_graph_from_str};
//!
//! let graph = load_graph_from_str(
//!     r#"{"nodes": {
//!         "a": {"edges": {"b": 0.9}},
//!         "b": {"edges": {"a": 0.9, "c": 0.4}},
//!         "c": {"edges": {"b": 0.4}}
//!     }}"#,
//! )?;
//! let path = find_shortest_path(&graph, "a", "c")?.expect("c is reachable");
//! assert_eq!(path.words(), ["a", "b", "c"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod constraints;
mod error;
mod evaluate;
mod generate;
mod graph;
mod path;
mod search;
#[cfg(test)]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "ring fixtures wrap neighbour indices"
)]
mod test_utils;

pub use crate::{
    constraints::{
        DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_PATH_MOVES, DEFAULT_MIN_LAYOUT_DISTANCE_SQUARED,
        DEFAULT_MIN_NODE_DEGREE, DEFAULT_MIN_PATH_MOVES, PuzzleConstraints,
    },
    error::{EngineError, EngineErrorCode, GraphLoadError, GraphLoadErrorCode, Result},
    evaluate::{
        PairRejection, degree_ok, evaluate_path_checks, has_alternate_approach,
        layout_distance_ok, length_ok,
    },
    generate::{
        DEFAULT_BATCH_MAX_ROUNDS, DEFAULT_BATCH_WORKERS, PairBatch, PairBatchPlan, PuzzlePair,
        PuzzlePairGenerator, generate_pair_batch, generate_puzzle_pair,
    },
    graph::{
        GraphModel, GraphModelBuilder, LayoutPosition, Node, load_graph_from_reader,
        load_graph_from_str, normalize_word,
    },
    path::{Path, edge_cost},
    search::{ShortestPathFinder, find_shortest_path},
};
