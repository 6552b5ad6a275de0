//! Single-pair shortest semantic paths.
//!
//! Runs Dijkstra from the start word with `1 - similarity` edge weights and
//! stops as soon as the end word is settled. The frontier is a binary heap
//! with lazy deletion; among candidates at equal distance the
//! lexicographically smallest word is settled first, so results are
//! reproducible across runs and platforms.

mod frontier;

use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, instrument};

use crate::{
    GraphModel, Result,
    error::EngineError,
    graph::normalize_word,
    path::{Path, checked_edge_cost},
};

use self::frontier::FrontierEntry;

/// Finds the optimal path between two words of a graph.
///
/// Returns `Ok(None)` when `end` cannot be reached from `start`.
///
/// # Errors
/// Returns [`EngineError::NodeNotFound`] when either word is absent, and
/// [`EngineError::NegativeEdgeCost`] or [`EngineError::NonFiniteSimilarity`]
/// when an edge examined by the search carries an unusable similarity.
///
/// # Examples
/// ```
/// use wordpath_core::{GraphModel, Node, find_shortest_path};
///
/// let graph = GraphModel::builder()
///     .node("a", Node::new().with_edge("b", 0.9))
///     .node("b", Node::new().with_edge("a", 0.9).with_edge("c", 0.4))
///     .node("c", Node::new().with_edge("b", 0.4))
///     .build();
/// let path = find_shortest_path(&graph, "a", "c")?.expect("c is reachable");
/// assert_eq!(path.words(), ["a", "b", "c"]);
/// assert!((path.cost() - 0.7).abs() < 1e-12);
/// # Ok::<(), wordpath_core::EngineError>(())
/// ```
pub fn find_shortest_path(graph: &GraphModel, start: &str, end: &str) -> Result<Option<Path>> {
    ShortestPathFinder::new(graph).find(start, end)
}

/// Shortest-path solver bound to a graph.
#[derive(Clone, Copy, Debug)]
pub struct ShortestPathFinder<'g> {
    graph: &'g GraphModel,
}

impl<'g> ShortestPathFinder<'g> {
    /// Binds a finder to `graph`.
    #[must_use]
    pub const fn new(graph: &'g GraphModel) -> Self {
        Self { graph }
    }

    /// Finds the optimal path from `start` to `end`.
    ///
    /// See [`find_shortest_path`].
    ///
    /// # Errors
    /// See [`find_shortest_path`].
    #[instrument(name = "path.find", skip(self), fields(nodes = self.graph.len()), err)]
    pub fn find(&self, start: &str, end: &str) -> Result<Option<Path>> {
        let from = self.resolve(start)?;
        let to = self.resolve(end)?;
        self.search(from, to)
    }

    /// Looks a word up, returning the graph-owned key.
    fn resolve(&self, word: &str) -> Result<&'g str> {
        let key = normalize_word(word);
        match self.graph.entry(&key) {
            Some((owned, _)) => Ok(owned),
            None => Err(EngineError::NodeNotFound { word: key }),
        }
    }

    /// Runs the search between two resolved keys.
    pub(crate) fn search(&self, start: &'g str, end: &'g str) -> Result<Option<Path>> {
        let mut state = SearchState::new(start);

        while let Some(FrontierEntry { distance, word }) = state.frontier.pop() {
            if !state.settled.insert(word) {
                continue;
            }
            if word == end {
                break;
            }
            let Some(node) = self.graph.node(word) else {
                continue;
            };
            for (declared, &similarity) in node.edges() {
                let Some((neighbour, _)) = self.graph.entry(declared) else {
                    continue;
                };
                let cost = checked_edge_cost(word, neighbour, similarity)?;
                if state.settled.contains(neighbour) {
                    continue;
                }
                state.relax(word, neighbour, distance + cost);
            }
        }

        debug!(
            settled = state.settled.len(),
            relaxations = state.relaxations,
            reached = state.distance.contains_key(end),
            "path search finished"
        );
        Ok(state.into_path(start, end))
    }
}

struct SearchState<'g> {
    distance: HashMap<&'g str, f64>,
    predecessor: HashMap<&'g str, &'g str>,
    settled: HashSet<&'g str>,
    frontier: BinaryHeap<FrontierEntry<'g>>,
    relaxations: usize,
}

impl<'g> SearchState<'g> {
    fn new(start: &'g str) -> Self {
        let mut distance = HashMap::new();
        distance.insert(start, 0.0);
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            distance: 0.0,
            word: start,
        });
        Self {
            distance,
            predecessor: HashMap::new(),
            settled: HashSet::new(),
            frontier,
            relaxations: 0,
        }
    }

    /// Records `candidate` for `neighbour` when it strictly improves on the
    /// best known distance.
    fn relax(&mut self, via: &'g str, neighbour: &'g str, candidate: f64) {
        let improves = self
            .distance
            .get(neighbour)
            .is_none_or(|&known| candidate < known);
        if !improves {
            return;
        }
        self.relaxations += 1;
        self.distance.insert(neighbour, candidate);
        self.predecessor.insert(neighbour, via);
        self.frontier.push(FrontierEntry {
            distance: candidate,
            word: neighbour,
        });
    }

    fn into_path(self, start: &'g str, end: &'g str) -> Option<Path> {
        let cost = *self.distance.get(end)?;
        let mut words = vec![end.to_owned()];
        let mut current = end;
        while current != start {
            current = *self.predecessor.get(current)?;
            words.push(current.to_owned());
        }
        words.reverse();
        Some(Path::new(words, cost))
    }
}

#[cfg(test)]
mod tests;
