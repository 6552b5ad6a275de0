//! Rejection sampling of fair puzzle pairs.
//!
//! [`PuzzlePairGenerator`] draws random distinct word pairs and accepts the
//! first one whose optimal path passes every acceptance predicate.
//! The degree check runs before the path search; the path is computed once per
//! candidate and reused by the remaining checks.

mod batch;
mod rng;

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    GraphModel, Path, PuzzleConstraints, Result,
    evaluate::{PairRejection, degree_ok, evaluate_path_checks},
    search::ShortestPathFinder,
};

pub use self::batch::{
    DEFAULT_BATCH_MAX_ROUNDS, DEFAULT_BATCH_WORKERS, PairBatch, PairBatchPlan, generate_pair_batch,
};

/// An accepted puzzle: two words and the optimal path between them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PuzzlePair {
    start: String,
    end: String,
    path: Path,
}

impl PuzzlePair {
    /// Start word.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Target word.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Optimal path from start to target.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Cost of the optimal path.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.path.cost()
    }

    /// Number of moves in the optimal path.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.path.moves()
    }
}

/// Words a batch has already committed to.
///
/// A word used as a start may still become a target and vice versa; the same
/// unordered pair is never accepted twice.
#[derive(Clone, Debug, Default)]
pub(crate) struct Exclusions {
    starts: HashSet<String>,
    ends: HashSet<String>,
    pairs: HashSet<(String, String)>,
}

impl Exclusions {
    fn pair_key(start: &str, end: &str) -> (String, String) {
        if start <= end {
            (start.to_owned(), end.to_owned())
        } else {
            (end.to_owned(), start.to_owned())
        }
    }

    pub(crate) fn admits(&self, start: &str, end: &str) -> bool {
        !self.starts.contains(start)
            && !self.ends.contains(end)
            && !self.pairs.contains(&Self::pair_key(start, end))
    }

    pub(crate) fn record(&mut self, pair: &PuzzlePair) {
        self.starts.insert(pair.start.clone());
        self.ends.insert(pair.end.clone());
        self.pairs.insert(Self::pair_key(&pair.start, &pair.end));
    }
}

/// Draws puzzle pairs from a graph under fixed constraints.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use wordpath_core::{GraphModel, Node, PuzzleConstraints, PuzzlePairGenerator};
///
/// let graph = GraphModel::builder()
///     .node("a", Node::new().with_edge("b", 0.9).with_edge("c", 0.5))
///     .node("b", Node::new().with_edge("a", 0.9).with_edge("c", 0.5))
///     .node("c", Node::new().with_edge("a", 0.5).with_edge("b", 0.5))
///     .build();
/// let constraints = PuzzleConstraints::new()
///     .with_path_moves(1, 2)
///     .with_min_node_degree(2);
/// let generator = PuzzlePairGenerator::new(&graph, constraints)?;
/// let pair = generator.generate(&mut SmallRng::seed_from_u64(7))?;
/// assert!(pair.is_some_and(|pair| pair.moves() >= 1));
/// # Ok::<(), wordpath_core::EngineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PuzzlePairGenerator<'g> {
    graph: &'g GraphModel,
    constraints: PuzzleConstraints,
    words: Vec<&'g str>,
}

impl<'g> PuzzlePairGenerator<'g> {
    /// Validates `constraints` and binds a generator to `graph`.
    ///
    /// # Errors
    /// Returns [`crate::EngineError::InvalidConstraints`] when the constraints
    /// fail [`PuzzleConstraints::validate`].
    pub fn new(graph: &'g GraphModel, constraints: PuzzleConstraints) -> Result<Self> {
        constraints.validate()?;
        Ok(Self {
            graph,
            constraints,
            words: graph.words(),
        })
    }

    /// Constraints applied to every candidate.
    #[must_use]
    pub const fn constraints(&self) -> &PuzzleConstraints {
        &self.constraints
    }

    /// Samples up to `max_attempts` candidates and returns the first
    /// acceptable pair, or `None` when the budget runs out.
    ///
    /// # Errors
    /// Propagates [`crate::EngineError::NegativeEdgeCost`] and
    /// [`crate::EngineError::NonFiniteSimilarity`] from the path search.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<PuzzlePair>> {
        self.generate_excluding(rng, &Exclusions::default())
    }

    #[instrument(
        name = "pair.generate",
        skip_all,
        fields(words = self.words.len(), max_attempts = self.constraints.max_attempts()),
    )]
    pub(crate) fn generate_excluding<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        exclusions: &Exclusions,
    ) -> Result<Option<PuzzlePair>> {
        if self.words.len() < 2 {
            debug!("graph has fewer than two words");
            return Ok(None);
        }

        let mut rejections: BTreeMap<&'static str, usize> = BTreeMap::new();
        for attempt in 1..=self.constraints.max_attempts() {
            let (start, end) = self.draw_pair(rng);
            match self.try_candidate(start, end, exclusions)? {
                Ok(pair) => {
                    debug!(attempt, start, end, moves = pair.moves(), "puzzle pair accepted");
                    return Ok(Some(pair));
                }
                Err(rejection) => *rejections.entry(rejection.as_str()).or_default() += 1,
            }
        }

        debug!(?rejections, "candidate budget exhausted");
        Ok(None)
    }

    /// Draws two distinct words uniformly at random.
    fn draw_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (&'g str, &'g str) {
        let count = self.words.len();
        let first = rng.gen_range(0..count);
        let mut second = rng.gen_range(0..count - 1);
        if second >= first {
            second += 1;
        }
        let pick = |index: usize| self.words.get(index).copied().unwrap_or_default();
        (pick(first), pick(second))
    }

    /// Applies the checks to one candidate, cheapest first.
    fn try_candidate(
        &self,
        start: &'g str,
        end: &'g str,
        exclusions: &Exclusions,
    ) -> Result<core::result::Result<PuzzlePair, PairRejection>> {
        if !exclusions.admits(start, end) {
            return Ok(Err(PairRejection::Excluded));
        }
        if !degree_ok(self.graph, start, end, &self.constraints) {
            return Ok(Err(PairRejection::LowDegree));
        }
        let Some(path) = ShortestPathFinder::new(self.graph).search(start, end)? else {
            return Ok(Err(PairRejection::Unreachable));
        };
        if let Err(rejection) = evaluate_path_checks(self.graph, &path, &self.constraints) {
            return Ok(Err(rejection));
        }
        Ok(Ok(PuzzlePair {
            start: start.to_owned(),
            end: end.to_owned(),
            path,
        }))
    }
}

/// Generates a single puzzle pair; see [`PuzzlePairGenerator::generate`].
///
/// # Errors
/// Returns [`crate::EngineError::InvalidConstraints`] for unsatisfiable
/// constraints and propagates edge-cost errors from the path search.
pub fn generate_puzzle_pair<R: Rng + ?Sized>(
    graph: &GraphModel,
    constraints: PuzzleConstraints,
    rng: &mut R,
) -> Result<Option<PuzzlePair>> {
    PuzzlePairGenerator::new(graph, constraints)?.generate(rng)
}

#[cfg(test)]
mod tests;
