//! Quota-driven generation of many distinct puzzle pairs.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::{GraphModel, PuzzleConstraints, Result, error::EngineError};

use super::{Exclusions, PuzzlePair, PuzzlePairGenerator, rng::worker_rng};

/// Default number of candidate searches per round.
pub const DEFAULT_BATCH_WORKERS: usize = 8;
/// Default number of rounds before a batch gives up on unmet quotas.
pub const DEFAULT_BATCH_MAX_ROUNDS: usize = 100;

/// How many pairs of each path length a batch should produce.
///
/// # Examples
/// ```
/// use wordpath_core::PairBatchPlan;
///
/// let plan = PairBatchPlan::new()
///     .with_quota(4, 10)
///     .with_quota(5, 12)
///     .with_seed(99);
/// assert_eq!(plan.total_requested(), 22);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairBatchPlan {
    quotas: BTreeMap<usize, usize>,
    seed: u64,
    workers: usize,
    max_rounds: usize,
}

impl Default for PairBatchPlan {
    fn default() -> Self {
        Self {
            quotas: BTreeMap::new(),
            seed: 0,
            workers: DEFAULT_BATCH_WORKERS,
            max_rounds: DEFAULT_BATCH_MAX_ROUNDS,
        }
    }
}

impl PairBatchPlan {
    /// Creates an empty plan with default seed, workers and rounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests `count` pairs whose optimal path has `moves` moves.
    ///
    /// Repeating a length replaces its earlier count.
    #[must_use]
    pub fn with_quota(mut self, moves: usize, count: usize) -> Self {
        self.quotas.insert(moves, count);
        self
    }

    /// Sets the base seed all worker generators derive from.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many candidate searches run per round.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the round budget.
    #[must_use]
    pub const fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Requested pair counts keyed by move count.
    #[must_use]
    pub const fn quotas(&self) -> &BTreeMap<usize, usize> {
        &self.quotas
    }

    /// Base seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Candidate searches per round.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Round budget.
    #[must_use]
    pub const fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Sum of all quotas.
    #[must_use]
    pub fn total_requested(&self) -> usize {
        self.quotas.values().sum()
    }

    fn validate(&self, constraints: &PuzzleConstraints) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::invalid_constraints("workers must be at least 1"));
        }
        if self.max_rounds == 0 {
            return Err(EngineError::invalid_constraints(
                "max_rounds must be at least 1",
            ));
        }
        if let Some(moves) = self
            .quotas
            .keys()
            .find(|&&moves| !constraints.accepts_moves(moves))
        {
            return Err(EngineError::invalid_constraints(format!(
                "quota for {moves} moves lies outside {}..={}",
                constraints.min_path_moves(),
                constraints.max_path_moves()
            )));
        }
        Ok(())
    }
}

/// Pairs produced by [`generate_pair_batch`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairBatch {
    pairs: Vec<PuzzlePair>,
    shortfall: BTreeMap<usize, usize>,
}

impl PairBatch {
    /// Accepted pairs in acceptance order.
    #[must_use]
    pub fn pairs(&self) -> &[PuzzlePair] {
        &self.pairs
    }

    /// Unmet quota per move count; empty when every quota was filled.
    #[must_use]
    pub const fn shortfall(&self) -> &BTreeMap<usize, usize> {
        &self.shortfall
    }

    /// Returns `true` when every quota was met.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shortfall.is_empty()
    }

    /// Consumes the batch, returning its pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<PuzzlePair> {
        self.pairs
    }
}

/// Fills the plan's quotas with distinct puzzle pairs.
///
/// Each round runs `workers` independent generators, each seeded from
/// `(seed, round, worker)` and seeing the exclusions as they stood when the
/// round began. Candidates are merged in worker order, so the result depends
/// only on the graph, the constraints and the plan.
///
/// # Errors
/// Returns [`EngineError::InvalidConstraints`] when the constraints are
/// unsatisfiable, when `workers` or `max_rounds` is zero, or when a quota names
/// a move count outside the constraints' range. Edge-cost errors from the path
/// search are propagated.
#[instrument(
    name = "pair.batch",
    skip_all,
    fields(
        requested = plan.total_requested(),
        workers = plan.workers(),
        max_rounds = plan.max_rounds(),
    ),
    err
)]
pub fn generate_pair_batch(
    graph: &GraphModel,
    constraints: PuzzleConstraints,
    plan: &PairBatchPlan,
) -> Result<PairBatch> {
    let generator = PuzzlePairGenerator::new(graph, constraints)?;
    plan.validate(&constraints)?;

    let mut remaining: BTreeMap<usize, usize> = plan
        .quotas
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(&moves, &count)| (moves, count))
        .collect();
    let mut exclusions = Exclusions::default();
    let mut pairs = Vec::with_capacity(plan.total_requested().min(graph.len()));
    let mut rounds = 0;

    while rounds < plan.max_rounds && !remaining.is_empty() {
        let candidates = run_round(&generator, &exclusions, plan.seed, rounds, plan.workers)?;
        for pair in candidates.into_iter().flatten() {
            let Some(left) = remaining.get_mut(&pair.moves()) else {
                continue;
            };
            if !exclusions.admits(pair.start(), pair.end()) {
                continue;
            }
            *left -= 1;
            if *left == 0 {
                remaining.remove(&pair.moves());
            }
            exclusions.record(&pair);
            pairs.push(pair);
        }
        rounds += 1;
    }

    debug!(
        rounds,
        accepted = pairs.len(),
        short = remaining.values().sum::<usize>(),
        "pair batch finished"
    );
    Ok(PairBatch {
        pairs,
        shortfall: remaining,
    })
}

#[cfg(feature = "parallel")]
fn run_round(
    generator: &PuzzlePairGenerator<'_>,
    exclusions: &Exclusions,
    seed: u64,
    round: usize,
    workers: usize,
) -> Result<Vec<Option<PuzzlePair>>> {
    use rayon::prelude::*;

    (0..workers)
        .into_par_iter()
        .map(|worker| generator.generate_excluding(&mut worker_rng(seed, round, worker), exclusions))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_round(
    generator: &PuzzlePairGenerator<'_>,
    exclusions: &Exclusions,
    seed: u64,
    round: usize,
    workers: usize,
) -> Result<Vec<Option<PuzzlePair>>> {
    (0..workers)
        .map(|worker| generator.generate_excluding(&mut worker_rng(seed, round, worker), exclusions))
        .collect()
}
