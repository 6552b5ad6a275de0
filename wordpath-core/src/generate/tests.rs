//! Tests for single-pair generation and quota batches.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use wordpath_test_support::tracing::EventCapture;

use crate::{
    GraphModel, Node, PuzzleConstraints,
    error::EngineErrorCode,
    evaluate::{degree_ok, evaluate_path_checks},
    search::find_shortest_path,
    test_utils::{ring_graph, suite_proptest_config, symmetric_graph},
};

use super::{
    Exclusions, PairBatchPlan, PuzzlePair, PuzzlePairGenerator, generate_pair_batch,
    generate_puzzle_pair,
};

#[fixture]
fn ring() -> GraphModel {
    ring_graph(24, 2, 100.0)
}

fn ring_constraints() -> PuzzleConstraints {
    PuzzleConstraints::new()
        .with_path_moves(2, 3)
        .with_min_node_degree(3)
}

fn assert_acceptable(graph: &GraphModel, pair: &PuzzlePair, constraints: &PuzzleConstraints) {
    assert_ne!(pair.start(), pair.end());
    assert!(degree_ok(graph, pair.start(), pair.end(), constraints));
    assert_eq!(evaluate_path_checks(graph, pair.path(), constraints), Ok(()));
    let optimal = find_shortest_path(graph, pair.start(), pair.end())
        .expect("search must succeed")
        .expect("accepted pairs are connected");
    assert_eq!(&optimal, pair.path());
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(2024)]
fn accepted_pairs_satisfy_every_constraint(ring: GraphModel, #[case] seed: u64) {
    let constraints = ring_constraints();
    let generator = PuzzlePairGenerator::new(&ring, constraints).expect("constraints are valid");
    let pair = generator
        .generate(&mut SmallRng::seed_from_u64(seed))
        .expect("generation must succeed")
        .expect("the ring has many fair pairs");
    assert_acceptable(&ring, &pair, &constraints);
    assert_eq!(pair.cost(), pair.path().cost());
}

#[rstest]
fn equal_seeds_give_equal_pairs(ring: GraphModel) {
    let draw = |seed| {
        generate_puzzle_pair(&ring, ring_constraints(), &mut SmallRng::seed_from_u64(seed))
            .expect("generation must succeed")
    };
    assert_eq!(draw(11), draw(11));
}

#[rstest]
fn unreachable_degree_exhausts_the_budget(ring: GraphModel) {
    let constraints = ring_constraints()
        .with_min_node_degree(10)
        .with_max_attempts(25);
    let result = generate_puzzle_pair(&ring, constraints, &mut SmallRng::seed_from_u64(3))
        .expect("exhaustion is not an error");
    assert_eq!(result, None);
}

#[rstest]
#[case::empty(GraphModel::builder().build())]
#[case::single(GraphModel::builder().node("solo", Node::new()).build())]
fn graphs_with_fewer_than_two_words_yield_nothing(#[case] graph: GraphModel) {
    let constraints = PuzzleConstraints::new()
        .with_path_moves(0, 5)
        .with_min_node_degree(0);
    let result = generate_puzzle_pair(&graph, constraints, &mut SmallRng::seed_from_u64(0))
        .expect("small graphs are not an error");
    assert_eq!(result, None);
}

#[test]
fn invalid_constraints_are_rejected_up_front() {
    let graph = ring_graph(8, 1, 100.0);
    let err = PuzzlePairGenerator::new(&graph, PuzzleConstraints::new().with_path_moves(3, 2))
        .expect_err("range is inverted");
    assert_eq!(err.code(), EngineErrorCode::InvalidConstraints);
}

#[test]
fn edge_cost_errors_propagate() {
    let graph = symmetric_graph(&[("a", "b", 1.5), ("b", "c", 1.5), ("a", "c", 1.5)]);
    let constraints = PuzzleConstraints::new()
        .with_path_moves(1, 2)
        .with_min_node_degree(1)
        .with_max_attempts(50);
    let err = generate_puzzle_pair(&graph, constraints, &mut SmallRng::seed_from_u64(5))
        .expect_err("similarity above one");
    assert_eq!(err.code(), EngineErrorCode::NegativeEdgeCost);
}

#[test]
fn draws_are_always_distinct_words() {
    let graph = symmetric_graph(&[("a", "b", 0.9), ("b", "c", 0.9), ("a", "c", 0.9)]);
    let constraints = PuzzleConstraints::new()
        .with_path_moves(1, 1)
        .with_min_node_degree(2)
        .with_min_layout_distance_squared(0.0);
    let generator = PuzzlePairGenerator::new(&graph, constraints).expect("constraints are valid");
    let mut rng = SmallRng::seed_from_u64(17);
    for _ in 0..64 {
        let pair = generator
            .generate(&mut rng)
            .expect("generation must succeed")
            .expect("every distinct pair is acceptable");
        assert_ne!(pair.start(), pair.end());
    }
}

#[rstest]
fn exhaustion_is_logged_with_rejection_counts(ring: GraphModel) {
    let constraints = ring_constraints()
        .with_min_node_degree(10)
        .with_max_attempts(5);
    let capture = EventCapture::default();
    let events = capture.record(|| {
        let outcome = generate_puzzle_pair(&ring, constraints, &mut SmallRng::seed_from_u64(1));
        assert!(matches!(outcome, Ok(None)));
    });
    let event = events
        .iter()
        .find(|event| event.message == "candidate budget exhausted")
        .expect("exhaustion is logged");
    assert_eq!(event.spans, vec!["pair.generate".to_owned()]);
    assert!(
        event
            .field("rejections")
            .is_some_and(|value| value.contains("low_degree"))
    );
}

#[test]
fn exclusions_track_roles_and_unordered_pairs() {
    let graph = symmetric_graph(&[("a", "b", 0.5), ("b", "c", 0.5), ("c", "a", 0.5)]);
    let path = find_shortest_path(&graph, "a", "b")
        .expect("search must succeed")
        .expect("b is reachable");
    let pair = PuzzlePair {
        start: "a".to_owned(),
        end: "b".to_owned(),
        path,
    };
    let mut exclusions = Exclusions::default();
    exclusions.record(&pair);
    assert!(!exclusions.admits("a", "c"));
    assert!(!exclusions.admits("c", "b"));
    assert!(!exclusions.admits("b", "a"));
    assert!(exclusions.admits("b", "c"));
    assert!(exclusions.admits("c", "a"));
}

fn ring_plan() -> PairBatchPlan {
    PairBatchPlan::new()
        .with_quota(2, 3)
        .with_quota(3, 3)
        .with_seed(42)
        .with_workers(4)
}

#[rstest]
fn batches_fill_quotas_with_distinct_pairs(ring: GraphModel) {
    let constraints = ring_constraints();
    let batch = generate_pair_batch(&ring, constraints, &ring_plan()).expect("batch must succeed");
    assert!(batch.is_complete(), "shortfall: {:?}", batch.shortfall());

    let mut per_length: BTreeMap<usize, usize> = BTreeMap::new();
    let mut starts = HashSet::new();
    let mut ends = HashSet::new();
    let mut unordered = HashSet::new();
    for pair in batch.pairs() {
        assert_acceptable(&ring, pair, &constraints);
        *per_length.entry(pair.moves()).or_default() += 1;
        assert!(starts.insert(pair.start().to_owned()));
        assert!(ends.insert(pair.end().to_owned()));
        let mut key = [pair.start(), pair.end()];
        key.sort_unstable();
        assert!(unordered.insert(key.map(str::to_owned)));
    }
    assert_eq!(per_length, BTreeMap::from([(2, 3), (3, 3)]));
}

#[rstest]
fn batches_are_reproducible(ring: GraphModel) {
    let run = || {
        generate_pair_batch(&ring, ring_constraints(), &ring_plan()).expect("batch must succeed")
    };
    assert_eq!(run(), run());
}

#[rstest]
fn oversized_quotas_report_a_shortfall(ring: GraphModel) {
    let plan = PairBatchPlan::new()
        .with_quota(3, 100)
        .with_max_rounds(5);
    let batch = generate_pair_batch(&ring, ring_constraints(), &plan).expect("batch must succeed");
    // Each word can start at most one pair.
    assert!(batch.pairs().len() <= ring.len());
    assert_eq!(batch.shortfall().get(&3), Some(&(100 - batch.pairs().len())));
}

#[rstest]
fn zero_quotas_are_already_met(ring: GraphModel) {
    let plan = PairBatchPlan::new().with_quota(2, 0);
    let batch = generate_pair_batch(&ring, ring_constraints(), &plan).expect("batch must succeed");
    assert!(batch.is_complete());
    assert!(batch.pairs().is_empty());
}

#[rstest]
#[case::length_outside_range(PairBatchPlan::new().with_quota(7, 1))]
#[case::no_workers(PairBatchPlan::new().with_quota(2, 1).with_workers(0))]
#[case::no_rounds(PairBatchPlan::new().with_quota(2, 1).with_max_rounds(0))]
fn invalid_plans_are_rejected(ring: GraphModel, #[case] plan: PairBatchPlan) {
    let err = generate_pair_batch(&ring, ring_constraints(), &plan).expect_err("plan is invalid");
    assert_eq!(err.code(), EngineErrorCode::InvalidConstraints);
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn any_seed_yields_an_acceptable_pair(seed in any::<u64>()) {
        let graph = ring_graph(24, 2, 100.0);
        let constraints = ring_constraints();
        let pair = generate_puzzle_pair(&graph, constraints, &mut SmallRng::seed_from_u64(seed))
            .expect("generation must succeed");
        if let Some(pair) = pair {
            assert_acceptable(&graph, &pair, &constraints);
        }
    }
}
