//! Unit and property tests for the shortest-path finder.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rstest::rstest;
use wordpath_test_support::tracing::EventCapture;

use crate::{
    GraphModel, Node, Path,
    error::{EngineError, EngineErrorCode},
    path::edge_cost,
    test_utils::{
        chain_graph, example_graph, graph_with_endpoints, suite_proptest_config, symmetric_graph,
    },
};

use super::{ShortestPathFinder, find_shortest_path};

fn words_of(path: &Path) -> Vec<&str> {
    path.words().iter().map(String::as_str).collect()
}

#[test]
fn finds_the_documented_example_path() {
    let graph = example_graph();
    let path = find_shortest_path(&graph, "a", "c")
        .expect("search must succeed")
        .expect("c is reachable");
    assert_eq!(words_of(&path), vec!["a", "b", "c"]);
    assert!((path.cost() - 0.7).abs() < 1e-12);
}

#[rstest]
#[case::missing_end("a", "z", "z")]
#[case::missing_start("z", "a", "z")]
#[case::both_missing("x", "y", "x")]
fn unknown_words_are_reported(#[case] start: &str, #[case] end: &str, #[case] missing: &str) {
    let graph = example_graph();
    let err = find_shortest_path(&graph, start, end).expect_err("word is absent");
    assert_eq!(
        err,
        EngineError::NodeNotFound {
            word: missing.to_owned()
        }
    );
}

#[test]
fn self_path_is_a_single_word_with_zero_cost() {
    let graph = example_graph();
    let path = find_shortest_path(&graph, "b", "b")
        .expect("search must succeed")
        .expect("a word reaches itself");
    assert_eq!(words_of(&path), vec!["b"]);
    assert_eq!(path.cost(), 0.0);
    assert_eq!(path.moves(), 0);
}

#[test]
fn queries_are_normalised_before_lookup() {
    let graph = example_graph();
    let path = find_shortest_path(&graph, " A", "C ")
        .expect("search must succeed")
        .expect("c is reachable");
    assert_eq!(words_of(&path), vec!["a", "b", "c"]);
}

#[test]
fn disjoint_components_yield_no_path() {
    let graph = symmetric_graph(&[("a", "b", 0.9), ("c", "d", 0.9)]);
    let result = find_shortest_path(&graph, "a", "d").expect("search must succeed");
    assert_eq!(result, None);
    assert_eq!(Path::cost_or_infinity(result.as_ref()), f64::INFINITY);
}

#[test]
fn edges_are_only_followed_in_their_declared_direction() {
    let graph = chain_graph(&[("a", "b", 0.9), ("b", "c", 0.9)]);
    assert!(
        find_shortest_path(&graph, "a", "c")
            .expect("search must succeed")
            .is_some()
    );
    assert_eq!(
        find_shortest_path(&graph, "c", "a").expect("search must succeed"),
        None
    );
}

#[test]
fn dangling_neighbours_are_skipped() {
    let graph = GraphModel::builder()
        .node("a", Node::new().with_edge("ghost", 1.0).with_edge("b", 0.5))
        .node("b", Node::new().with_edge("c", 0.5))
        .node("c", Node::new())
        .build();
    let path = find_shortest_path(&graph, "a", "c")
        .expect("dangling edge must not fail the search")
        .expect("c is reachable");
    assert_eq!(words_of(&path), vec!["a", "b", "c"]);
}

#[test]
fn prefers_cheaper_multi_hop_routes() {
    let graph = chain_graph(&[("a", "d", 0.1), ("a", "b", 0.9), ("b", "c", 0.9), ("c", "d", 0.9)]);
    let path = find_shortest_path(&graph, "a", "d")
        .expect("search must succeed")
        .expect("d is reachable");
    assert_eq!(words_of(&path), vec!["a", "b", "c", "d"]);
    assert!((path.cost() - 0.3).abs() < 1e-12);
}

#[test]
fn equal_cost_routes_resolve_to_the_lexicographically_first_word() {
    // Both s -> m -> t and s -> n -> t cost 1.0; m is settled first.
    let graph = chain_graph(&[("s", "n", 0.5), ("s", "m", 0.5), ("n", "t", 0.5), ("m", "t", 0.5)]);
    for _ in 0..8 {
        let path = find_shortest_path(&graph, "s", "t")
            .expect("search must succeed")
            .expect("t is reachable");
        assert_eq!(words_of(&path), vec!["s", "m", "t"]);
    }
}

#[test]
fn negative_costs_are_surfaced() {
    let graph = chain_graph(&[("a", "b", 1.5), ("b", "c", 0.5)]);
    let err = find_shortest_path(&graph, "a", "c").expect_err("similarity above one");
    assert_eq!(err.code(), EngineErrorCode::NegativeEdgeCost);
}

#[test]
fn non_finite_similarities_are_surfaced() {
    let graph = chain_graph(&[("a", "b", f64::NAN)]);
    let err = find_shortest_path(&graph, "a", "b").expect_err("NaN similarity");
    assert_eq!(err.code(), EngineErrorCode::NonFiniteSimilarity);
}

#[test]
fn search_stops_once_the_end_is_settled() {
    // The bad edge hangs off `far`, which is never settled before `b`.
    let graph = chain_graph(&[("a", "b", 0.9), ("a", "far", 0.0), ("far", "x", 2.0)]);
    let path = find_shortest_path(&graph, "a", "b")
        .expect("early exit avoids the bad edge")
        .expect("b is reachable");
    assert_eq!(words_of(&path), vec!["a", "b"]);
}

#[test]
fn finder_can_be_reused_across_queries() {
    let graph = example_graph();
    let finder = ShortestPathFinder::new(&graph);
    let forward = finder.find("a", "c").expect("search must succeed");
    let backward = finder.find("c", "a").expect("search must succeed");
    assert_eq!(forward.map(|path| path.moves()), Some(2));
    assert_eq!(backward.map(|path| path.moves()), Some(2));
}

#[test]
fn search_logs_a_summary_inside_its_span() {
    let graph = example_graph();
    let capture = EventCapture::default();
    let events = capture.record(|| {
        assert!(find_shortest_path(&graph, "a", "c").is_ok());
    });
    let summary = events
        .iter()
        .find(|event| event.message == "path search finished")
        .expect("summary event is emitted");
    assert_eq!(summary.spans, vec!["path.find".to_owned()]);
    assert_eq!(summary.field("reached"), Some("true"));
}

/// Minimum cost over every simple path from `start` to `end`.
fn brute_force_cost(graph: &GraphModel, start: &str, end: &str) -> Option<f64> {
    fn walk(
        graph: &GraphModel,
        current: &str,
        end: &str,
        visited: &mut BTreeSet<String>,
        cost: f64,
        best: &mut Option<f64>,
    ) {
        if current == end {
            *best = Some(best.map_or(cost, |known: f64| known.min(cost)));
            return;
        }
        let Some(node) = graph.node(current) else {
            return;
        };
        for (neighbour, &similarity) in node.edges() {
            if !graph.contains(neighbour) || visited.contains(neighbour) {
                continue;
            }
            visited.insert(neighbour.clone());
            walk(graph, neighbour, end, visited, cost + edge_cost(similarity), best);
            visited.remove(neighbour);
        }
    }

    let mut visited = BTreeSet::from([start.to_owned()]);
    let mut best = None;
    walk(graph, start, end, &mut visited, 0.0, &mut best);
    best
}

/// Straightforward O(V²) Dijkstra with a linear minimum scan and the same
/// lexicographic tie-break.
fn linear_scan_path(graph: &GraphModel, start: &str, end: &str) -> Option<Vec<String>> {
    let mut distance: BTreeMap<&str, f64> =
        graph.words().into_iter().map(|word| (word, f64::INFINITY)).collect();
    let mut predecessor: BTreeMap<&str, &str> = BTreeMap::new();
    let mut unvisited: BTreeSet<&str> = graph.words().into_iter().collect();
    distance.insert(start, 0.0);

    loop {
        let mut closest: Option<(&str, f64)> = None;
        for &word in &unvisited {
            let candidate = distance.get(word).copied().unwrap_or(f64::INFINITY);
            if closest.is_none_or(|(_, best)| candidate < best) {
                closest = Some((word, candidate));
            }
        }
        let Some((current, current_distance)) = closest else {
            break;
        };
        if current_distance.is_infinite() || current == end {
            break;
        }
        unvisited.remove(current);
        for (declared, &similarity) in graph.node(current)?.edges() {
            let Some((neighbour, _)) = graph.entry(declared) else {
                continue;
            };
            if !unvisited.contains(neighbour) {
                continue;
            }
            let through = current_distance + edge_cost(similarity);
            if distance.get(neighbour).is_none_or(|&known| through < known) {
                distance.insert(neighbour, through);
                predecessor.insert(neighbour, current);
            }
        }
    }

    if distance.get(end)?.is_infinite() {
        return None;
    }
    let mut words = vec![end.to_owned()];
    let mut current = end;
    while current != start {
        current = *predecessor.get(current)?;
        words.push(current.to_owned());
    }
    words.reverse();
    Some(words)
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn returned_paths_are_valid((graph, start, end) in graph_with_endpoints()) {
        let found = find_shortest_path(&graph, &start, &end).expect("search must succeed");
        if let Some(path) = found {
            prop_assert_eq!(path.start(), start.as_str());
            prop_assert_eq!(path.end(), end.as_str());
            let rescored = Path::from_words(&graph, path.words()).expect("every step is an edge");
            prop_assert!((rescored.cost() - path.cost()).abs() < 1e-9);
        }
    }

    #[test]
    fn costs_match_brute_force_enumeration((graph, start, end) in graph_with_endpoints()) {
        let found = find_shortest_path(&graph, &start, &end).expect("search must succeed");
        let expected = brute_force_cost(&graph, &start, &end);
        match (found, expected) {
            (Some(path), Some(best)) => prop_assert!((path.cost() - best).abs() < 1e-9),
            (None, None) => {}
            (path, cost) => prop_assert!(
                false,
                "reachability disagrees: found {:?}, brute force {:?}",
                path,
                cost
            ),
        }
    }

    #[test]
    fn paths_match_the_linear_scan_selection((graph, start, end) in graph_with_endpoints()) {
        let found = find_shortest_path(&graph, &start, &end)
            .expect("search must succeed")
            .map(Path::into_words);
        prop_assert_eq!(found, linear_scan_path(&graph, &start, &end));
    }

    #[test]
    fn repeated_searches_are_identical((graph, start, end) in graph_with_endpoints()) {
        let first = find_shortest_path(&graph, &start, &end).expect("search must succeed");
        let second = find_shortest_path(&graph, &start, &end).expect("search must succeed");
        prop_assert_eq!(first, second);
    }
}
