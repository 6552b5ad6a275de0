//! Shared fixtures and strategies for `wordpath-core` tests.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use wordpath_test_support::profile::property_cases;

use crate::{GraphModel, LayoutPosition, Node};

/// Builds a proptest configuration honouring the shared case override.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: property_cases(default_cases),
        ..ProptestConfig::default()
    }
}

/// `a <-> b <-> c` with similarities 0.9 and 0.4.
pub(crate) fn example_graph() -> GraphModel {
    GraphModel::builder()
        .node("a", Node::new().with_edge("b", 0.9))
        .node("b", Node::new().with_edge("a", 0.9).with_edge("c", 0.4))
        .node("c", Node::new().with_edge("b", 0.4))
        .build()
}

/// Builds a graph from directed `(from, to, similarity)` edges.
///
/// Every endpoint becomes a node, so the result has no dangling edges.
pub(crate) fn chain_graph(edges: &[(&str, &str, f64)]) -> GraphModel {
    let mut nodes: std::collections::BTreeMap<&str, Node> = std::collections::BTreeMap::new();
    for &(from, to, similarity) in edges {
        nodes.entry(to).or_default();
        let node = nodes.entry(from).or_default();
        *node = std::mem::take(node).with_edge(to, similarity);
    }
    nodes
        .into_iter()
        .fold(GraphModel::builder(), |builder, (word, node)| {
            builder.node(word, node)
        })
        .build()
}

/// Builds a graph declaring every `(left, right, similarity)` edge in both
/// directions.
pub(crate) fn symmetric_graph(edges: &[(&str, &str, f64)]) -> GraphModel {
    let doubled: Vec<(&str, &str, f64)> = edges
        .iter()
        .flat_map(|&(left, right, similarity)| {
            [(left, right, similarity), (right, left, similarity)]
        })
        .collect();
    chain_graph(&doubled)
}

/// Word used for node `index` in generated graphs.
pub(crate) fn word(index: usize) -> String {
    format!("w{index}")
}

/// A ring of `count` words where each word links to the next `reach` words in
/// both directions, laid out on a circle of the given radius.
pub(crate) fn ring_graph(count: usize, reach: usize, radius: f64) -> GraphModel {
    let mut builder = GraphModel::builder();
    for index in 0..count {
        let angle = std::f64::consts::TAU * index as f64 / count as f64;
        let mut node = Node::new().with_layout(LayoutPosition::new(
            radius * angle.cos(),
            radius * angle.sin(),
        ));
        for step in 1..=reach {
            let similarity = 0.9 - 0.1 * step as f64;
            node = node
                .with_edge(&word((index + step) % count), similarity)
                .with_edge(&word((index + count - step) % count), similarity);
        }
        builder = builder.node(&word(index), node);
    }
    builder.build()
}

/// Similarities drawn from a coarse grid so equal-cost ties are common and
/// sums stay exact.
fn similarity_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(0.25), Just(0.5), Just(0.75), Just(1.0)]
}

/// Random directed graphs with between two and eight words named `w0..`.
pub(crate) fn small_graph_strategy() -> impl Strategy<Value = GraphModel> {
    (2_usize..=8)
        .prop_flat_map(|count| {
            let edge = (0..count, 0..count, similarity_strategy());
            (Just(count), prop::collection::vec(edge, 0..=count * 3))
        })
        .prop_map(|(count, edges)| {
            let mut nodes: Vec<Node> = (0..count).map(|_| Node::new()).collect();
            for (from, to, similarity) in edges {
                if from == to {
                    continue;
                }
                if let Some(node) = nodes.get_mut(from) {
                    *node = std::mem::take(node).with_edge(&word(to), similarity);
                }
            }
            nodes
                .into_iter()
                .enumerate()
                .fold(GraphModel::builder(), |builder, (index, node)| {
                    builder.node(&word(index), node)
                })
                .build()
        })
}

/// A small graph together with two of its words.
pub(crate) fn graph_with_endpoints() -> impl Strategy<Value = (GraphModel, String, String)> {
    small_graph_strategy().prop_flat_map(|sample| {
        let count = sample.len();
        (Just(sample), 0..count, 0..count)
            .prop_map(|(graph, start, end)| (graph, word(start), word(end)))
    })
}
