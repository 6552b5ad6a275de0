//! Word paths and their semantic cost.
//!
//! A [`Path`] is a non-empty sequence of words in which every consecutive pair
//! is joined by a declared edge. Its cost sums [`edge_cost`] over those edges.

use serde::Serialize;

use crate::{
    GraphModel, Result,
    error::EngineError,
    graph::normalize_word,
};

/// Converts a similarity into a traversal cost.
///
/// The value is not clamped: a similarity above 1 produces a negative cost.
///
/// # Examples
/// ```
/// use wordpath_core::edge_cost;
///
/// assert!((edge_cost(0.9) - 0.1).abs() < 1e-12);
/// ```
#[must_use]
#[inline]
pub const fn edge_cost(similarity: f64) -> f64 {
    1.0 - similarity
}

/// Checks that an edge can be used as a Dijkstra weight and returns its cost.
pub(crate) fn checked_edge_cost(from: &str, to: &str, similarity: f64) -> Result<f64> {
    if !similarity.is_finite() {
        return Err(EngineError::NonFiniteSimilarity {
            from: from.to_owned(),
            to: to.to_owned(),
        });
    }
    let cost = edge_cost(similarity);
    if cost < 0.0 {
        return Err(EngineError::NegativeEdgeCost {
            from: from.to_owned(),
            to: to.to_owned(),
            similarity,
        });
    }
    Ok(cost)
}

/// An ordered route through the graph together with its total cost.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path {
    words: Vec<String>,
    cost: f64,
}

impl Path {
    pub(crate) const fn new(words: Vec<String>, cost: f64) -> Self {
        Self { words, cost }
    }

    /// Validates a caller-supplied word sequence and computes its cost.
    ///
    /// Words are normalised before lookup. This is how a player's route is
    /// scored against the optimal one.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyPath`] for an empty sequence,
    /// [`EngineError::NodeNotFound`] for a word outside the graph,
    /// [`EngineError::MissingEdge`] when a step is not a declared edge, and
    /// [`EngineError::NonFiniteSimilarity`] or
    /// [`EngineError::NegativeEdgeCost`] for edges with unusable similarity.
    ///
    /// # Examples
    /// ```
    /// use wordpath_core::{GraphModel, Node, Path};
    ///
    /// let graph = GraphModel::builder()
    ///     .node("a", Node::new().with_edge("b", 0.75))
    ///     .node("b", Node::new())
    ///     .build();
    /// let path = Path::from_words(&graph, ["A", "b"])?;
    /// assert_eq!(path.moves(), 1);
    /// assert_eq!(path.cost(), 0.25);
    /// # Ok::<(), wordpath_core::EngineError>(())
    /// ```
    pub fn from_words<I, S>(graph: &GraphModel, route: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = route
            .into_iter()
            .map(|word| normalize_word(word.as_ref()))
            .collect();
        if words.is_empty() {
            return Err(EngineError::EmptyPath);
        }
        if let Some(missing) = words.iter().find(|word| !graph.contains(word)) {
            return Err(EngineError::NodeNotFound {
                word: missing.clone(),
            });
        }

        let mut cost = 0.0;
        for step in words.windows(2) {
            let [from, to] = step else { continue };
            let similarity = graph
                .node(from)
                .and_then(|node| node.similarity_to(to))
                .ok_or_else(|| EngineError::MissingEdge {
                    from: from.clone(),
                    to: to.clone(),
                })?;
            cost += checked_edge_cost(from, to, similarity)?;
        }
        Ok(Self { words, cost })
    }

    /// Words of the path from start to end.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// First word of the path.
    #[must_use]
    pub fn start(&self) -> &str {
        self.words.first().map_or("", String::as_str)
    }

    /// Last word of the path.
    #[must_use]
    pub fn end(&self) -> &str {
        self.words.last().map_or("", String::as_str)
    }

    /// Total semantic cost.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of moves, i.e. edges traversed.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Cost of an optional path, with `f64::INFINITY` standing for "no path".
    ///
    /// # Examples
    /// ```
    /// use wordpath_core::Path;
    ///
    /// assert_eq!(Path::cost_or_infinity(None), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn cost_or_infinity(path: Option<&Self>) -> f64 {
        path.map_or(f64::INFINITY, Self::cost)
    }

    /// Consumes the path, returning its words.
    #[must_use]
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require contextual panics")]
mod tests {
    use rstest::rstest;

    use crate::{
        error::EngineErrorCode,
        test_utils::{chain_graph, example_graph},
    };

    use super::*;

    #[test]
    fn from_words_scores_valid_routes() {
        let graph = example_graph();
        let path = Path::from_words(&graph, ["a", "b", "c"]).expect("route is valid");
        assert_eq!(path.moves(), 2);
        assert!((path.cost() - 0.7).abs() < 1e-12);
        assert_eq!(path.start(), "a");
        assert_eq!(path.end(), "c");
    }

    #[test]
    fn single_word_route_costs_nothing() {
        let graph = example_graph();
        let path = Path::from_words(&graph, ["b"]).expect("single word is valid");
        assert_eq!(path.moves(), 0);
        assert_eq!(path.cost(), 0.0);
    }

    #[rstest]
    #[case::empty(vec![], EngineErrorCode::EmptyPath)]
    #[case::unknown(vec!["a", "z"], EngineErrorCode::NodeNotFound)]
    #[case::gap(vec!["a", "c"], EngineErrorCode::MissingEdge)]
    fn from_words_rejects_invalid_routes(
        #[case] words: Vec<&str>,
        #[case] expected: EngineErrorCode,
    ) {
        let graph = example_graph();
        let err = Path::from_words(&graph, words).expect_err("route is invalid");
        assert_eq!(err.code(), expected);
    }

    #[test]
    fn from_words_surfaces_negative_costs() {
        let graph = chain_graph(&[("a", "b", 1.25)]);
        let err = Path::from_words(&graph, ["a", "b"]).expect_err("similarity above one");
        assert_eq!(
            err,
            EngineError::NegativeEdgeCost {
                from: "a".into(),
                to: "b".into(),
                similarity: 1.25,
            }
        );
    }

    #[test]
    fn checked_edge_cost_rejects_nan() {
        let err = checked_edge_cost("a", "b", f64::NAN).expect_err("NaN is unusable");
        assert_eq!(err.code(), EngineErrorCode::NonFiniteSimilarity);
    }

    #[test]
    fn similarity_of_one_is_free() {
        assert_eq!(checked_edge_cost("a", "b", 1.0), Ok(0.0));
    }
}
