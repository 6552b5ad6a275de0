//! Stateless acceptance checks for candidate puzzle pairs.
//!
//! Each predicate reads the graph and, where relevant, the optimal path that
//! was already computed for the pair. None of them search the graph.

use std::fmt;

use crate::{GraphModel, Path, PuzzleConstraints};

/// Why a candidate pair was turned down.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum PairRejection {
    /// Start or end has too few outgoing edges.
    LowDegree,
    /// No path joins start to end.
    Unreachable,
    /// The optimal path is too short or too long.
    PathLength,
    /// Start and end sit too close together in the layout.
    LayoutTooClose,
    /// The last step of the optimal path is the only way into the end word.
    NoAlternateApproach,
    /// A batch already used one of the words in the same role, or the pair.
    Excluded,
}

impl PairRejection {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowDegree => "low_degree",
            Self::Unreachable => "unreachable",
            Self::PathLength => "path_length",
            Self::LayoutTooClose => "layout_too_close",
            Self::NoAlternateApproach => "no_alternate_approach",
            Self::Excluded => "excluded",
        }
    }
}

impl fmt::Display for PairRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both words have at least `min_node_degree` outgoing edges.
///
/// Words missing from the graph have no degree and fail the check.
#[must_use]
pub fn degree_ok(
    graph: &GraphModel,
    start: &str,
    end: &str,
    constraints: &PuzzleConstraints,
) -> bool {
    let enough = |word: &str| {
        graph
            .degree(word)
            .is_some_and(|degree| degree >= constraints.min_node_degree())
    };
    enough(start) && enough(end)
}

/// The path's move count lies within the configured inclusive range.
#[must_use]
pub fn length_ok(path: &Path, constraints: &PuzzleConstraints) -> bool {
    constraints.accepts_moves(path.moves())
}

/// The two words are far enough apart in the layout.
///
/// Holds vacuously when either word has no layout coordinate.
#[must_use]
pub fn layout_distance_ok(
    graph: &GraphModel,
    start: &str,
    end: &str,
    constraints: &PuzzleConstraints,
) -> bool {
    let layout = |word: &str| graph.node(word).and_then(|node| node.layout());
    match (layout(start), layout(end)) {
        (Some(from), Some(to)) => {
            from.distance_squared(to) >= constraints.min_layout_distance_squared()
        }
        _ => true,
    }
}

/// The word before the end has another neighbour that also links to the end.
///
/// With `p` the penultimate word and `end` the last one, this holds when `p`
/// declares an edge to some node `q` which itself declares an edge to `end`.
/// `q` may be neither `end` nor `p`, so a self-loop on `p` does not count.
/// Paths with fewer than two words never satisfy it.
///
/// # Examples
/// ```
/// use wordpath_core::{GraphModel, Node, Path, has_alternate_approach};
///
/// let graph = GraphModel::builder()
///     .node("p", Node::new().with_edge("end", 0.5).with_edge("q", 0.5))
///     .node("q", Node::new().with_edge("end", 0.5))
///     .node("end", Node::new())
///     .build();
/// let path = Path::from_words(&graph, ["p", "end"])?;
/// assert!(has_alternate_approach(&graph, &path));
/// # Ok::<(), wordpath_core::EngineError>(())
/// ```
#[must_use]
pub fn has_alternate_approach(graph: &GraphModel, path: &Path) -> bool {
    let [.., penultimate, end] = path.words() else {
        return false;
    };
    let Some(node) = graph.node(penultimate) else {
        return false;
    };
    node.edges().keys().any(|other| {
        other != end
            && other != penultimate
            && graph
                .node(other)
                .is_some_and(|candidate| candidate.similarity_to(end).is_some())
    })
}

/// Runs the checks that need the optimal path: length, layout distance and
/// alternate approach, in that order, stopping at the first failure.
///
/// # Errors
/// Returns the [`PairRejection`] of the first failing check.
pub fn evaluate_path_checks(
    graph: &GraphModel,
    path: &Path,
    constraints: &PuzzleConstraints,
) -> Result<(), PairRejection> {
    if !length_ok(path, constraints) {
        return Err(PairRejection::PathLength);
    }
    if !layout_distance_ok(graph, path.start(), path.end(), constraints) {
        return Err(PairRejection::LayoutTooClose);
    }
    if !has_alternate_approach(graph, path) {
        return Err(PairRejection::NoAlternateApproach);
    }
    Ok(())
}
