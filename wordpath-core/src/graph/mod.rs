//! In-memory word graph searched by the engine.
//!
//! A [`GraphModel`] maps lowercase words to [`Node`]s. Each node declares
//! directed, similarity-weighted edges to its neighbours and optionally a
//! two-dimensional layout coordinate used for puzzle-quality filtering.
//! The model is immutable once built and is shared by reference.

mod load;

use std::collections::BTreeMap;

use serde::Serialize;

pub use self::load::{load_graph_from_reader, load_graph_from_str};

/// Normalises a word to the key form used by [`GraphModel`].
///
/// # Examples
/// ```
/// use wordpath_core::normalize_word;
///
/// assert_eq!(normalize_word("  Ocean "), "ocean");
/// ```
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Projected 2D position of a word (e.g. a t-SNE coordinate).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutPosition {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl LayoutPosition {
    /// Creates a layout position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// # Examples
    /// ```
    /// use wordpath_core::LayoutPosition;
    ///
    /// let a = LayoutPosition::new(0.0, 0.0);
    /// let b = LayoutPosition::new(3.0, 4.0);
    /// assert_eq!(a.distance_squared(b), 25.0);
    /// ```
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A single word of the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    edges: BTreeMap<String, f64>,
    layout: Option<LayoutPosition>,
    definitions: Vec<String>,
}

impl Node {
    /// Creates a node with no edges, layout or definitions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a directed edge to `neighbour`.
    ///
    /// The neighbour is normalised with [`normalize_word`].
    #[must_use]
    pub fn with_edge(mut self, neighbour: &str, similarity: f64) -> Self {
        self.edges.insert(normalize_word(neighbour), similarity);
        self
    }

    /// Sets the layout coordinate.
    #[must_use]
    pub fn with_layout(mut self, position: LayoutPosition) -> Self {
        self.layout = Some(position);
        self
    }

    /// Appends a definition line. Definitions are carried for display only.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definitions.push(definition.into());
        self
    }

    /// Declared outgoing edges keyed by neighbour, in lexicographic order.
    #[must_use]
    pub const fn edges(&self) -> &BTreeMap<String, f64> {
        &self.edges
    }

    /// Similarity of the edge to `neighbour`, if declared.
    #[must_use]
    pub fn similarity_to(&self, neighbour: &str) -> Option<f64> {
        self.edges.get(neighbour).copied()
    }

    /// Number of declared outgoing edges, dangling ones included.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Layout coordinate, when the data carries one.
    #[must_use]
    pub const fn layout(&self) -> Option<LayoutPosition> {
        self.layout
    }

    /// Definitions attached to the word.
    #[must_use]
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }
}

/// Immutable word graph.
///
/// # Examples
/// ```
/// use wordpath_core::{GraphModel, Node};
///
/// let graph = GraphModel::builder()
///     .node("a", Node::new().with_edge("b", 0.9))
///     .node("b", Node::new().with_edge("a", 0.9))
///     .build();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.degree("a"), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
    nodes: BTreeMap<String, Node>,
}

impl GraphModel {
    /// Starts an empty [`GraphModelBuilder`].
    #[must_use]
    pub fn builder() -> GraphModelBuilder {
        GraphModelBuilder::default()
    }

    /// Looks a node up by its normalised key.
    #[must_use]
    pub fn node(&self, word: &str) -> Option<&Node> {
        self.nodes.get(word)
    }

    /// Looks a node up, also returning the graph-owned key.
    pub(crate) fn entry(&self, word: &str) -> Option<(&str, &Node)> {
        self.nodes
            .get_key_value(word)
            .map(|(key, node)| (key.as_str(), node))
    }

    /// Returns `true` when `word` is a top-level node.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.nodes.contains_key(word)
    }

    /// Iterates over `(word, node)` pairs in lexicographic order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(word, node)| (word.as_str(), node))
    }

    /// All words in lexicographic order.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Out-degree of `word`, or `None` when the word is absent.
    #[must_use]
    pub fn degree(&self, word: &str) -> Option<usize> {
        self.node(word).map(Node::degree)
    }

    /// Neighbours of `word` ordered by descending similarity, ties by word.
    ///
    /// Dangling neighbours are omitted. Returns an empty list for unknown
    /// words.
    #[must_use]
    pub fn neighbours_by_similarity(&self, word: &str) -> Vec<(&str, f64)> {
        let Some(node) = self.node(word) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, f64)> = node
            .edges
            .iter()
            .filter(|(neighbour, _)| self.contains(neighbour))
            .map(|(neighbour, similarity)| (neighbour.as_str(), *similarity))
            .collect();
        ranked.sort_by(|left, right| {
            right
                .1
                .total_cmp(&left.1)
                .then_with(|| left.0.cmp(right.0))
        });
        ranked
    }

    /// Counts edges whose neighbour is not a top-level node.
    #[must_use]
    pub fn dangling_edges(&self) -> usize {
        self.nodes
            .values()
            .flat_map(|node| node.edges.keys())
            .filter(|neighbour| !self.contains(neighbour))
            .count()
    }
}

/// Incrementally assembles a [`GraphModel`].
#[derive(Clone, Debug, Default)]
pub struct GraphModelBuilder {
    nodes: BTreeMap<String, Node>,
}

impl GraphModelBuilder {
    /// Inserts `node` under the normalised form of `word`, replacing any
    /// previous node with the same key.
    #[must_use]
    pub fn node(mut self, word: &str, node: Node) -> Self {
        self.nodes.insert(normalize_word(word), node);
        self
    }

    /// Inserts `node` unless the normalised key already exists.
    ///
    /// Returns `false` when the key was taken and the node was dropped.
    pub fn try_insert(&mut self, word: &str, node: Node) -> bool {
        let key = normalize_word(word);
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.nodes.insert(key, node);
        true
    }

    /// Finalises the graph.
    #[must_use]
    pub fn build(self) -> GraphModel {
        GraphModel { nodes: self.nodes }
    }
}
