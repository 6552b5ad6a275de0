//! Decoding of graph JSON documents into a [`GraphModel`].
//!
//! Two document shapes are accepted: the wrapped form `{"nodes": {..}}` and
//! a bare top-level map of words. A top-level `nodes` object is read as a node
//! of its own only when it looks like one: every key is a node field and its
//! `edges` value maps words to numbers. Otherwise it is the wrapper, so both a
//! word spelled "nodes" in a bare document and a word spelled "edges" in a
//! wrapped document load correctly.

use std::{collections::BTreeMap, io::Read};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::GraphLoadError;

use super::{GraphModel, LayoutPosition, Node, normalize_word};

const WRAPPED_NODES_KEY: &str = "nodes";
const EDGES_KEY: &str = "edges";
const NODE_FIELDS: [&str; 4] = [EDGES_KEY, "tsne", "definition", "definitions"];

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(default)]
    edges: BTreeMap<String, f64>,
    #[serde(default)]
    tsne: Option<Vec<f64>>,
    #[serde(default, alias = "definitions")]
    definition: Option<RawDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDefinition {
    One(String),
    Many(Vec<String>),
}

/// Decodes a graph from a JSON string.
///
/// # Errors
/// Returns [`GraphLoadError`] when the JSON is malformed, the top level is not
/// an object, a layout does not have two components, or a word is empty.
///
/// # Examples
/// ```
/// use wordpath_core::load_graph_from_str;
///
/// let graph = load_graph_from_str(r#"{"nodes": {"Sea": {"edges": {"ocean": 0.8}}}}"#)?;
/// assert!(graph.contains("sea"));
/// # Ok::<(), wordpath_core::GraphLoadError>(())
/// ```
pub fn load_graph_from_str(raw: &str) -> Result<GraphModel, GraphLoadError> {
    let value: Value = serde_json::from_str(raw)?;
    load_graph_from_value(value)
}

/// Decodes a graph from any reader producing JSON.
///
/// # Errors
/// See [`load_graph_from_str`].
pub fn load_graph_from_reader(reader: impl Read) -> Result<GraphModel, GraphLoadError> {
    let value: Value = serde_json::from_reader(reader)?;
    load_graph_from_value(value)
}

#[instrument(name = "graph.load", skip(value), err)]
fn load_graph_from_value(value: Value) -> Result<GraphModel, GraphLoadError> {
    let Value::Object(top) = value else {
        return Err(GraphLoadError::NotAnObject);
    };
    let entries = unwrap_nodes(top);

    let mut builder = GraphModel::builder();
    let mut collisions = 0_usize;
    for (word, value) in entries {
        let raw: RawNode = serde_json::from_value(value)?;
        if normalize_word(&word).is_empty() {
            return Err(GraphLoadError::EmptyWord);
        }
        let node = convert_node(&word, raw)?;
        if !builder.try_insert(&word, node) {
            collisions += 1;
            warn!(word = %word, "dropping node whose normalised key is already taken");
        }
    }

    let graph = builder.build();
    let dangling = graph.dangling_edges();
    if dangling > 0 {
        warn!(dangling, "graph declares edges to words that are not nodes");
    }
    debug!(nodes = graph.len(), collisions, "graph decoded");
    Ok(graph)
}

fn unwrap_nodes(mut top: Map<String, Value>) -> Map<String, Value> {
    let wrapped = matches!(
        top.get(WRAPPED_NODES_KEY),
        Some(Value::Object(inner)) if is_node_wrapper(inner)
    );
    if !wrapped {
        return top;
    }
    match top.remove(WRAPPED_NODES_KEY) {
        Some(Value::Object(inner)) => inner,
        _ => Map::new(),
    }
}

/// A bare node carries only node fields, and its `edges` map holds numbers.
/// An `edges` entry mapping to objects is a word named "edges" in a wrapper.
fn is_node_wrapper(inner: &Map<String, Value>) -> bool {
    if inner.keys().any(|key| !NODE_FIELDS.contains(&key.as_str())) {
        return true;
    }
    match inner.get(EDGES_KEY) {
        None => true,
        Some(Value::Object(edges)) => !edges.is_empty() && edges.values().all(Value::is_object),
        Some(_) => false,
    }
}

fn convert_node(word: &str, raw: RawNode) -> Result<Node, GraphLoadError> {
    let mut node = Node::new();
    for (neighbour, similarity) in raw.edges {
        node = node.with_edge(&neighbour, similarity);
    }
    if let Some(coords) = raw.tsne {
        let &[x, y] = coords.as_slice() else {
            return Err(GraphLoadError::InvalidLayout {
                word: normalize_word(word),
                len: coords.len(),
            });
        };
        node = node.with_layout(LayoutPosition::new(x, y));
    }
    match raw.definition {
        Some(RawDefinition::One(text)) => node = node.with_definition(text),
        Some(RawDefinition::Many(lines)) => {
            for text in lines {
                node = node.with_definition(text);
            }
        }
        None => {}
    }
    Ok(node)
}
