/*!
# Node Representation

Nodes are declared in the text notation by a string identifier and an optional weight.
Inside a [`Graph`](crate::repr::Graph) every live node additionally gets a dense index
`NodeIdx` in `0..n` (declaration order), which the index-level traits in [`ops`](crate::ops)
and the algorithms in [`algo`](crate::algo) work on.
*/

use std::fmt::Display;

use serde::Serialize;

/// Identifier of a node as written in the input
pub type NodeId = String;

/// Dense index of a live node inside a graph
pub type NodeIdx = u32;

/// There can be at most `2^32 - 1` nodes in a graph
pub type NumNodes = NodeIdx;

/// Weights of nodes and edges
pub type Weight = f64;

/// Identifier reserved for omitted positions in binary-tree layouts.
/// Such nodes are recorded by the parser but never become part of a graph.
pub const PLACEHOLDER_NODE: &str = "*";

/// A declared node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    identifier: NodeId,
    weight: Option<Weight>,
}

impl Node {
    /// Creates an unweighted node
    pub fn new<S: Into<NodeId>>(identifier: S) -> Self {
        Self {
            identifier: identifier.into(),
            weight: None,
        }
    }

    /// Sets the weight of the node
    pub fn with_weight(mut self, weight: Option<Weight>) -> Self {
        self.weight = weight;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    /// Returns *true* if this is the `*` placeholder
    pub fn is_placeholder(&self) -> bool {
        self.identifier == PLACEHOLDER_NODE
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.weight {
            Some(w) => write!(f, "{} ({w})", self.identifier),
            None => write!(f, "{}", self.identifier),
        }
    }
}
