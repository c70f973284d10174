use std::fmt::{Debug, Display};

use serde::Serialize;

use crate::node::*;

/// Index of an edge in parse order
pub type EdgeIdx = u32;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Edge operators in the order they are matched against a line.
/// `-` is a substring of both arrows and hence must come last.
pub const EDGE_OPERATORS: [&str; 5] = ["<-", "->", "<", ">", "-"];

/// Orientation of an edge relative to its declared endpoints `node1 op node2`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// `-`
    Undirected,
    /// `>` or `->`: from node1 to node2
    Forward,
    /// `<` or `<-`: from node2 to node1
    Backward,
}

impl EdgeDirection {
    /// Maps one of [`EDGE_OPERATORS`] to its direction
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "-" => Some(Self::Undirected),
            ">" | "->" => Some(Self::Forward),
            "<" | "<-" => Some(Self::Backward),
            _ => None,
        }
    }

    /// Canonical operator used when displaying an edge
    pub fn operator(&self) -> &'static str {
        match self {
            Self::Undirected => "-",
            Self::Forward => "->",
            Self::Backward => "<-",
        }
    }
}

/// A declared edge between `node1` and `node2`.
///
/// Whether the edge is directed and which way it points is stored in its [`EdgeDirection`].
/// Use [`Edge::source`] / [`Edge::target`] to get the actual endpoints of a directed edge.
#[derive(Clone, PartialEq, Serialize)]
pub struct Edge {
    node1: NodeId,
    node2: NodeId,
    direction: EdgeDirection,
    weight: Option<Weight>,
    label: Option<String>,
}

/// Endpoints of an edge normalized such that parallel edges share the same key:
/// ordered for directed edges, sorted for undirected ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey<'a>(pub &'a str, pub &'a str);

impl Edge {
    pub fn new<S: Into<NodeId>, T: Into<NodeId>>(
        node1: S,
        node2: T,
        direction: EdgeDirection,
    ) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            direction,
            weight: None,
            label: None,
        }
    }

    /// Shorthand for an undirected edge
    pub fn undirected<S: Into<NodeId>, T: Into<NodeId>>(node1: S, node2: T) -> Self {
        Self::new(node1, node2, EdgeDirection::Undirected)
    }

    /// Shorthand for an edge directed from `node1` to `node2`
    pub fn directed<S: Into<NodeId>, T: Into<NodeId>>(node1: S, node2: T) -> Self {
        Self::new(node1, node2, EdgeDirection::Forward)
    }

    pub fn with_weight(mut self, weight: Option<Weight>) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_label<S: Into<String>>(mut self, label: Option<S>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    pub fn node1(&self) -> &str {
        &self.node1
    }

    pub fn node2(&self) -> &str {
        &self.node2
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    /// Weight used by matrix computations (`1` for unweighted edges)
    pub fn weight_or_unit(&self) -> Weight {
        self.weight.unwrap_or(1.0)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the explicit label or `e{index}` if the edge has none
    pub fn display_label(&self, index: usize) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("e{index}"),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.direction != EdgeDirection::Undirected
    }

    /// Returns *true* if the declared arrow points from node2 to node1
    pub fn is_reverse(&self) -> bool {
        self.direction == EdgeDirection::Backward
    }

    /// Tail of a directed edge; `node1` for undirected edges
    pub fn source(&self) -> &str {
        if self.is_reverse() {
            &self.node2
        } else {
            &self.node1
        }
    }

    /// Head of a directed edge; `node2` for undirected edges
    pub fn target(&self) -> &str {
        if self.is_reverse() {
            &self.node1
        } else {
            &self.node2
        }
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.node1 == self.node2
    }

    /// Key under which parallel edges collide
    pub fn key(&self) -> EdgeKey<'_> {
        if self.is_directed() {
            EdgeKey(self.source(), self.target())
        } else if self.node1 <= self.node2 {
            EdgeKey(&self.node1, &self.node2)
        } else {
            EdgeKey(&self.node2, &self.node1)
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.node1,
            self.direction.operator(),
            self.node2
        )?;
        if let Some(w) = self.weight {
            write!(f, " {w}")?;
        }
        if let Some(label) = &self.label {
            write!(f, " :{label}")?;
        }
        Ok(())
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}
