/*!
# Graph Operations

Index-level access traits. Nodes are addressed by their dense [`NodeIdx`] in `0..n`,
which keeps the algorithms in [`algo`](crate::algo) independent of identifiers.
[`Graph`](crate::repr::Graph) implements all of them.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::{edge::*, node::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<NodeIdx> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns an iterator over the `(source, target)` endpoints of all edges in parse order.
    /// Undirected edges are reported once as `(node1, node2)`.
    fn edge_endpoints(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + '_;
}

/// Traits pertaining getters for neighborhoods
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the nodes reachable from `u` via a single edge:
    /// undirected neighbors as well as successors.
    /// Parallel edges yield repeated neighbors.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_;

    /// Returns an iterator over all nodes sharing an edge with `u`, ignoring direction.
    /// Neighbors may be repeated.
    /// ** Panics if `u >= n` **
    fn all_neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_;

    /// Returns the number of edge-ends at `u`; self-loops count twice.
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: NodeIdx) -> NumNodes;

    /// Returns the sorted and deduplicated direction-agnostic neighborhood of `u`
    fn distinct_neighbors_of(&self, u: NodeIdx) -> Vec<NodeIdx> {
        self.all_neighbors_of(u).sorted_unstable().dedup().collect()
    }

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }
}

/// Getters considering only directed edges
pub trait DirectedAdjacencyList: AdjacencyList {
    /// Returns an iterator over nodes `v` with a directed edge `(u, v)`
    /// ** Panics if `u >= n` **
    fn out_neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_;

    /// Returns an iterator over nodes `v` with a directed edge `(v, u)`
    /// ** Panics if `u >= n` **
    fn in_neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_;

    /// Returns the number of outgoing directed edges of `u`
    /// ** Panics if `u >= n` **
    fn out_degree_of(&self, u: NodeIdx) -> NumNodes {
        self.out_neighbors_of(u).count() as NumNodes
    }

    /// Returns the number of incoming directed edges of `u`
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: NodeIdx) -> NumNodes {
        self.in_neighbors_of(u).count() as NumNodes
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest {
    /// Returns *true* if any edge starts and ends at the same node
    fn has_self_loop(&self) -> bool;

    /// Returns *true* if two edges share the same [`EdgeKey`]
    fn has_multiple_edges(&self) -> bool;
}

/// Runtime information on the orientation of a graph
pub trait GraphType {
    /// Returns *true* if at least one edge is directed
    fn is_directed(&self) -> bool;

    fn is_undirected(&self) -> bool {
        !self.is_directed()
    }
}
