/*!
Breadth-first traversal.

A traversal either follows edges the way they are oriented (undirected edges both ways,
directed edges from source to target) or ignores orientation altogether.
The search is an iterator over [`Visit`]s, which additionally carry the node through
which a node was discovered.
*/

use std::collections::VecDeque;

use super::*;

/// How directed edges are followed during a traversal
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Directed edges are only followed from source to target
    Respect,
    /// Every edge is followed in both directions
    Ignore,
}

/// A node yielded by a traversal together with the node it was discovered from.
/// The start node (and every restart node) has no predecessor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Visit {
    pub node: NodeIdx,
    pub predecessor: Option<NodeIdx>,
}

/// Breadth-first search iterator.
///
/// Maintains a queue of discovered nodes and a visited-marker per node.
/// Nodes are marked when they are discovered, so each node is yielded at most once.
pub struct Bfs<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    orientation: Orientation,
    visited: Vec<bool>,
    queue: VecDeque<Visit>,
}

impl<'a, G> Bfs<'a, G>
where
    G: AdjacencyList,
{
    /// Creates a search starting at `start`.
    /// If `start` is not a node of the graph, the search is empty.
    pub fn new(graph: &'a G, start: NodeIdx, orientation: Orientation) -> Self {
        let mut bfs = Self {
            graph,
            orientation,
            visited: vec![false; graph.len()],
            queue: VecDeque::new(),
        };
        if start < graph.number_of_nodes() {
            bfs.discover(start, None);
        }
        bfs
    }

    /// Returns *true* if `u` was discovered by the search so far
    pub fn did_visit_node(&self, u: NodeIdx) -> bool {
        self.visited[u as usize]
    }

    /// Once the search is exhausted, restarts it at the smallest undiscovered node.
    /// Returns *false* if every node was discovered already.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        match self.visited.iter().position(|&v| !v) {
            Some(u) => {
                self.discover(u as NodeIdx, None);
                true
            }
            None => false,
        }
    }

    fn discover(&mut self, node: NodeIdx, predecessor: Option<NodeIdx>) {
        if !self.visited[node as usize] {
            self.visited[node as usize] = true;
            self.queue.push_back(Visit { node, predecessor });
        }
    }

    fn discover_all(&mut self, from: NodeIdx, neighbors: impl Iterator<Item = NodeIdx>) {
        for v in neighbors {
            self.discover(v, Some(from));
        }
    }
}

impl<G> Iterator for Bfs<'_, G>
where
    G: AdjacencyList,
{
    type Item = Visit;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.queue.pop_front()?;
        let graph = self.graph;
        match self.orientation {
            Orientation::Respect => self.discover_all(visit.node, graph.neighbors_of(visit.node)),
            Orientation::Ignore => {
                self.discover_all(visit.node, graph.all_neighbors_of(visit.node))
            }
        }
        Some(visit)
    }
}

/// Traversal algorithms exposed directly on graphs
pub trait Traversal: AdjacencyList {
    /// Breadth-first search from `start` following edge orientation
    fn directed_bfs(&self, start: NodeIdx) -> Bfs<'_, Self> {
        Bfs::new(self, start, Orientation::Respect)
    }

    /// Breadth-first search from `start` ignoring edge orientation
    fn undirected_bfs(&self, start: NodeIdx) -> Bfs<'_, Self> {
        Bfs::new(self, start, Orientation::Ignore)
    }

    /// Returns the number of nodes reachable from `start` (including `start`)
    fn reachable_count(&self, start: NodeIdx, orientation: Orientation) -> usize {
        Bfs::new(self, start, orientation).count()
    }
}

impl<G: AdjacencyList> Traversal for G {}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::testing::*;

    #[test]
    fn bfs_order_and_predecessors() {
        let graph = graph_from("u A;\nu B;\nu C;\nu D;\nh A - B;\nh A - C;\nh C > D;");
        let visits = graph.directed_bfs(0).collect_vec();

        assert_eq!(
            visits.iter().map(|v| v.node).collect_vec(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(visits[0].predecessor, None);
        assert_eq!(visits[1].predecessor, Some(0));
        assert_eq!(visits[3].predecessor, Some(2));
    }

    #[test]
    fn orientation() {
        let graph = graph_from("u A;\nu B;\nu C;\nh A > B;\nh C > B;");
        assert_eq!(graph.reachable_count(0, Orientation::Respect), 2);
        assert_eq!(graph.reachable_count(1, Orientation::Respect), 1);
        assert_eq!(graph.reachable_count(1, Orientation::Ignore), 3);
    }

    #[test]
    fn restart() {
        let graph = graph_from("u A;\nu B;\nu C;\nh A - C;");
        let mut bfs = graph.undirected_bfs(0);
        assert_eq!(bfs.by_ref().map(|v| v.node).collect_vec(), vec![0, 2]);
        assert!(!bfs.did_visit_node(1));

        assert!(bfs.try_restart_at_unvisited());
        assert_eq!(bfs.by_ref().map(|v| v.node).collect_vec(), vec![1]);
        assert!(!bfs.try_restart_at_unvisited());
    }

    #[test]
    fn out_of_range_start() {
        let graph = graph_from("");
        assert_eq!(graph.directed_bfs(0).count(), 0);
    }
}
