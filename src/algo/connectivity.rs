use super::*;

/// Connectivity tests based on repeated breadth-first searches.
///
/// Graphs without nodes are considered connected.
pub trait Connectivity: Traversal + Sized {
    /// Returns *true* if a single search from the first node, following edge orientation,
    /// reaches every node. For undirected graphs this is plain connectivity.
    fn is_connected_from_first(&self) -> bool {
        self.is_empty() || self.reachable_count(0, Orientation::Respect) == self.len()
    }

    /// Returns *true* if a search from every node, following edge orientation,
    /// reaches every node.
    fn is_strongly_connected(&self) -> bool {
        self.vertices()
            .all(|u| self.reachable_count(u, Orientation::Respect) == self.len())
    }

    /// Returns *true* if the graph is connected when ignoring edge orientation
    fn is_weakly_connected(&self) -> bool {
        self.is_empty() || self.reachable_count(0, Orientation::Ignore) == self.len()
    }

    /// Returns the weakly connected components, each in discovery order,
    /// ordered by their smallest node.
    fn weakly_connected_components(&self) -> Vec<Vec<NodeIdx>> {
        let mut components = Vec::new();
        if self.is_empty() {
            return components;
        }

        let mut bfs = self.undirected_bfs(0);
        loop {
            components.push(bfs.by_ref().map(|v| v.node).collect());
            if !bfs.try_restart_at_unvisited() {
                break;
            }
        }
        components
    }
}

impl<G: AdjacencyList> Connectivity for G {}
