/*!
# Bipartite Graph Algorithms

Testing whether a graph is bipartite and computing a bipartition if one exists.
Edge orientation is ignored throughout; a self-loop makes a graph non-bipartite.
*/

use super::*;

/// A bipartition of the node set.
///
/// - Nodes marked in the partition are on the **right** (1) side
/// - All other nodes are on the **left** (0) side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition(Vec<bool>);

impl Bipartition {
    /// Creates a bipartition of `n` nodes with every node on the left side
    pub fn new(n: usize) -> Self {
        Self(vec![false; n])
    }

    /// Moves node `u` to the right side
    pub fn move_to_right_side(&mut self, u: NodeIdx) {
        self.0[u as usize] = true;
    }

    /// Returns `true` if the node is on the left (0) side of the partition.
    #[inline]
    pub fn is_on_left_side(&self, u: NodeIdx) -> bool {
        !self.0[u as usize]
    }

    /// Returns `true` if the node is on the right (1) side of the partition.
    #[inline]
    pub fn is_on_right_side(&self, u: NodeIdx) -> bool {
        self.0[u as usize]
    }

    /// Returns an iterator over all nodes on the left side
    pub fn left_side(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.0.len() as NodeIdx).filter(|&u| self.is_on_left_side(u))
    }

    /// Returns an iterator over all nodes on the right side
    pub fn right_side(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.0.len() as NodeIdx).filter(|&u| self.is_on_right_side(u))
    }
}

/// A trait for testing and computing bipartitions in graphs.
pub trait BipartiteTest {
    /// Tests whether the given candidate partition is a valid bipartition,
    /// i.e. no edge has both endpoints on the same side.
    fn is_bipartition(&self, bipartition: &Bipartition) -> bool;

    /// Computes a valid bipartition of the graph, if one exists.
    /// Returns `None` if the graph is not bipartite.
    ///
    /// Every connected component is 2-colored by a breadth-first search starting on the left side
    /// at its smallest node.
    fn compute_bipartition(&self) -> Option<Bipartition>;

    /// Tests whether the graph is bipartite.
    fn is_bipartite(&self) -> bool {
        self.compute_bipartition().is_some()
    }
}

impl<G> BipartiteTest for G
where
    G: AdjacencyList + GraphEdgeOrder,
{
    fn is_bipartition(&self, bipartition: &Bipartition) -> bool {
        self.edge_endpoints()
            .all(|(u, v)| bipartition.is_on_left_side(u) != bipartition.is_on_left_side(v))
    }

    fn compute_bipartition(&self) -> Option<Bipartition> {
        let bipartition = propose_possibly_illegal_bipartition(self);
        self.is_bipartition(&bipartition).then_some(bipartition)
    }
}

/// Computes a candidate bipartition of the graph using BFS traversal.
///
/// - If the graph is bipartite, the returned partition is valid
/// - If the graph is not bipartite, the returned partition may be invalid
fn propose_possibly_illegal_bipartition<G>(graph: &G) -> Bipartition
where
    G: AdjacencyList,
{
    let mut bipartition = Bipartition::new(graph.len());
    if graph.is_empty() {
        return bipartition;
    }

    let mut bfs = graph.undirected_bfs(0);
    loop {
        for (node, pred) in bfs
            .by_ref()
            .filter_map(|x| Some((x.node, x.predecessor?)))
        {
            if bipartition.is_on_left_side(pred) {
                bipartition.move_to_right_side(node);
            }
        }

        if !bfs.try_restart_at_unvisited() {
            break;
        }
    }

    bipartition
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::testing::*;

    fn path_text(n: usize, closing: bool) -> String {
        let mut text = (0..n).map(|u| format!("u v{u};\n")).join("");
        for u in 1..n {
            text += &format!("h v{} - v{u};\n", u - 1);
        }
        if closing {
            text += &format!("h v{} - v0;\n", n - 1);
        }
        text
    }

    #[test]
    fn path() {
        for n in 1..10 {
            let graph = graph_from(&path_text(n, false));
            let bip = graph.compute_bipartition().unwrap();
            assert_eq!(bip.right_side().count(), n / 2);
            assert!(bip.is_on_left_side(0));
        }
    }

    #[test]
    fn cycles() {
        for n in 3..10 {
            let graph = graph_from(&path_text(n, true));
            assert_eq!(graph.is_bipartite(), n % 2 == 0);
        }
    }

    #[test]
    fn direction_is_ignored() {
        let graph = graph_from("u A;\nu B;\nu C;\nh A > B;\nh C > B;\nh A < C;");
        assert!(!graph.is_bipartite());

        let graph = graph_from("u A;\nu B;\nu C;\nh A > B;\nh C > B;");
        let bip = graph.compute_bipartition().unwrap();
        assert_eq!(bip.left_side().collect_vec(), vec![0, 2]);
        assert_eq!(bip.right_side().collect_vec(), vec![1]);
    }

    #[test]
    fn self_loop_is_not_bipartite() {
        assert!(!graph_from("u A;\nh A - A;").is_bipartite());
        assert!(!graph_from("u A;\nh A > A;").is_bipartite());
    }

    #[test]
    fn components_start_on_the_left() {
        let graph = graph_from("u A;\nu B;\nu C;\nu D;\nh A - B;\nh C - D;");
        let bip = graph.compute_bipartition().unwrap();
        assert_eq!(bip.left_side().collect_vec(), vec![0, 2]);
    }

    #[test]
    fn random_bipartitions_are_valid() {
        let rng = &mut seeded_rng(5);
        for _ in 0..50 {
            let graph = random_graph(rng, 7, 8);
            if let Some(bip) = graph.compute_bipartition() {
                for (u, v) in graph.edge_endpoints() {
                    assert_ne!(bip.is_on_right_side(u), bip.is_on_right_side(v));
                }
            }
        }
    }
}
