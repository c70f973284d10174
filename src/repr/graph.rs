use std::collections::BTreeSet;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use tracing::debug;

use super::*;
use crate::{
    algo::Traversal,
    diagnostics::{DiagnosticKind, Diagnostics},
    io::{GraphReader, ParseError, ParsedGraph, TextReader},
    ops::*,
};

/// Immutable graph over identified nodes.
///
/// ```
/// use graphrec::prelude::*;
///
/// let graph = Graph::from_text("u A;\nu B;\nu C;\nh A -> B;\nh B - C;").unwrap();
///
/// assert_eq!(graph.get_successors("A"), vec!["B"]);
/// assert_eq!(graph.get_degree("B"), 2);
/// assert!(graph.bfs("A").contains("C"));
/// assert!(!graph.bfs("C").contains("A"));
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    /// Declared nodes including placeholders
    raw_nodes: Vec<Node>,
    /// Live nodes in declaration order; `nodes[u]` is node `u`
    nodes: Vec<Node>,
    index: FxHashMap<NodeId, NodeIdx>,
    /// Kept edges in parse order
    edges: Vec<Edge>,
    /// `(source, target)` of `edges[e]`
    endpoints: Vec<(NodeIdx, NodeIdx)>,
    adjacency: Vec<Neighborhood>,
    out_neighbors: Vec<Neighborhood>,
    in_neighbors: Vec<Neighborhood>,
    is_binary_tree: bool,
    diagnostics: Diagnostics,
}

impl Graph {
    /// Builds a graph from raw declarations.
    ///
    /// Placeholder nodes are excluded, later declarations of an identifier overwrite earlier
    /// ones, and edges referencing undeclared nodes are dropped. The latter two are reported
    /// in [`Graph::diagnostics`].
    pub fn new(raw_nodes: Vec<Node>, raw_edges: Vec<Edge>, is_binary_tree: bool) -> Self {
        let mut diagnostics = Diagnostics::new();

        let mut nodes: Vec<Node> = Vec::with_capacity(raw_nodes.len());
        let mut index = FxHashMap::default();
        for node in raw_nodes.iter().filter(|node| !node.is_placeholder()) {
            if let Some(&u) = index.get(node.identifier()) {
                diagnostics.push(
                    DiagnosticKind::DuplicateNode,
                    None,
                    format!("node `{}` declared more than once", node.identifier()),
                );
                nodes[u as usize] = node.clone();
            } else {
                index.insert(node.identifier().to_string(), nodes.len() as NodeIdx);
                nodes.push(node.clone());
            }
        }

        let n = nodes.len();
        let mut graph = Self {
            raw_nodes,
            nodes,
            index,
            edges: Vec::with_capacity(raw_edges.len()),
            endpoints: Vec::with_capacity(raw_edges.len()),
            adjacency: vec![Neighborhood::new(); n],
            out_neighbors: vec![Neighborhood::new(); n],
            in_neighbors: vec![Neighborhood::new(); n],
            is_binary_tree,
            diagnostics,
        };

        for edge in raw_edges {
            let (Some(source), Some(target)) =
                (graph.index_of(edge.source()), graph.index_of(edge.target()))
            else {
                graph.diagnostics.push(
                    DiagnosticKind::DanglingEdge,
                    None,
                    format!("edge `{edge}` references an undeclared node"),
                );
                continue;
            };

            let e = graph.edges.len() as EdgeIdx;
            if edge.is_directed() {
                graph.out_neighbors[source as usize].push((target, e));
                graph.in_neighbors[target as usize].push((source, e));
                graph.adjacency[source as usize].push((target, e));
            } else {
                graph.adjacency[source as usize].push((target, e));
                graph.adjacency[target as usize].push((source, e));
            }

            graph.endpoints.push((source, target));
            graph.edges.push(edge);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph"
        );

        graph
    }

    /// Builds a graph from parsed declarations, keeping the diagnostics of the parser
    pub fn from_parsed(parsed: ParsedGraph) -> Self {
        let mut graph = Self::new(parsed.nodes, parsed.edges, parsed.is_binary_tree);
        let mut diagnostics = parsed.diagnostics;
        diagnostics.extend(std::mem::take(&mut graph.diagnostics));
        graph.diagnostics = diagnostics;
        graph
    }

    /// Parses `content` with the default [`TextReader`] and builds the graph
    ///
    /// # Errors
    /// Returns an error if the text contains an edge line without operator.
    pub fn from_text(content: &str) -> Result<Self, ParseError> {
        Ok(Self::from_parsed(TextReader::new().try_read_graph_str(content)?))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    pub fn node(&self, node: &str) -> Option<&Node> {
        self.index_of(node).map(|u| &self.nodes[u as usize])
    }

    /// Live nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Live node identifiers in declaration order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(Node::identifier)
    }

    /// All declared nodes, including placeholders and overwritten duplicates
    pub fn raw_nodes(&self) -> &[Node] {
        &self.raw_nodes
    }

    /// Kept edges in parse order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the first edge whose explicit label, or default label `e<index>`, matches
    pub fn edge_by_label(&self, label: &str) -> Option<(usize, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .find(|(i, edge)| edge.display_label(*i) == label)
    }

    /// *true* if the input declared no edges at all
    pub fn is_binary_tree(&self) -> bool {
        self.is_binary_tree
    }

    /// Warnings collected while parsing and building the graph
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Dense index of a node
    pub fn index_of(&self, node: &str) -> Option<NodeIdx> {
        self.index.get(node).copied()
    }

    /// Identifier of node `u`
    /// ** Panics if `u >= n` **
    pub fn id_of(&self, u: NodeIdx) -> &str {
        self.nodes[u as usize].identifier()
    }

    fn ids_of(&self, nodes: impl Iterator<Item = NodeIdx>) -> Vec<&str> {
        nodes.map(|u| self.id_of(u)).collect()
    }

    fn edges_of(&self, neighborhood: &Neighborhood) -> Vec<&Edge> {
        neighborhood
            .iter()
            .map(|&(_, e)| &self.edges[e as usize])
            .collect()
    }

    /// Undirected neighbors and successors, repeated for parallel edges
    pub fn get_neighbors(&self, node: &str) -> Vec<&str> {
        self.index_of(node)
            .map_or_else(Vec::new, |u| self.ids_of(self.neighbors_of(u)))
    }

    /// Targets of directed edges leaving `node`
    pub fn get_successors(&self, node: &str) -> Vec<&str> {
        self.index_of(node)
            .map_or_else(Vec::new, |u| self.ids_of(self.out_neighbors_of(u)))
    }

    /// Sources of directed edges entering `node`
    pub fn get_predecessors(&self, node: &str) -> Vec<&str> {
        self.index_of(node)
            .map_or_else(Vec::new, |u| self.ids_of(self.in_neighbors_of(u)))
    }

    /// All nodes sharing an edge with `node`, regardless of direction
    pub fn get_all_neighbors(&self, node: &str) -> BTreeSet<&str> {
        self.index_of(node).map_or_else(BTreeSet::new, |u| {
            self.all_neighbors_of(u).map(|v| self.id_of(v)).collect()
        })
    }

    /// Directed edges leaving `node`
    pub fn get_outgoing_edges(&self, node: &str) -> Vec<&Edge> {
        self.index_of(node)
            .map_or_else(Vec::new, |u| self.edges_of(&self.out_neighbors[u as usize]))
    }

    /// Directed edges entering `node`
    pub fn get_incoming_edges(&self, node: &str) -> Vec<&Edge> {
        self.index_of(node)
            .map_or_else(Vec::new, |u| self.edges_of(&self.in_neighbors[u as usize]))
    }

    /// Outgoing, incoming and undirected edges at `node`; each edge is listed once
    pub fn get_incident_edges(&self, node: &str) -> Vec<&Edge> {
        let Some(u) = self.index_of(node) else {
            return Vec::new();
        };
        let u = u as usize;

        let mut seen = FxHashSet::default();
        self.out_neighbors[u]
            .iter()
            .chain(self.in_neighbors[u].iter())
            .chain(
                self.adjacency[u]
                    .iter()
                    .filter(|&&(_, e)| !self.edges[e as usize].is_directed()),
            )
            .filter(|&&(_, e)| seen.insert(e))
            .map(|&(_, e)| &self.edges[e as usize])
            .collect()
    }

    pub fn get_out_degree(&self, node: &str) -> usize {
        self.index_of(node)
            .map_or(0, |u| self.out_degree_of(u) as usize)
    }

    pub fn get_in_degree(&self, node: &str) -> usize {
        self.index_of(node)
            .map_or(0, |u| self.in_degree_of(u) as usize)
    }

    /// Number of edge-ends at `node`; self-loops count twice
    pub fn get_degree(&self, node: &str) -> usize {
        self.index_of(node).map_or(0, |u| self.degree_of(u) as usize)
    }

    /// Returns *true* if any node or edge carries a weight
    pub fn is_weighted(&self) -> bool {
        self.edges.iter().any(|e| e.weight().is_some())
            || self.nodes.iter().any(|n| n.weight().is_some())
    }

    /// Nodes reachable from `start` along undirected edges and edge directions
    pub fn bfs(&self, start: &str) -> BTreeSet<&str> {
        self.index_of(start).map_or_else(BTreeSet::new, |u| {
            self.directed_bfs(u).map(|v| self.id_of(v.node)).collect()
        })
    }

    /// Nodes reachable from `start` when ignoring edge directions
    pub fn bfs_undirected(&self, start: &str) -> BTreeSet<&str> {
        self.index_of(start).map_or_else(BTreeSet::new, |u| {
            self.undirected_bfs(u).map(|v| self.id_of(v.node)).collect()
        })
    }
}

impl GraphNodeOrder for Graph {
    fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }
}

impl GraphEdgeOrder for Graph {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    fn edge_endpoints(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + '_ {
        self.endpoints.iter().copied()
    }
}

impl AdjacencyList for Graph {
    fn neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.adjacency[u as usize].iter().map(|&(v, _)| v)
    }

    fn all_neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.neighbors_of(u).chain(self.in_neighbors_of(u))
    }

    fn degree_of(&self, u: NodeIdx) -> NumNodes {
        let undirected = self.adjacency[u as usize]
            .iter()
            .filter(|&&(_, e)| !self.edges[e as usize].is_directed())
            .count();

        // an undirected loop is stored twice in the adjacency of its node
        self.out_degree_of(u) + self.in_degree_of(u) + undirected as NumNodes
    }
}

impl DirectedAdjacencyList for Graph {
    fn out_neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.out_neighbors[u as usize].iter().map(|&(v, _)| v)
    }

    fn in_neighbors_of(&self, u: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        self.in_neighbors[u as usize].iter().map(|&(v, _)| v)
    }

    fn out_degree_of(&self, u: NodeIdx) -> NumNodes {
        self.out_neighbors[u as usize].len() as NumNodes
    }

    fn in_degree_of(&self, u: NodeIdx) -> NumNodes {
        self.in_neighbors[u as usize].len() as NumNodes
    }
}

impl AdjacencyTest for Graph {
    fn has_self_loop(&self) -> bool {
        self.edges.iter().any(Edge::is_loop)
    }

    fn has_multiple_edges(&self) -> bool {
        !self.edges.iter().map(Edge::key).all_unique()
    }
}

impl GraphType for Graph {
    fn is_directed(&self) -> bool {
        self.edges.iter().any(Edge::is_directed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn placeholders_are_excluded() {
        let graph = graph_from("u A;\nu *;\nu B;\nu *;");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.raw_nodes().len(), 4);
        assert!(!graph.has_node("*"));
        assert!(graph.is_binary_tree());
        assert_eq!(graph.node_ids().collect_vec(), vec!["A", "B"]);
    }

    #[test]
    fn duplicate_nodes_overwrite() {
        let graph = graph_from("u A;\nu B;\nu A 3;");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("A").unwrap().weight(), Some(3.0));
        assert_eq!(graph.node_ids().collect_vec(), vec!["A", "B"]);
        assert!(graph.diagnostics().has(DiagnosticKind::DuplicateNode));
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let graph = graph_from("u A;\nu B;\nh A - B;\nh A - X;\nh Y > B;");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.diagnostics().of_kind(DiagnosticKind::DanglingEdge).count(),
            2
        );
    }

    #[test]
    fn directed_queries() {
        let graph = graph_from("u A;\nu B;\nu C;\nh A -> B;\nh C < B;\nh A - C;");

        assert_eq!(graph.get_successors("A"), vec!["B"]);
        assert_eq!(graph.get_successors("B"), vec!["C"]);
        assert_eq!(graph.get_predecessors("C"), vec!["B"]);
        assert!(graph.get_predecessors("A").is_empty());

        assert_eq!(graph.get_neighbors("A"), vec!["B", "C"]);
        assert_eq!(graph.get_neighbors("C"), vec!["A"]);
        assert_eq!(
            graph.get_all_neighbors("C").into_iter().collect_vec(),
            vec!["A", "B"]
        );

        assert_eq!(graph.get_out_degree("B"), 1);
        assert_eq!(graph.get_in_degree("B"), 1);
        assert_eq!(graph.get_degree("A"), 2);
        assert_eq!(graph.get_incident_edges("A").len(), 2);
        assert_eq!(graph.get_outgoing_edges("A")[0].target(), "B");
        assert_eq!(graph.get_incoming_edges("C")[0].source(), "B");

        assert!(graph.is_directed());
        assert!(!graph.is_weighted());
    }

    #[test]
    fn self_loops_count_twice() {
        let graph = graph_from("u A;\nu B;\nh A - A;\nh B > B;\nh A - B;");
        assert_eq!(graph.get_degree("A"), 3);
        assert_eq!(graph.get_degree("B"), 3);
        assert_eq!(graph.get_incident_edges("B").len(), 2);
        assert!(graph.has_self_loop());
        assert!(!graph.has_multiple_edges());
    }

    #[test]
    fn multiple_edges() {
        assert!(graph_from("u A;\nu B;\nh A - B;\nh B - A;").has_multiple_edges());
        assert!(graph_from("u A;\nu B;\nh A > B;\nh B < A;").has_multiple_edges());
        assert!(!graph_from("u A;\nu B;\nh A > B;\nh B > A;").has_multiple_edges());
    }

    #[test]
    fn reachability() {
        let graph = graph_from("u A;\nu B;\nu C;\nu D;\nh A > B;\nh B - C;");
        assert_eq!(graph.bfs("A").into_iter().collect_vec(), vec!["A", "B", "C"]);
        assert_eq!(graph.bfs("C").into_iter().collect_vec(), vec!["B", "C"]);
        assert_eq!(
            graph.bfs_undirected("C").into_iter().collect_vec(),
            vec!["A", "B", "C"]
        );
        assert_eq!(graph.bfs("D").into_iter().collect_vec(), vec!["D"]);
    }

    #[test]
    fn unknown_nodes_yield_defaults() {
        let graph = graph_from("u A;\nh A - A;");
        assert!(graph.get_neighbors("X").is_empty());
        assert!(graph.get_successors("X").is_empty());
        assert!(graph.get_all_neighbors("X").is_empty());
        assert!(graph.get_incident_edges("X").is_empty());
        assert_eq!(graph.get_degree("X"), 0);
        assert!(graph.bfs("X").is_empty());
        assert!(graph.bfs_undirected("X").is_empty());
        assert!(graph.node("X").is_none());
    }

    #[test]
    fn edge_labels() {
        let graph = graph_from("u A;\nu B;\nh A - B :road;\nh A > B;");
        assert_eq!(graph.edge_by_label("road").unwrap().0, 0);
        assert_eq!(graph.edge_by_label("e1").unwrap().0, 1);
        assert!(graph.edge_by_label("e0").is_none());
    }

    #[test]
    fn parser_diagnostics_are_kept() {
        let graph = graph_from("u A x;\nu B;\nh A - C;");
        let kinds = graph.diagnostics().iter().map(|d| d.kind).collect_vec();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::InvalidWeight, DiagnosticKind::DanglingEdge]
        );
    }

    #[test]
    fn degree_sum_matches_edge_ends() {
        let rng = &mut seeded_rng(7);
        for _ in 0..20 {
            let graph = random_graph(rng, 8, 20);
            let total: usize = graph.node_ids().map(|u| graph.get_degree(u)).sum();
            assert_eq!(total, 2 * graph.edge_count());
        }
    }
}
