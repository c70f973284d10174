use std::{
    collections::BTreeMap,
    ops::{AddAssign, Mul},
};

use itertools::Itertools;
use num::{BigInt, One, Zero};
use serde::Serialize;
use tracing::trace;

use super::*;
use crate::{algo::*, edge::*, node::*, ops::*, repr::Graph};

/// Default highest power computed by [`MatrixBuilder::default_adjacency_matrix_powers`]
pub const DEFAULT_MAX_POWER: u32 = 3;

/// Computes matrices and lists of a graph.
///
/// Rows and columns of all node-indexed matrices follow the identifiers sorted lexicographically,
/// fixed once at construction. The graph is only read.
///
/// ```
/// use graphrec::prelude::*;
///
/// let graph = Graph::from_text("u B;\nu A;\nh A -> B;").unwrap();
/// let builder = MatrixBuilder::new(&graph);
///
/// let adjacency = builder.adjacency_matrix();
/// assert_eq!(adjacency.row_labels(), ["A", "B"]);
/// assert_eq!(adjacency.matrix().to_rows(), vec![vec![0, 1], vec![0, 0]]);
/// ```
#[derive(Debug, Clone)]
pub struct MatrixBuilder<'a> {
    graph: &'a Graph,
    /// Identifiers in matrix order
    node_list: Vec<&'a str>,
    /// `position[u]` is the row/column of graph node `u`
    position: Vec<usize>,
    max_power: u32,
}

/// Every matrix and list of a graph, keyed like the letter-coded report of the analyzer
#[derive(Debug, Clone, Serialize)]
pub struct MatrixReport<'a> {
    #[serde(rename = "a_adjacency_matrix")]
    pub adjacency_matrix: LabeledMatrix<i64>,
    #[serde(rename = "a_weighted_adjacency_matrix")]
    pub weighted_adjacency_matrix: LabeledMatrix<Weight>,
    #[serde(rename = "b_signed_matrix")]
    pub signed_matrix: LabeledMatrix<i64>,
    #[serde(rename = "c_matrix_powers")]
    pub matrix_powers: BTreeMap<u32, LabeledMatrix<BigInt>>,
    #[serde(rename = "d_incidence_matrix")]
    pub incidence_matrix: LabeledMatrix<i64>,
    #[serde(rename = "e_distance_matrix")]
    pub distance_matrix: LabeledMatrix<Weight>,
    #[serde(rename = "f_predecessor_matrix")]
    pub predecessor_matrix: LabeledMatrix<Option<NodeId>>,
    #[serde(rename = "g_incident_edges_table")]
    pub incident_edges_table: BTreeMap<NodeId, Vec<&'a Edge>>,
    #[serde(rename = "h_neighbor_list")]
    pub neighbor_list: BTreeMap<NodeId, Vec<NodeId>>,
    #[serde(rename = "i_node_list")]
    pub node_list: Vec<NodeId>,
    #[serde(rename = "i_edge_list")]
    pub edge_list: &'a [Edge],
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let order = graph
            .vertices()
            .sorted_by_key(|&u| graph.id_of(u))
            .collect_vec();

        let mut position = vec![0; order.len()];
        for (pos, &u) in order.iter().enumerate() {
            position[u as usize] = pos;
        }

        Self {
            graph,
            node_list: order.iter().map(|&u| graph.id_of(u)).collect(),
            position,
            max_power: DEFAULT_MAX_POWER,
        }
    }

    /// Sets the highest power used by [`MatrixBuilder::default_adjacency_matrix_powers`]
    /// and [`MatrixBuilder::build_all`]
    pub fn max_power(mut self, max_power: u32) -> Self {
        self.max_power = max_power;
        self
    }

    /// Node identifiers in row/column order
    pub fn node_list(&self) -> &[&'a str] {
        &self.node_list
    }

    /// Row/column of a node, if it exists
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.graph
            .index_of(node)
            .map(|u| self.position[u as usize])
    }

    fn row_labels(&self) -> Vec<NodeId> {
        self.node_list.iter().map(|s| s.to_string()).collect()
    }

    fn labeled<T>(&self, matrix: Matrix<T>) -> LabeledMatrix<T> {
        let labels = self.row_labels();
        LabeledMatrix::new(matrix, labels.clone(), labels)
    }

    /// Kept edges with the matrix positions of their `(source, target)`
    fn positioned_edges(&self) -> impl Iterator<Item = (&'a Edge, usize, usize)> + '_ {
        self.graph
            .edges()
            .iter()
            .zip(self.graph.edge_endpoints())
            .map(|(edge, (s, t))| (edge, self.position[s as usize], self.position[t as usize]))
    }

    /// Sums `value(edge)` over all edges from row to column;
    /// undirected edges count in both directions, but only once on the diagonal.
    fn accumulate<T, F>(&self, value: F) -> Matrix<T>
    where
        T: Copy + Zero + AddAssign,
        F: Fn(&Edge) -> T,
    {
        let n = self.node_list.len();
        let mut matrix = Matrix::zeros(n, n);
        for (edge, i, j) in self.positioned_edges() {
            let x = value(edge);
            matrix[(i, j)] += x;
            if !edge.is_directed() && i != j {
                matrix[(j, i)] += x;
            }
        }
        matrix
    }

    /// Entry `(i, j)` counts the edges from `i` to `j`
    pub fn adjacency_matrix(&self) -> LabeledMatrix<i64> {
        self.labeled(self.accumulate(|_| 1))
    }

    /// Entry `(i, j)` sums the weights of the edges from `i` to `j` (unweighted edges count `1`)
    pub fn weighted_adjacency_matrix(&self) -> LabeledMatrix<Weight> {
        self.labeled(self.accumulate(Edge::weight_or_unit))
    }

    /// Entry `(i, j)` is `1` if there is an edge from `i` to `j` and `0` otherwise
    pub fn signed_matrix(&self) -> LabeledMatrix<i64> {
        self.labeled(
            self.accumulate(|_| 1)
                .map(|&count: &i64| if count > 0 { 1 } else { 0 }),
        )
    }

    /// `matrix^power`; see [`Matrix::power`]
    /// ** Panics if the matrix is not square **
    pub fn matrix_power<T>(matrix: &Matrix<T>, power: u32) -> Matrix<T>
    where
        T: Clone + Zero + One + Mul<Output = T> + AddAssign,
    {
        matrix.power(power)
    }

    /// Powers `2..=max_power` of the adjacency matrix.
    /// Entry `(i, j)` of power `k` counts walks of length `k` from `i` to `j`; walk counts grow
    /// exponentially in `k` and are therefore unbounded integers.
    pub fn adjacency_matrix_powers(
        &self,
        max_power: u32,
    ) -> BTreeMap<u32, LabeledMatrix<BigInt>> {
        trace!(max_power, "computing adjacency matrix powers");
        let adjacency = self.accumulate(|_| 1i64).map(|&count| BigInt::from(count));

        let mut powers = BTreeMap::new();
        let mut current = adjacency.clone();
        for power in 2..=max_power {
            current = &current * &adjacency;
            powers.insert(power, self.labeled(current.clone()));
        }
        powers
    }

    /// Powers `2..=max_power` of the adjacency matrix for the configured maximum power
    pub fn default_adjacency_matrix_powers(&self) -> BTreeMap<u32, LabeledMatrix<BigInt>> {
        self.adjacency_matrix_powers(self.max_power)
    }

    /// Rows are nodes, columns are edges in parse order labeled by their display label.
    ///
    /// - Undirected edge: `1` in both endpoint rows
    /// - Directed edge: `1` in the source row, `-1` in the target row
    /// - Self-loop (directed or not): `2` in the row of its node
    pub fn incidence_matrix(&self) -> LabeledMatrix<i64> {
        let n = self.node_list.len();
        let m = self.graph.edge_count();

        let mut matrix = Matrix::zeros(n, m);
        for (col, (edge, s, t)) in self.positioned_edges().enumerate() {
            if edge.is_loop() {
                matrix[(s, col)] = 2;
            } else if edge.is_directed() {
                matrix[(s, col)] = 1;
                matrix[(t, col)] = -1;
            } else {
                matrix[(s, col)] = 1;
                matrix[(t, col)] = 1;
            }
        }

        let col_labels = self
            .graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| edge.display_label(i))
            .collect();

        LabeledMatrix::new(matrix, self.row_labels(), col_labels)
    }

    /// All-pairs shortest paths over matrix positions.
    /// Unweighted edges have length `1`, undirected edges are usable both ways.
    pub fn shortest_paths(&self) -> ShortestPaths {
        let mut fw = FloydWarshall::new(self.node_list.len());
        for (edge, i, j) in self.positioned_edges() {
            let weight = edge.weight_or_unit();
            fw.add_arc(i, j, weight);
            if !edge.is_directed() {
                fw.add_arc(j, i, weight);
            }
        }
        fw.run()
    }

    /// Entry `(i, j)` is the length of a shortest path from `i` to `j`,
    /// `0` on the diagonal and infinity if `j` is unreachable
    pub fn distance_matrix(&self) -> LabeledMatrix<Weight> {
        self.labeled(self.shortest_paths().distances().clone())
    }

    /// Entry `(i, j)` is the node preceding `j` on a shortest path from `i`,
    /// `None` on the diagonal and for unreachable pairs
    pub fn predecessor_matrix(&self) -> LabeledMatrix<Option<NodeId>> {
        let paths = self.shortest_paths();
        self.labeled(
            paths
                .predecessors()
                .map(|pred| pred.map(|p| self.node_list[p].to_string())),
        )
    }

    /// A shortest path from `from` to `to` (both included), or `None` if either node does not
    /// exist or `to` is unreachable
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<NodeId>> {
        let (i, j) = (self.index_of(from)?, self.index_of(to)?);
        let path = self.shortest_paths().path(i, j)?;
        Some(path.into_iter().map(|p| self.node_list[p].to_string()).collect())
    }

    /// Sorted direction-agnostic neighbors of every node
    pub fn neighbor_list(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        self.node_list
            .iter()
            .map(|&node| {
                let neighbors = self
                    .graph
                    .get_all_neighbors(node)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (node.to_string(), neighbors)
            })
            .collect()
    }

    /// Edges incident to every node in parse order; a self-loop is listed once
    pub fn incident_edges_table(&self) -> BTreeMap<NodeId, Vec<&'a Edge>> {
        let mut table: BTreeMap<NodeId, Vec<&'a Edge>> = self
            .node_list
            .iter()
            .map(|&node| (node.to_string(), Vec::new()))
            .collect();

        for edge in self.graph.edges() {
            if let Some(edges) = table.get_mut(edge.node1()) {
                edges.push(edge);
            }
            if !edge.is_loop() {
                if let Some(edges) = table.get_mut(edge.node2()) {
                    edges.push(edge);
                }
            }
        }
        table
    }

    /// Node identifiers in matrix order and edges in parse order
    pub fn node_and_edge_list(&self) -> (Vec<NodeId>, &'a [Edge]) {
        (self.row_labels(), self.graph.edges())
    }

    /// Computes every matrix and list
    pub fn build_all(&self) -> MatrixReport<'a> {
        let (node_list, edge_list) = self.node_and_edge_list();
        MatrixReport {
            adjacency_matrix: self.adjacency_matrix(),
            weighted_adjacency_matrix: self.weighted_adjacency_matrix(),
            signed_matrix: self.signed_matrix(),
            matrix_powers: self.default_adjacency_matrix_powers(),
            incidence_matrix: self.incidence_matrix(),
            distance_matrix: self.distance_matrix(),
            predecessor_matrix: self.predecessor_matrix(),
            incident_edges_table: self.incident_edges_table(),
            neighbor_list: self.neighbor_list(),
            node_list,
            edge_list,
        }
    }
}
