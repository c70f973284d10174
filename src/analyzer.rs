/*!
# Graph Properties

The [`GraphAnalyzer`] classifies a [`Graph`] by ten structural properties.
Every property is a pure function of the graph; properties with more than a yes/no answer
return a small result type carrying the details.

[`GraphAnalyzer::analyze_all`] bundles all of them into an [`AnalysisReport`] whose fields
serialize under fixed letter-coded keys (`a_weighted` to `j_bipartite`).
*/

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::{algo::*, node::*, ops::*, repr::Graph};

/// How a connected graph is connected
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityKind {
    /// Undirected graphs, empty graphs and disconnected graphs
    None,
    /// Every node reaches every other node along edge directions
    Strongly,
    /// Connected only when ignoring edge directions
    Weakly,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Connectedness {
    pub connected: bool,
    #[serde(rename = "type")]
    pub kind: ConnectivityKind,
}

/// The check that decided the planarity verdict
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanarityMethod {
    /// Fewer than 5 nodes
    VertexCount,
    /// More than `3n - 6` edges
    EulerFormula,
    /// Bipartite with more than `2n - 4` edges
    BipartiteFormula,
    /// None of the above rejected the graph
    BasicChecks,
}

/// Planarity verdict of the necessary-condition heuristic.
/// A `planar` verdict via [`PlanarityMethod::BasicChecks`] is not a proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Planarity {
    pub planar: bool,
    pub method: PlanarityMethod,
    pub note: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Regularity {
    pub regular: bool,
    /// The common degree; `None` if not regular or without nodes
    pub degree: Option<NumNodes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bipartiteness {
    pub bipartite: bool,
    /// Both sides as sorted identifier sets; `None` if not bipartite
    pub partition: Option<(BTreeSet<NodeId>, BTreeSet<NodeId>)>,
}

/// Result of every property, serialized with letter-coded keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    #[serde(rename = "a_weighted")]
    pub weighted: bool,
    #[serde(rename = "b_directed")]
    pub directed: bool,
    #[serde(rename = "c_connected")]
    pub connected: Connectedness,
    #[serde(rename = "d_simple")]
    pub simple: bool,
    #[serde(rename = "e_loop_free")]
    pub loop_free: bool,
    #[serde(rename = "f_planar")]
    pub planar: Planarity,
    #[serde(rename = "g_finite")]
    pub finite: bool,
    #[serde(rename = "h_complete")]
    pub complete: bool,
    #[serde(rename = "i_regular")]
    pub regular: Regularity,
    #[serde(rename = "j_bipartite")]
    pub bipartite: Bipartiteness,
}

/// Value of a single property in [`AnalysisReport::entries`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Connected(Connectedness),
    Planar(Planarity),
    Regular(Regularity),
    Bipartite(Bipartiteness),
}

impl AnalysisReport {
    /// The ten `(key, value)` pairs in key order
    pub fn entries(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("a_weighted", PropertyValue::Flag(self.weighted)),
            ("b_directed", PropertyValue::Flag(self.directed)),
            ("c_connected", PropertyValue::Connected(self.connected)),
            ("d_simple", PropertyValue::Flag(self.simple)),
            ("e_loop_free", PropertyValue::Flag(self.loop_free)),
            ("f_planar", PropertyValue::Planar(self.planar.clone())),
            ("g_finite", PropertyValue::Flag(self.finite)),
            ("h_complete", PropertyValue::Flag(self.complete)),
            ("i_regular", PropertyValue::Regular(self.regular)),
            ("j_bipartite", PropertyValue::Bipartite(self.bipartite.clone())),
        ]
    }
}

/// Computes structural properties of a graph.
///
/// ```
/// use graphrec::prelude::*;
///
/// let graph = Graph::from_text("u A;\nu B;\nu C;\nh A - B;\nh B - C;\nh C - A;").unwrap();
/// let analyzer = GraphAnalyzer::new(&graph);
///
/// assert!(analyzer.is_complete());
/// assert_eq!(analyzer.is_regular().degree, Some(2));
/// assert!(!analyzer.is_bipartite().bipartite);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct GraphAnalyzer<'a> {
    graph: &'a Graph,
}

impl<'a> GraphAnalyzer<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Any node or edge carries a weight
    pub fn is_weighted(&self) -> bool {
        self.graph.is_weighted()
    }

    /// Any edge is directed
    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    /// Graphs without nodes are connected.
    /// Undirected graphs are connected if a search from the first declared node reaches every
    /// node. Directed graphs are strongly connected if this holds for a search from every node
    /// along edge directions, and weakly connected if it holds when ignoring directions.
    pub fn is_connected(&self) -> Connectedness {
        let (connected, kind) = if self.graph.is_empty() {
            (true, ConnectivityKind::None)
        } else if self.graph.is_undirected() {
            (self.graph.is_connected_from_first(), ConnectivityKind::None)
        } else if self.graph.is_strongly_connected() {
            (true, ConnectivityKind::Strongly)
        } else if self.graph.is_weakly_connected() {
            (true, ConnectivityKind::Weakly)
        } else {
            (false, ConnectivityKind::None)
        };

        Connectedness { connected, kind }
    }

    /// No two edges share their normalized endpoints
    pub fn is_simple(&self) -> bool {
        !self.graph.has_multiple_edges()
    }

    /// Simple and without self-loops
    pub fn is_loop_free(&self) -> bool {
        !self.graph.has_self_loop() && !self.graph.has_multiple_edges()
    }

    /// Applies necessary conditions for planarity in a fixed order:
    /// fewer than 5 nodes, the Euler bound `m <= 3n - 6` and, for bipartite graphs,
    /// `m <= 2n - 4`. A graph passing all of them is reported as planar.
    pub fn is_planar(&self) -> Planarity {
        let n = self.graph.node_count();
        let m = self.graph.edge_count();

        if n < 5 {
            return Planarity {
                planar: true,
                method: PlanarityMethod::VertexCount,
                note: "graphs with fewer than 5 nodes are always planar".into(),
            };
        }

        if m > 3 * n - 6 {
            return Planarity {
                planar: false,
                method: PlanarityMethod::EulerFormula,
                note: format!("too many edges: {m} > 3*{n}-6 = {}", 3 * n - 6),
            };
        }

        if m > 2 * n - 4 && self.graph.is_bipartite() {
            return Planarity {
                planar: false,
                method: PlanarityMethod::BipartiteFormula,
                note: format!(
                    "too many edges for a bipartite graph: {m} > 2*{n}-4 = {}",
                    2 * n - 4
                ),
            };
        }

        Planarity {
            planar: true,
            method: PlanarityMethod::BasicChecks,
            note: "passed the basic planarity checks, which do not guarantee planarity".into(),
        }
    }

    /// Always *true*: graphs are read from finite input
    pub fn is_finite(&self) -> bool {
        true
    }

    /// Every node shares an edge with every other node, and there are exactly
    /// `n(n-1)/2` (undirected) or `n(n-1)` (directed) edges
    pub fn is_complete(&self) -> bool {
        let n = self.graph.node_count();
        if n <= 1 {
            return true;
        }

        let expected = if self.is_directed() {
            n * (n - 1)
        } else {
            n * (n - 1) / 2
        };

        self.graph.edge_count() == expected
            && self
                .graph
                .vertices()
                .all(|u| self.graph.distinct_neighbors_of(u).len() == n - 1)
    }

    /// All nodes have the same degree
    pub fn is_regular(&self) -> Regularity {
        match self.graph.degrees().all_equal_value() {
            Ok(degree) => Regularity {
                regular: true,
                degree: Some(degree),
            },
            Err(None) => Regularity {
                regular: true,
                degree: None,
            },
            Err(Some(_)) => Regularity {
                regular: false,
                degree: None,
            },
        }
    }

    /// 2-colors every weakly connected component, ignoring edge directions.
    /// Each component starts on the first side at its first declared node.
    pub fn is_bipartite(&self) -> Bipartiteness {
        match self.graph.compute_bipartition() {
            Some(bipartition) => {
                let id = |u: NodeIdx| self.graph.id_of(u).to_string();
                Bipartiteness {
                    bipartite: true,
                    partition: Some((
                        bipartition.left_side().map(id).collect(),
                        bipartition.right_side().map(id).collect(),
                    )),
                }
            }
            None => Bipartiteness {
                bipartite: false,
                partition: None,
            },
        }
    }

    /// Computes all ten properties
    pub fn analyze_all(&self) -> AnalysisReport {
        let report = AnalysisReport {
            weighted: self.is_weighted(),
            directed: self.is_directed(),
            connected: self.is_connected(),
            simple: self.is_simple(),
            loop_free: self.is_loop_free(),
            planar: self.is_planar(),
            finite: self.is_finite(),
            complete: self.is_complete(),
            regular: self.is_regular(),
            bipartite: self.is_bipartite(),
        };
        debug!(?report, "analyzed graph");
        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{diagnostics::DiagnosticKind, testing::*};

    fn set(ids: &[&str]) -> BTreeSet<NodeId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn undirected_triangle() {
        let graph = graph_from("u A;\nu B;\nu C;\nh A - B;\nh B - C;\nh C - A;");
        let report = GraphAnalyzer::new(&graph).analyze_all();

        assert!(!report.weighted);
        assert!(!report.directed);
        assert_eq!(
            report.connected,
            Connectedness {
                connected: true,
                kind: ConnectivityKind::None
            }
        );
        assert!(report.simple);
        assert!(report.loop_free);
        assert!(report.planar.planar);
        assert_eq!(report.planar.method, PlanarityMethod::VertexCount);
        assert!(report.finite);
        assert!(report.complete);
        assert_eq!(
            report.regular,
            Regularity {
                regular: true,
                degree: Some(2)
            }
        );
        assert!(!report.bipartite.bipartite);
        assert!(report.bipartite.partition.is_none());
    }

    #[test]
    fn single_directed_edge() {
        let graph = graph_from("u A;\nu B;\nh A -> B;");
        let analyzer = GraphAnalyzer::new(&graph);

        assert!(analyzer.is_directed());
        assert_eq!(
            analyzer.is_connected(),
            Connectedness {
                connected: true,
                kind: ConnectivityKind::Weakly
            }
        );
        assert!(!analyzer.is_complete());
        assert_eq!(analyzer.is_regular().degree, Some(1));
        assert_eq!(
            analyzer.is_bipartite().partition,
            Some((set(&["A"]), set(&["B"])))
        );
    }

    #[test]
    fn directed_cycle_is_strongly_connected_and_complete() {
        let graph = graph_from("u A;\nu B;\nh A > B;\nh B > A;");
        let analyzer = GraphAnalyzer::new(&graph);
        assert_eq!(analyzer.is_connected().kind, ConnectivityKind::Strongly);
        assert!(analyzer.is_complete());
        assert!(analyzer.is_simple());
    }

    #[test]
    fn disconnected() {
        let graph = graph_from("u A;\nu B;\nu C;\nh A - B;");
        let analyzer = GraphAnalyzer::new(&graph);
        assert!(!analyzer.is_connected().connected);
        assert_eq!(
            analyzer.is_regular(),
            Regularity {
                regular: false,
                degree: None
            }
        );
        assert_eq!(
            analyzer.is_bipartite().partition,
            Some((set(&["A", "C"]), set(&["B"])))
        );

        let graph = graph_from("u A;\nu B;\nu C;\nh A > B;");
        assert_eq!(
            GraphAnalyzer::new(&graph).is_connected(),
            Connectedness {
                connected: false,
                kind: ConnectivityKind::None
            }
        );
    }

    #[test]
    fn empty_graph() {
        let graph = graph_from("");
        let report = GraphAnalyzer::new(&graph).analyze_all();
        assert!(report.connected.connected);
        assert_eq!(report.connected.kind, ConnectivityKind::None);
        assert!(report.complete);
        assert_eq!(
            report.regular,
            Regularity {
                regular: true,
                degree: None
            }
        );
        assert_eq!(
            report.bipartite.partition,
            Some((BTreeSet::new(), BTreeSet::new()))
        );
    }

    #[test]
    fn duplicate_node_counts_once() {
        let graph = graph_from("u A;\nu A;\nu B;\nh A - B;");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.diagnostics().has(DiagnosticKind::DuplicateNode));
        assert!(GraphAnalyzer::new(&graph).is_complete());
    }

    #[test]
    fn loops_and_multiple_edges() {
        let graph = graph_from("u A;\nu B;\nh A - B;\nh B - A;");
        let analyzer = GraphAnalyzer::new(&graph);
        assert!(!analyzer.is_simple());
        assert!(!analyzer.is_loop_free());

        let graph = graph_from("u A;\nu B;\nh A - B;\nh A - A;");
        let analyzer = GraphAnalyzer::new(&graph);
        assert!(analyzer.is_simple());
        assert!(!analyzer.is_loop_free());
        assert!(!analyzer.is_bipartite().bipartite);
    }

    #[test]
    fn weights() {
        assert!(GraphAnalyzer::new(&graph_from("u A 2;")).is_weighted());
        assert!(GraphAnalyzer::new(&graph_from("u A;\nh A - A 1.5;")).is_weighted());
        assert!(!GraphAnalyzer::new(&graph_from("u A;\nh A - A :x;")).is_weighted());
    }

    #[test]
    fn planarity_checks() {
        let clique = |n: usize| {
            let mut text = (0..n).map(|u| format!("u v{u};\n")).join("");
            for (u, v) in (0..n).tuple_combinations() {
                text += &format!("h v{u} - v{v};\n");
            }
            graph_from(&text)
        };

        let k4 = clique(4);
        assert_eq!(
            GraphAnalyzer::new(&k4).is_planar().method,
            PlanarityMethod::VertexCount
        );

        let k5 = clique(5);
        let planarity = GraphAnalyzer::new(&k5).is_planar();
        assert!(!planarity.planar);
        assert_eq!(planarity.method, PlanarityMethod::EulerFormula);

        let mut k33 = (0..6).map(|u| format!("u v{u};\n")).join("");
        for u in 0..3 {
            for v in 3..6 {
                k33 += &format!("h v{u} - v{v};\n");
            }
        }
        let planarity = GraphAnalyzer::new(&graph_from(&k33)).is_planar();
        assert!(!planarity.planar);
        assert_eq!(planarity.method, PlanarityMethod::BipartiteFormula);

        let cycle = graph_from("u A;\nu B;\nu C;\nu D;\nu E;\nh A - B;\nh B - C;\nh C - D;\nh D - E;\nh E - A;");
        let planarity = GraphAnalyzer::new(&cycle).is_planar();
        assert!(planarity.planar);
        assert_eq!(planarity.method, PlanarityMethod::BasicChecks);
    }

    /// `K_{left,right}` without its first `missing` edges
    fn complete_bipartite(left: usize, right: usize, missing: usize) -> Graph {
        let mut text = (0..left + right).map(|u| format!("u v{u};\n")).join("");
        for (u, v) in (0..left)
            .cartesian_product(left..left + right)
            .skip(missing)
        {
            text += &format!("h v{u} - v{v};\n");
        }
        graph_from(&text)
    }

    #[test]
    fn planarity_thresholds() {
        // m == 3n - 6 passes the Euler bound
        let k5_minus_edge = graph_from(
            "u A;\nu B;\nu C;\nu D;\nu E;\nh A - B;\nh A - C;\nh A - D;\nh A - E;\n\
             h B - C;\nh B - D;\nh B - E;\nh C - D;\nh C - E;",
        );
        assert_eq!((k5_minus_edge.node_count(), k5_minus_edge.edge_count()), (5, 9));
        let planarity = GraphAnalyzer::new(&k5_minus_edge).is_planar();
        assert!(planarity.planar);
        assert_eq!(planarity.method, PlanarityMethod::BasicChecks);

        // bipartite with m == 2n - 4 passes the bipartite bound
        for (left, right) in [(2, 3), (2, 4)] {
            let graph = complete_bipartite(left, right, 0);
            assert_eq!(graph.edge_count(), 2 * graph.node_count() - 4);
            let planarity = GraphAnalyzer::new(&graph).is_planar();
            assert!(planarity.planar);
            assert_eq!(planarity.method, PlanarityMethod::BasicChecks);
        }

        // bipartite with m == 2n - 3 is rejected
        for (left, right, missing) in [(3, 3, 0), (3, 4, 1)] {
            let graph = complete_bipartite(left, right, missing);
            assert_eq!(graph.edge_count(), 2 * graph.node_count() - 3);
            assert!(graph.edge_count() <= 3 * graph.node_count() - 6);
            let planarity = GraphAnalyzer::new(&graph).is_planar();
            assert!(!planarity.planar);
            assert_eq!(planarity.method, PlanarityMethod::BipartiteFormula);
        }
    }

    #[test]
    fn report_serializes_with_letter_keys() {
        let graph = graph_from("u A;\nu B;\nh A > B 2;");
        let report = GraphAnalyzer::new(&graph).analyze_all();
        let json = serde_json::to_value(&report).unwrap();

        let keys = json.as_object().unwrap().keys().cloned().collect_vec();
        let expected = report.entries().into_iter().map(|(k, _)| k).collect_vec();
        assert_eq!(keys, expected);
        assert_eq!(
            expected,
            vec![
                "a_weighted",
                "b_directed",
                "c_connected",
                "d_simple",
                "e_loop_free",
                "f_planar",
                "g_finite",
                "h_complete",
                "i_regular",
                "j_bipartite"
            ]
        );

        assert_eq!(json["a_weighted"], serde_json::json!(true));
        assert_eq!(json["c_connected"]["type"], serde_json::json!("weakly"));
        assert_eq!(json["f_planar"]["method"], serde_json::json!("vertex_count"));
    }

    #[test]
    fn random_graph_consistency() {
        let rng = &mut seeded_rng(17);
        for _ in 0..50 {
            let graph = random_graph(rng, 6, 7);
            let analyzer = GraphAnalyzer::new(&graph);

            if analyzer.is_loop_free() {
                assert!(analyzer.is_simple());
            }
            if analyzer.is_connected().kind == ConnectivityKind::Strongly {
                assert!(analyzer.is_directed());
            }

            let bipartite = analyzer.is_bipartite();
            if let Some((left, right)) = bipartite.partition {
                assert_eq!(left.len() + right.len(), graph.node_count());
                assert!(left.is_disjoint(&right));
                for edge in graph.edges() {
                    assert_ne!(left.contains(edge.source()), left.contains(edge.target()));
                }
            }
        }
    }
}
