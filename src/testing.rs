//! Helpers shared by the unit tests of all modules

use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::{edge::EDGE_OPERATORS, repr::Graph};

/// Parses `text` with the default reader
pub(crate) fn graph_from(text: &str) -> Graph {
    Graph::from_text(text).unwrap()
}

pub(crate) fn seeded_rng(seed: u64) -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(seed)
}

/// Generates the text of a graph with nodes `v0, ..., v{n-1}` and `m` random edges.
/// Edges use every operator, may be loops or parallel, and carry a small integral weight
/// half of the time.
pub(crate) fn random_graph_text<R: Rng>(rng: &mut R, n: usize, m: usize) -> String {
    assert!(n > 0);

    let nodes = (0..n).map(|u| format!("u v{u};")).join("\n");
    let edges = (0..m)
        .map(|_| {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            let op = EDGE_OPERATORS[rng.random_range(0..EDGE_OPERATORS.len())];
            if rng.random_bool(0.5) {
                format!("h v{u} {op} v{v} {};", rng.random_range(1..10))
            } else {
                format!("h v{u} {op} v{v};")
            }
        })
        .join("\n");

    format!("{nodes}\n{edges}")
}

pub(crate) fn random_graph<R: Rng>(rng: &mut R, n: usize, m: usize) -> Graph {
    graph_from(&random_graph_text(rng, n, m))
}
