/*!
`graphrec` reads graphs written in a small line-oriented text notation and computes their
classic matrices and structural properties.

# Notation

```text
# a comment
u A;            declares node A
u B 2.5;        declares node B with weight 2.5
u *;            placeholder, kept as a raw declaration only
h A -> B 3 :x;  directed edge from A to B with weight 3 and label x
h A < B;        directed edge from B to A
h A - B;        undirected edge
```

See [`io`] for the precise grammar. Problems that do not prevent reading a graph are reported
as [`Diagnostics`](crate::diagnostics::Diagnostics) next to the result; only an edge line
without operator aborts reading with a [`ParseError`](crate::io::ParseError).

# Representation

A [`Graph`](crate::repr::Graph) is immutable once built. Nodes are addressed by their
identifiers in the public API and by dense `u32` indices in `0..n` (in declaration order)
internally. Edges may be directed or undirected, weighted or labelled; self-loops and parallel
edges are kept.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, basic graph operations, the graph, the
  analyzer and the matrix builder,
- [`algo`] includes algorithm traits that are implemented on graphs itself such as BFS,
  connectivity, bipartition, as well as Floyd-Warshall all-pairs shortest paths,
- [`analyzer`] classifies a graph by ten properties (weighted, directed, connected, simple,
  loop-free, planar, finite, complete, regular, bipartite),
- [`matrix`] computes adjacency, signed, incidence, distance and predecessor matrices,
  powers of the adjacency matrix, and neighbor/incidence lists.

```
use graphrec::prelude::*;

let graph = Graph::from_text("u A;\nu B;\nu C;\nh A -> B 2;\nh B - C;").unwrap();

let report = GraphAnalyzer::new(&graph).analyze_all();
assert!(report.directed && report.weighted);

let distances = MatrixBuilder::new(&graph).distance_matrix();
assert_eq!(distances[(0, 2)], 3.0);
```

In most use-cases, `use graphrec::prelude::*;` suffices for your needs.
*/

pub mod algo;
pub mod analyzer;
pub mod diagnostics;
pub mod edge;
pub mod io;
pub mod matrix;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;

/// `graphrec::prelude` includes definitions for nodes and edges, all basic graph operation
/// traits, the graph itself, the analyzer and the matrix builder.
pub mod prelude {
    pub use super::{
        analyzer::*,
        diagnostics::*,
        edge::*,
        io::{GraphReader, ParseError, ParsedGraph, TextReader},
        matrix::*,
        node::*,
        ops::*,
        repr::*,
    };
}
