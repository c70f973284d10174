/*!
# Graph Representation

A [`Graph`] is built once from parsed declarations and never mutated afterwards.
It stores its live nodes in declaration order (each identified by a dense [`NodeIdx`]),
the kept edges in parse order, and three adjacency indexes:

- the adjacency list: undirected edges in both directions, directed edges from source to target,
- the out-neighbor list: directed edges only,
- the in-neighbor list: directed edges only.

The identifier-based query API never fails: unknown nodes yield empty results.
*/

use smallvec::SmallVec;

use crate::{edge::*, node::*};

mod graph;

pub use graph::*;

/// Neighborhood entry `(neighbor, edge)`; most nodes of the small graphs we deal with
/// have few neighbors, so they are stored inline.
pub type Neighborhood = SmallVec<[(NodeIdx, EdgeIdx); 4]>;
