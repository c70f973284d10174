/*!
# Graph Algorithms

Algorithms working on the index-level traits of [`ops`](crate::ops).
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use graphrec::algo::*;
```
and gain access to traversal, connectivity, bipartition and all-pairs shortest paths.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod bipartite;
mod connectivity;
mod shortest_paths;
mod traversal;

use crate::prelude::*;

pub use bipartite::*;
pub use connectivity::*;
pub use shortest_paths::*;
pub use traversal::*;
