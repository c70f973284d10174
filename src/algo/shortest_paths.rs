/*!
All-pairs shortest paths via Floyd-Warshall.

Positions `0..n` used here are plain matrix positions; callers decide how nodes map onto them.
*/

use tracing::trace;

use super::*;

/// Builder for a Floyd-Warshall run.
///
/// Add every arc via [`FloydWarshall::add_arc`], then call [`FloydWarshall::run`].
///
/// ```
/// use graphrec::algo::FloydWarshall;
///
/// let mut fw = FloydWarshall::new(3);
/// fw.add_arc(0, 1, 1.0);
/// fw.add_arc(1, 2, 2.0);
/// fw.add_arc(0, 2, 5.0);
///
/// let paths = fw.run();
/// assert_eq!(paths.distance(0, 2), 3.0);
/// assert_eq!(paths.path(0, 2), Some(vec![0, 1, 2]));
/// assert!(paths.distance(2, 0).is_infinite());
/// ```
#[derive(Debug, Clone)]
pub struct FloydWarshall {
    dist: Matrix<Weight>,
    pred: Matrix<Option<usize>>,
}

impl FloydWarshall {
    /// Creates an instance over `n` positions without arcs:
    /// distance `0` on the diagonal and infinity everywhere else.
    pub fn new(n: usize) -> Self {
        let mut dist = Matrix::filled(n, n, Weight::INFINITY);
        for i in 0..n {
            dist[(i, i)] = 0.0;
        }
        Self {
            dist,
            pred: Matrix::filled(n, n, None),
        }
    }

    /// Adds an arc `u -> v`. Keeps the lighter one of parallel arcs;
    /// an arc only replaces the current entry if it is strictly shorter.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_arc(&mut self, u: usize, v: usize, weight: Weight) {
        if weight < self.dist[(u, v)] {
            self.dist[(u, v)] = weight;
            self.pred[(u, v)] = Some(u);
        }
    }

    /// Relaxes all pairs over every intermediate position
    pub fn run(mut self) -> ShortestPaths {
        let n = self.dist.number_of_rows();
        trace!(n, "running Floyd-Warshall");

        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let (dik, dkj) = (self.dist[(i, k)], self.dist[(k, j)]);
                    if dik == Weight::INFINITY || dkj == Weight::INFINITY {
                        continue;
                    }
                    if dik + dkj < self.dist[(i, j)] {
                        self.dist[(i, j)] = dik + dkj;
                        self.pred[(i, j)] = self.pred[(k, j)];
                    }
                }
            }
        }

        ShortestPaths {
            dist: self.dist,
            pred: self.pred,
        }
    }
}

/// Result of a Floyd-Warshall run
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    dist: Matrix<Weight>,
    pred: Matrix<Option<usize>>,
}

impl ShortestPaths {
    /// Length of a shortest path from `i` to `j`; infinity if `j` is unreachable
    pub fn distance(&self, i: usize, j: usize) -> Weight {
        self.dist[(i, j)]
    }

    /// Position preceding `j` on a shortest path from `i`
    pub fn predecessor(&self, i: usize, j: usize) -> Option<usize> {
        self.pred[(i, j)]
    }

    pub fn distances(&self) -> &Matrix<Weight> {
        &self.dist
    }

    pub fn predecessors(&self) -> &Matrix<Option<usize>> {
        &self.pred
    }

    /// Reconstructs a shortest path from `i` to `j` (both included) by walking the
    /// predecessors back from `j`. Returns `None` if `j` is unreachable, or if the walk
    /// does not return to `i` within `n` steps (negative cycles).
    pub fn path(&self, i: usize, j: usize) -> Option<Vec<usize>> {
        if i == j {
            return Some(vec![i]);
        }

        let n = self.dist.number_of_rows();
        let mut path = vec![j];
        let mut current = j;
        while current != i {
            current = self.pred[(i, current)]?;
            path.push(current);
            if path.len() > n {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parallel_arcs_keep_minimum() {
        let mut fw = FloydWarshall::new(2);
        fw.add_arc(0, 1, 4.0);
        fw.add_arc(0, 1, 2.0);
        fw.add_arc(0, 1, 3.0);
        let paths = fw.run();
        assert_eq!(paths.distance(0, 1), 2.0);
        assert_eq!(paths.predecessor(0, 1), Some(0));
        assert!(paths.distance(1, 0).is_infinite());
        assert_eq!(paths.predecessor(1, 0), None);
    }

    #[test]
    fn self_loops_do_not_change_diagonal() {
        let mut fw = FloydWarshall::new(1);
        fw.add_arc(0, 0, 1.0);
        let paths = fw.run();
        assert_eq!(paths.distance(0, 0), 0.0);
        assert_eq!(paths.predecessor(0, 0), None);
    }

    #[test]
    fn predecessors_along_a_chain() {
        let mut fw = FloydWarshall::new(4);
        for u in 0..3 {
            fw.add_arc(u, u + 1, 1.0);
        }
        let paths = fw.run();
        assert_eq!(paths.distance(0, 3), 3.0);
        assert_eq!(paths.predecessor(0, 3), Some(2));
        assert_eq!(paths.predecessor(0, 2), Some(1));
        assert_eq!(paths.path(0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(paths.path(3, 0), None);
        assert_eq!(paths.path(2, 2), Some(vec![2]));
    }
}
