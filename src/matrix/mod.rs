/*!
# Matrices

Dense row-major matrices ([`Matrix`]) and matrices paired with their row and column labels
([`LabeledMatrix`]). The [`MatrixBuilder`] computes all graph matrices over a fixed node order.
*/

use std::ops::{AddAssign, Index, IndexMut, Mul};

use num::{One, Zero};
use serde::{Serialize, Serializer};

use crate::node::NodeId;

mod builder;

pub use builder::*;

/// A dense `rows x cols` matrix stored in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Creates a matrix with every entry set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates a matrix from its rows.
    /// ** Panics if the rows differ in length **
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "All rows must have the same length"
        );
        Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    /// Returns the rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows_iter().map(<[T]>::to_vec).collect()
    }

    /// Applies `f` to every entry
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Matrix<T> {
    pub fn number_of_rows(&self) -> usize {
        self.rows
    }

    pub fn number_of_cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the entry at `(i, j)` or `None` if out of bounds
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        (i < self.rows && j < self.cols).then(|| &self.data[i * self.cols + j])
    }

    /// Returns row `i` as a slice
    /// ** Panics if `i >= rows` **
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns an iterator over all rows
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(|i| self.row(i))
    }

    /// Returns an iterator over all entries in row-major order
    pub fn entries(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }
}

impl<T: Clone + Zero> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }
}

impl<T: Clone + Zero + One> Matrix<T> {
    /// The `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::zeros(n, n);
        for i in 0..n {
            matrix[(i, i)] = T::one();
        }
        matrix
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero + One + Mul<Output = T> + AddAssign,
{
    /// Standard matrix product `self * rhs`.
    /// ** Panics if `self.cols != rhs.rows` **
    pub fn multiply(&self, rhs: &Self) -> Self {
        assert_eq!(self.cols, rhs.rows, "Dimensions do not match");

        let mut result = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = &self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..rhs.cols {
                    result[(i, j)] += a.clone() * rhs[(k, j)].clone();
                }
            }
        }
        result
    }

    /// Computes `self^power` by repeated multiplication.
    /// `power = 0` yields the identity and `power = 1` a copy.
    /// For an adjacency matrix, entry `(i, j)` of the result counts walks of length `power`;
    /// use an unbounded `T` such as [`BigInt`](num::BigInt) when these may exceed fixed-width
    /// integers.
    /// ** Panics if the matrix is not square **
    pub fn power(&self, power: u32) -> Self {
        assert!(self.is_square(), "Only square matrices have powers");
        match power {
            0 => Self::identity(self.rows),
            _ => (1..power).fold(self.clone(), |acc, _| acc.multiply(self)),
        }
    }
}

impl<T> Mul for &Matrix<T>
where
    T: Clone + Zero + One + Mul<Output = T> + AddAssign,
{
    type Output = Matrix<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(i < self.rows && j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}

/// Serialized as a sequence of rows
impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows_iter())
    }
}

/// A matrix with the labels of its rows (nodes) and columns (nodes or edges)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMatrix<T> {
    matrix: Matrix<T>,
    row_labels: Vec<NodeId>,
    col_labels: Vec<String>,
}

impl<T> LabeledMatrix<T> {
    /// ** Panics if the number of labels does not match the dimensions **
    pub fn new(matrix: Matrix<T>, row_labels: Vec<NodeId>, col_labels: Vec<String>) -> Self {
        assert_eq!(matrix.number_of_rows(), row_labels.len());
        assert_eq!(matrix.number_of_cols(), col_labels.len());
        Self {
            matrix,
            row_labels,
            col_labels,
        }
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    pub fn row_labels(&self) -> &[NodeId] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }
}

impl<T> Index<(usize, usize)> for LabeledMatrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.matrix[index]
    }
}
