use anyhow::bail;
use ndarray::{Array2, ArrayView2};
use num_traits::Float;

use crate::error::QualityError;

/// Elementwise (Hadamard) square of a matrix. Any shape is accepted.
pub fn square_matrix_entries<T: Float>(matrix: ArrayView2<T>) -> Array2<T> {
    matrix.mapv(|v| v * v)
}

/// The `n x n` centering matrix `J = I - 11ᵗ/n`.
///
/// Multiplying by `J` removes the mean from each column (left) or row (right).
pub fn centering_matrix(n: usize) -> Array2<f64> {
    let mut j = Array2::from_elem((n, n), -1.0 / n as f64);
    for i in 0..n {
        j[[i, i]] = 1.0 - 1.0 / n as f64;
    }
    j
}

/// Doubly center a square matrix: `-J * matrix * J / 2`.
///
/// Applied to a matrix of squared distances this yields the Gram matrix of
/// classical multidimensional scaling.
pub fn doubly_center_matrix(matrix: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
    let (m, n) = matrix.dim();
    if m != n {
        bail!(QualityError::malformed("Matrix must be square"));
    }
    let j = centering_matrix(m);
    let centered = j.dot(&matrix).dot(&j);
    Ok(centered.mapv(|v| -v / 2.0))
}
