use std::cmp::Ordering;

use ndarray::ArrayView2;

use crate::error::QualityError;

/// Checks that `matrix` is square and returns its size.
///
/// `what` names the argument in the error message, e.g. `"high_distances"`.
pub(crate) fn ensure_square<T>(matrix: ArrayView2<T>, what: &str) -> anyhow::Result<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(QualityError::malformed(format!(
            "{} must be square, got a {}x{} matrix",
            what, rows, cols
        ))
        .into());
    }
    Ok(rows)
}

/// Total order on distances used by every ranking routine in the crate.
///
/// Numerically equal values compare equal (so `-0.0 == 0.0`), everything else
/// falls back to `f64::total_cmp`, which puts (positive) NaN after every
/// number.
#[inline]
pub fn compare_distances(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Neighborhood size actually available once the point itself is excluded.
#[inline]
pub(crate) fn effective_neighbors(n_points: usize, n_neighbors: usize) -> usize {
    n_neighbors.min(n_points.saturating_sub(1))
}
