//! A rank matrix orders, for every point, all other points by distance. Row `i`
//! holds rank `0` on the diagonal (the point itself) and ranks `1..n` for the
//! remaining columns in ascending distance order. Ties are broken by column
//! index, and distances are compared with [`compare_distances`].
//!
//! Two implementations are provided. [`rank_matrix`] sorts each row and is the
//! one used by the measures. [`slower_rank_matrix`] counts, for every entry, how
//! many entries of its row precede it. It exists as an independent reference
//! and must agree with [`rank_matrix`] on every input.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;

use crate::utils::{compare_distances, effective_neighbors, ensure_square};

/// Rank matrix of a square distance matrix, one row sorted at a time.
pub fn rank_matrix(distances: ArrayView2<f64>) -> anyhow::Result<Array2<usize>> {
    let n = ensure_square(distances, "distance matrix")?;
    let mut ranks = Array2::<usize>::zeros((n, n));

    ranks
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut rank_row)| {
            let row = distances.row(i);
            let mut order: Vec<usize> = (0..n).filter(|&j| j != i).collect();
            // sort_by is stable, so equal distances keep column order
            order.sort_by(|&a, &b| compare_distances(row[a], row[b]));
            for (position, j) in order.into_iter().enumerate() {
                rank_row[j] = position + 1;
            }
            rank_row[i] = 0;
        });

    log::trace!("computed {} x {} rank matrix", n, n);
    Ok(ranks)
}

/// Reference rank matrix computed by direct counting in `O(n³)`.
pub fn slower_rank_matrix(distances: ArrayView2<f64>) -> anyhow::Result<Array2<usize>> {
    let n = ensure_square(distances, "distance matrix")?;
    let mut ranks = Array2::<usize>::zeros((n, n));

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let mut preceding = 0;
            for m in 0..n {
                if m == i || m == j {
                    continue;
                }
                match compare_distances(distances[[i, m]], distances[[i, j]]) {
                    std::cmp::Ordering::Less => preceding += 1,
                    std::cmp::Ordering::Equal if m < j => preceding += 1,
                    _ => {}
                }
            }
            ranks[[i, j]] = preceding + 1;
        }
    }

    Ok(ranks)
}

/// The `n_neighbors` nearest neighbors of every point, read off a rank matrix.
///
/// Row `i` lists column indices in ascending rank order (ties by index); the
/// point itself is never included. When `n_neighbors` exceeds `n - 1` only the
/// `n - 1` available neighbors are returned.
pub fn rank_to_knn(ranks: ArrayView2<usize>, n_neighbors: usize) -> anyhow::Result<Array2<usize>> {
    let n = ensure_square(ranks, "rank matrix")?;
    let k = effective_neighbors(n, n_neighbors);
    if k < n_neighbors {
        log::warn!(
            "n_neighbors ({}) exceeds the {} available neighbors; using {}",
            n_neighbors,
            n.saturating_sub(1),
            k
        );
    }

    let mut knn = Array2::<usize>::zeros((n, k));
    knn.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut knn_row)| {
            let row = ranks.row(i);
            let mut order: Vec<usize> = (0..n).filter(|&j| j != i).collect();
            order.sort_by_key(|&j| row[j]);
            for (slot, j) in knn_row.iter_mut().zip(order) {
                *slot = j;
            }
        });

    Ok(knn)
}
