use ndarray::{Array1, Array2, ArrayView2};

use crate::measures::QualityArgs;
use crate::rank::{rank_matrix, rank_to_knn};

/// Normalizing constant `G_k` of trustworthiness and continuity.
///
/// `n k (2n - 3k - 1)` for `k < n / 2`, otherwise `n (n - k) (n - k - 1)`
/// (Venna & Kaski). With penalties weighted by `2 / G_k` both measures stay in
/// `[0, 1]`.
pub fn trustworthiness_normalizing_factor(n_neighbors: usize, n_points: usize) -> f64 {
    let k = n_neighbors as f64;
    let n = n_points as f64;
    if k < n / 2.0 {
        n * k * (2.0 * n - 3.0 * k - 1.0)
    } else {
        n * (n - k) * (n - k - 1.0)
    }
}

/// Ranks and k-nearest-neighbor sets of both sides.
struct Neighborhoods {
    high_rank: Array2<usize>,
    low_rank: Array2<usize>,
    high_knn: Array2<usize>,
    low_knn: Array2<usize>,
    n_neighbors: usize,
}

impl Neighborhoods {
    fn from_args(args: &QualityArgs) -> anyhow::Result<Self> {
        let diffs = args.distances()?;
        let n_neighbors = args.require_n_neighbors()?;

        let high_rank = rank_matrix(diffs.high.view())?;
        let low_rank = rank_matrix(diffs.low.view())?;
        let high_knn = rank_to_knn(high_rank.view(), n_neighbors)?;
        let low_knn = rank_to_knn(low_rank.view(), n_neighbors)?;

        Ok(Neighborhoods {
            high_rank,
            low_rank,
            high_knn,
            low_knn,
            n_neighbors,
        })
    }
}

/// For every point, add `(rank[i, j] - k) * 2 / G_k` over the neighbors `j`
/// found in `candidates` but not in `reference`.
fn rank_violations(
    candidates: ArrayView2<usize>,
    reference: ArrayView2<usize>,
    reference_rank: ArrayView2<usize>,
    n_neighbors: usize,
) -> Array1<f64> {
    let n_points = reference_rank.nrows();
    let g_k = trustworthiness_normalizing_factor(n_neighbors, n_points);

    Array1::from_shape_fn(candidates.nrows(), |i| {
        let reference_row = reference.row(i);
        let mut score = 0.0;
        for &j in candidates.row(i) {
            if reference_row.iter().any(|&r| r == j) {
                continue;
            }
            let excess = reference_rank[[i, j]] as f64 - n_neighbors as f64;
            score += excess * 2.0 / g_k;
        }
        score
    })
}

/// Per-point contribution to `1 - trustworthiness`.
///
/// Penalizes the embedding neighbors of each point that are not among its
/// `n_neighbors` nearest neighbors in the high dimensional space, by how far
/// down the high dimensional ranking they are. Requires `n_neighbors`.
pub fn point_untrustworthiness(args: &QualityArgs) -> anyhow::Result<Array1<f64>> {
    let hood = Neighborhoods::from_args(args)?;
    Ok(rank_violations(
        hood.low_knn.view(),
        hood.high_knn.view(),
        hood.high_rank.view(),
        hood.n_neighbors,
    ))
}

/// Per-point contribution to `1 - continuity`.
///
/// The mirror of [`point_untrustworthiness`]: penalizes high dimensional
/// neighbors that are missing from the embedding neighborhood, weighted by
/// their rank in the embedding.
pub fn point_discontinuity(args: &QualityArgs) -> anyhow::Result<Array1<f64>> {
    let hood = Neighborhoods::from_args(args)?;
    Ok(rank_violations(
        hood.high_knn.view(),
        hood.low_knn.view(),
        hood.low_rank.view(),
        hood.n_neighbors,
    ))
}

/// Trustworthiness of an embedding, in `[0, 1]`.
///
/// When `point_scores` is set it is taken as precomputed
/// [`point_untrustworthiness`] and nothing else is needed.
pub fn trustworthiness(args: &QualityArgs) -> anyhow::Result<f64> {
    match args.get_point_scores() {
        Some(scores) => Ok(1.0 - scores.sum()),
        None => Ok(1.0 - point_untrustworthiness(args)?.sum()),
    }
}

/// Continuity of an embedding, in `[0, 1]`.
///
/// When `point_scores` is set it is taken as precomputed
/// [`point_discontinuity`] and nothing else is needed.
pub fn continuity(args: &QualityArgs) -> anyhow::Result<f64> {
    match args.get_point_scores() {
        Some(scores) => Ok(1.0 - scores.sum()),
        None => Ok(1.0 - point_discontinuity(args)?.sum()),
    }
}
