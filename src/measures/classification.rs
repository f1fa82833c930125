use anyhow::bail;
use ndarray::{Array1, ArrayView2};

use crate::distance::DistanceInput;
use crate::error::QualityError;
use crate::measures::QualityArgs;
use crate::rank::{rank_matrix, rank_to_knn};

/// Leave-one-out 1-nearest-neighbor misclassification indicator per point:
/// `1.0` when the nearest other point carries a different label, else `0.0`.
///
/// The nearest neighbor is read off the rank matrix, so ties go to the lower
/// index.
pub fn point_one_nearest_neighbor_error_from_distances<L: PartialEq>(
    distances: ArrayView2<f64>,
    classes: &[L],
) -> anyhow::Result<Array1<f64>> {
    let ranks = rank_matrix(distances)?;
    let n = ranks.nrows();
    if classes.len() != n {
        bail!(QualityError::malformed(format!(
            "got {} class labels for {} points",
            classes.len(),
            n
        )));
    }
    if n < 2 {
        bail!(QualityError::malformed(
            "1-nearest-neighbor error needs at least two points"
        ));
    }

    let nearest = rank_to_knn(ranks.view(), 1)?;
    Ok(Array1::from_shape_fn(n, |i| {
        if classes[nearest[[i, 0]]] == classes[i] {
            0.0
        } else {
            1.0
        }
    }))
}

/// Leave-one-out 1-nearest-neighbor classification error rate on a
/// precomputed distance matrix.
pub fn one_nearest_neighbor_error_from_distances<L: PartialEq>(
    distances: ArrayView2<f64>,
    classes: &[L],
) -> anyhow::Result<f64> {
    let misses = point_one_nearest_neighbor_error_from_distances(distances, classes)?;
    Ok(misses.sum() / misses.len() as f64)
}

/// Per-point 1-NN misses of the low representation (or the high one when no
/// low representation is set). Requires `classes`.
pub fn point_one_nearest_neighbor_error(args: &QualityArgs) -> anyhow::Result<Array1<f64>> {
    let (input, side) = match (args.get_low(), args.get_high()) {
        (Some(low), _) => (low, "low"),
        (None, Some(high)) => (high, "high"),
        (None, None) => bail!(QualityError::missing(
            "data (low_data/low_distances or high_data/high_distances) is required"
        )),
    };
    let Some(classes) = args.get_classes() else {
        bail!(QualityError::missing("classes are required"));
    };

    log::debug!(
        "1-NN error on the {} representation of {} points",
        side,
        input.n_points()
    );
    let distances = input.resolve(args.get_metric(), side)?;
    point_one_nearest_neighbor_error_from_distances(distances.view(), classes)
}

/// Leave-one-out 1-nearest-neighbor classification error rate.
///
/// Evaluates the low representation when one is set, otherwise the high one.
/// Requires `classes`.
pub fn one_nearest_neighbor_error(args: &QualityArgs) -> anyhow::Result<f64> {
    let misses = point_one_nearest_neighbor_error(args)?;
    Ok(misses.sum() / misses.len() as f64)
}

/// Convenience wrapper taking coordinates directly.
pub fn one_nearest_neighbor_error_from_data<'a>(
    data: ArrayView2<'a, f64>,
    classes: &'a [usize],
) -> anyhow::Result<f64> {
    one_nearest_neighbor_error(
        &QualityArgs::new()
            .low(DistanceInput::Data(data))
            .classes(classes),
    )
}
