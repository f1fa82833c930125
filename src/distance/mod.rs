//! Quality measures compare the pairwise distances of a dataset before and
//! after an embedding. Callers may hand in either the raw coordinates or an
//! already computed distance matrix for each side; this module turns both
//! into the canonical `(high, low, high - low)` triple the measures work on.

use anyhow::bail;
use ndarray::{Array2, ArrayView2, Axis, CowArray, Ix2};
use rayon::prelude::*;

use crate::error::QualityError;
use crate::utils::ensure_square;

mod metric;
pub use metric::DistanceMetric;

/// One side (high or low) of an evaluation.
#[derive(Debug, Clone, Copy)]
pub enum DistanceInput<'a> {
    /// Coordinates, one point per row.
    Data(ArrayView2<'a, f64>),
    /// A square pairwise distance matrix, used as is.
    Distances(ArrayView2<'a, f64>),
}

impl<'a> DistanceInput<'a> {
    pub fn n_points(&self) -> usize {
        match self {
            DistanceInput::Data(data) => data.nrows(),
            DistanceInput::Distances(distances) => distances.nrows(),
        }
    }

    /// Produce the distance matrix for this side.
    ///
    /// Precomputed distances are borrowed, not copied. `side` is used in error
    /// messages (`"high"` / `"low"`).
    pub fn resolve(
        self,
        metric: DistanceMetric,
        side: &str,
    ) -> anyhow::Result<CowArray<'a, f64, Ix2>> {
        match self {
            DistanceInput::Data(data) => Ok(CowArray::from(pairwise_distances(data, metric))),
            DistanceInput::Distances(distances) => {
                ensure_square(distances, &format!("{}_distances", side))?;
                Ok(CowArray::from(distances))
            }
        }
    }
}

/// Full pairwise distance matrix between the rows of `data`.
///
/// The diagonal is exactly zero. Rows are computed in parallel.
pub fn pairwise_distances(data: ArrayView2<f64>, metric: DistanceMetric) -> Array2<f64> {
    let n = data.nrows();
    let mut distances = Array2::zeros((n, n));

    distances
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let point = data.row(i);
            for j in 0..n {
                if i != j {
                    row[j] = metric.distance(point, data.row(j));
                }
            }
        });

    distances
}

/// Canonical distances of an evaluation.
#[derive(Debug, Clone)]
pub struct DistanceDifferences<'a> {
    pub high: CowArray<'a, f64, Ix2>,
    pub low: CowArray<'a, f64, Ix2>,
    /// `high - low`, freshly allocated.
    pub difference: Array2<f64>,
}

impl<'a> DistanceDifferences<'a> {
    pub fn n_points(&self) -> usize {
        self.high.nrows()
    }

    pub fn into_tuple(
        self,
    ) -> (CowArray<'a, f64, Ix2>, CowArray<'a, f64, Ix2>, Array2<f64>) {
        (self.high, self.low, self.difference)
    }
}

/// Resolve both sides of an evaluation to distance matrices.
///
/// Both sides are required. Precomputed distance matrices must be square and
/// are passed through untouched; raw data is turned into distances with
/// `metric`. Both sides must describe the same number of points.
pub fn pairwise_distance_differences<'a>(
    high: Option<DistanceInput<'a>>,
    low: Option<DistanceInput<'a>>,
    metric: DistanceMetric,
) -> anyhow::Result<DistanceDifferences<'a>> {
    let (high, low) = match (high, low) {
        (Some(high), Some(low)) => (high, low),
        (None, None) => bail!(QualityError::missing(
            "no high (high_data/high_distances) or low (low_data/low_distances) representation given"
        )),
        (None, Some(_)) => bail!(QualityError::missing(
            "high_data or high_distances is required"
        )),
        (Some(_), None) => bail!(QualityError::missing(
            "low_data or low_distances is required"
        )),
    };

    let high = high.resolve(metric, "high")?;
    let low = low.resolve(metric, "low")?;

    if high.dim() != low.dim() {
        bail!(QualityError::malformed(format!(
            "high and low representations describe a different number of points ({} vs {})",
            high.nrows(),
            low.nrows()
        )));
    }

    let difference = &high - &low;
    log::trace!(
        "resolved {} x {} distance matrices ({})",
        difference.nrows(),
        difference.ncols(),
        metric
    );

    Ok(DistanceDifferences {
        high,
        low,
        difference,
    })
}
