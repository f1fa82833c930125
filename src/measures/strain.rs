use anyhow::bail;
use ndarray::{Array1, Array2, Axis};

use crate::dense::{doubly_center_matrix, square_matrix_entries};
use crate::distance::DistanceDifferences;
use crate::error::QualityError;
use crate::measures::QualityArgs;

/// Strain of an embedding: `sqrt(Σ (B - low²)² / Σ B²)` where
/// `B = doubly_center_matrix(high²)`.
///
/// Fails with `DegenerateInput` when `Σ B²` is zero, e.g. for an all zero
/// high distance matrix.
pub fn strain(args: &QualityArgs) -> anyhow::Result<f64> {
    let diffs = args.distances()?;
    let (top, denominator) = strain_terms(&diffs)?;
    Ok((top.sum() / denominator).sqrt())
}

/// Row sums of the strain residual, normalized by the global `Σ B²`.
///
/// No square root is taken per point: the values add up to `strain²`.
pub fn point_strain(args: &QualityArgs) -> anyhow::Result<Array1<f64>> {
    let diffs = args.distances()?;
    let (top, denominator) = strain_terms(&diffs)?;
    Ok(top.sum_axis(Axis(1)) / denominator)
}

fn strain_terms(diffs: &DistanceDifferences) -> anyhow::Result<(Array2<f64>, f64)> {
    let b = doubly_center_matrix(square_matrix_entries(diffs.high.view()).view())?;
    let residual = &b - &square_matrix_entries(diffs.low.view());
    let top = square_matrix_entries(residual.view());

    let denominator = square_matrix_entries(b.view()).sum();
    if denominator == 0.0 {
        bail!(QualityError::degenerate(
            "strain is undefined when the doubly centered high distances are all zero"
        ));
    }
    Ok((top, denominator))
}
