use anyhow::bail;
use ndarray::{Array1, Axis};

use crate::dense::square_matrix_entries;
use crate::distance::DistanceDifferences;
use crate::error::QualityError;
use crate::measures::QualityArgs;

/// Normalized residual between high and low distances:
/// `sqrt(Σ (high - low)² / Σ high²)`.
///
/// Fails with [`QualityError::DegenerateInput`] when every high distance is
/// zero, including when both sides are all-zero matrices.
pub fn stress(args: &QualityArgs) -> anyhow::Result<f64> {
    let diffs = args.distances()?;
    let denominator = stress_denominator(&diffs)?;
    let top = square_matrix_entries(diffs.difference.view()).sum();
    Ok((top / denominator).sqrt())
}

/// Per-point stress: `sqrt(Σ_j (high - low)²_ij / Σ high²)` for each row `i`.
///
/// Every row is normalized by the global denominator, so the squares of the
/// point values add up to the square of [`stress`].
pub fn point_stress(args: &QualityArgs) -> anyhow::Result<Array1<f64>> {
    let diffs = args.distances()?;
    let denominator = stress_denominator(&diffs)?;
    let top = square_matrix_entries(diffs.difference.view()).sum_axis(Axis(1));
    Ok(top.mapv(|v| (v / denominator).sqrt()))
}

fn stress_denominator(diffs: &DistanceDifferences) -> anyhow::Result<f64> {
    let denominator = square_matrix_entries(diffs.high.view()).sum();
    if denominator == 0.0 {
        bail!(QualityError::degenerate(
            "stress is undefined when all high distances are zero"
        ));
    }
    Ok(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_stress_identical() {
        let d = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.5], [2.0, 1.5, 0.0]];
        let args = QualityArgs::new()
            .high_distances(d.view())
            .low_distances(d.view());
        assert_eq!(stress(&args).unwrap(), 0.0);
        assert_eq!(point_stress(&args).unwrap(), Array1::<f64>::zeros(3));
    }

    #[test]
    fn test_stress_value() {
        let high = array![[0.0, 3.0], [3.0, 0.0]];
        let low = array![[0.0, 1.0], [1.0, 0.0]];
        let args = QualityArgs::new()
            .high_distances(high.view())
            .low_distances(low.view());

        // Σ(high - low)² = 8, Σ high² = 18
        assert_relative_eq!(stress(&args).unwrap(), (8.0f64 / 18.0).sqrt());

        let points = point_stress(&args).unwrap();
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0], (4.0f64 / 18.0).sqrt());
        assert_relative_eq!(points[1], (4.0f64 / 18.0).sqrt());
    }

    #[test]
    fn test_point_stress_decomposition() {
        let high = array![[1.0, 2.0, 3.0], [-1.0, 0.5, 2.0], [4.0, 4.0, 4.0], [0.0, 0.0, 1.0]];
        let low = array![[1.0, 2.0], [0.0, 0.0], [3.0, -1.0], [2.0, 2.0]];
        let args = QualityArgs::new().high_data(high.view()).low_data(low.view());

        let total = stress(&args).unwrap();
        let points = point_stress(&args).unwrap();
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points.mapv(|v| v * v).sum(), total * total, max_relative = 1e-10);
    }

    #[test]
    fn test_stress_errors() {
        let zeros = Array2::<f64>::zeros((3, 3));
        let args = QualityArgs::new()
            .high_distances(zeros.view())
            .low_distances(zeros.view());
        for err in [stress(&args).unwrap_err(), point_stress(&args).unwrap_err()] {
            assert!(matches!(
                err.downcast_ref::<QualityError>(),
                Some(QualityError::DegenerateInput(_))
            ));
        }

        let err = stress(&QualityArgs::new().high_distances(zeros.view())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QualityError>(),
            Some(QualityError::MissingArgument(_))
        ));
    }
}
