//! Measures that compare a high dimensional dataset with its low dimensional
//! embedding. Every measure has a whole-dataset form returning a scalar and a
//! per-point form returning one contribution per point.
//!
//! - **Stress** ([`stress`], [`point_stress`]): normalized residual between the
//!   two distance matrices. Lower is better.
//! - **Strain** ([`strain`], [`point_strain`]): residual after double centering
//!   the squared high distances. Lower is better.
//! - **Trustworthiness** ([`trustworthiness`], [`point_untrustworthiness`]):
//!   penalizes embedding neighbors that are far away in the original space.
//!   Higher is better, in `[0, 1]`.
//! - **Continuity** ([`continuity`], [`point_discontinuity`]): penalizes
//!   original neighbors that are lost in the embedding. Higher is better, in
//!   `[0, 1]`.
//! - **1-NN error** ([`one_nearest_neighbor_error`]): leave-one-out nearest
//!   neighbor classification error given class labels. Lower is better.
//!
//! All of them take a [`QualityArgs`], which plays the role of keyword
//! arguments: each side may be given as data or as distances, and only the
//! parameters a measure needs have to be set.

use anyhow::bail;
use ndarray::{ArrayView1, ArrayView2};

use crate::distance::{pairwise_distance_differences, DistanceDifferences, DistanceInput, DistanceMetric};
use crate::error::QualityError;

mod classification;
mod neighborhood;
mod strain;
mod stress;

pub use classification::{
    one_nearest_neighbor_error, one_nearest_neighbor_error_from_data,
    one_nearest_neighbor_error_from_distances, point_one_nearest_neighbor_error,
    point_one_nearest_neighbor_error_from_distances,
};
pub use neighborhood::{
    continuity, point_discontinuity, point_untrustworthiness, trustworthiness,
    trustworthiness_normalizing_factor,
};
pub use strain::{point_strain, strain};
pub use stress::{point_stress, stress};

/// Inputs of a quality measure.
///
/// ```ignore
/// let args = QualityArgs::new()
///     .high_data(x.view())
///     .low_distances(d.view())
///     .n_neighbors(5);
/// let t = trustworthiness(&args)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityArgs<'a> {
    high: Option<DistanceInput<'a>>,
    low: Option<DistanceInput<'a>>,
    point_scores: Option<ArrayView1<'a, f64>>,
    classes: Option<&'a [usize]>,
    n_neighbors: Option<usize>,
    metric: DistanceMetric,
}

impl<'a> QualityArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn high(mut self, high: DistanceInput<'a>) -> Self {
        self.high = Some(high);
        self
    }

    pub fn low(mut self, low: DistanceInput<'a>) -> Self {
        self.low = Some(low);
        self
    }

    pub fn high_data(self, data: ArrayView2<'a, f64>) -> Self {
        self.high(DistanceInput::Data(data))
    }

    pub fn low_data(self, data: ArrayView2<'a, f64>) -> Self {
        self.low(DistanceInput::Data(data))
    }

    pub fn high_distances(self, distances: ArrayView2<'a, f64>) -> Self {
        self.high(DistanceInput::Distances(distances))
    }

    pub fn low_distances(self, distances: ArrayView2<'a, f64>) -> Self {
        self.low(DistanceInput::Distances(distances))
    }

    pub fn point_scores(mut self, scores: ArrayView1<'a, f64>) -> Self {
        self.point_scores = Some(scores);
        self
    }

    pub fn classes(mut self, classes: &'a [usize]) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = Some(n_neighbors);
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn get_high(&self) -> Option<DistanceInput<'a>> {
        self.high
    }

    pub fn get_low(&self) -> Option<DistanceInput<'a>> {
        self.low
    }

    pub fn get_point_scores(&self) -> Option<ArrayView1<'a, f64>> {
        self.point_scores
    }

    pub fn get_classes(&self) -> Option<&'a [usize]> {
        self.classes
    }

    pub fn get_n_neighbors(&self) -> Option<usize> {
        self.n_neighbors
    }

    pub fn get_metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn distances(&self) -> anyhow::Result<DistanceDifferences<'a>> {
        pairwise_distance_differences(self.high, self.low, self.metric)
    }

    pub(crate) fn require_n_neighbors(&self) -> anyhow::Result<usize> {
        match self.n_neighbors {
            None => bail!(QualityError::missing("n_neighbors is required")),
            Some(0) => bail!(QualityError::malformed("n_neighbors must be at least 1")),
            Some(k) => Ok(k),
        }
    }
}
