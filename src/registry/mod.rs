//! Every quality measure under a stable name, plus scorers that evaluate a
//! fitted [`Estimator`] by embedding the data with it and measuring the
//! result. Scorers are oriented so that a higher value always means a better
//! embedding: measures where lower is better (stress, strain, 1-NN error) are
//! negated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use ndarray::{Array1, Array2, ArrayView2};

use crate::distance::DistanceMetric;
use crate::error::QualityError;
use crate::measures::{self, QualityArgs};

/// Something that learns an embedding from data and applies it.
pub trait Estimator {
    fn fit(&mut self, data: ArrayView2<f64>) -> anyhow::Result<()>;

    fn transform(&self, data: ArrayView2<f64>) -> anyhow::Result<Array2<f64>>;

    fn fit_transform(&mut self, data: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }
}

/// The registered quality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityMeasure {
    Stress,
    Strain,
    Trustworthiness,
    Continuity,
    OneNearestNeighborError,
}

impl QualityMeasure {
    pub const ALL: [QualityMeasure; 5] = [
        QualityMeasure::Stress,
        QualityMeasure::Strain,
        QualityMeasure::Trustworthiness,
        QualityMeasure::Continuity,
        QualityMeasure::OneNearestNeighborError,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QualityMeasure::Stress => "stress",
            QualityMeasure::Strain => "strain",
            QualityMeasure::Trustworthiness => "trustworthiness",
            QualityMeasure::Continuity => "continuity",
            QualityMeasure::OneNearestNeighborError => "1nn-error",
        }
    }

    pub fn greater_is_better(&self) -> bool {
        match self {
            QualityMeasure::Trustworthiness | QualityMeasure::Continuity => true,
            QualityMeasure::Stress
            | QualityMeasure::Strain
            | QualityMeasure::OneNearestNeighborError => false,
        }
    }

    pub fn requires_n_neighbors(&self) -> bool {
        matches!(
            self,
            QualityMeasure::Trustworthiness | QualityMeasure::Continuity
        )
    }

    /// Whether the measure scores a single representation against class
    /// labels instead of comparing two representations.
    pub fn requires_classes(&self) -> bool {
        matches!(self, QualityMeasure::OneNearestNeighborError)
    }

    /// Whole-dataset value of the measure.
    pub fn evaluate(&self, args: &QualityArgs) -> anyhow::Result<f64> {
        log::debug!("evaluating {}", self);
        match self {
            QualityMeasure::Stress => measures::stress(args),
            QualityMeasure::Strain => measures::strain(args),
            QualityMeasure::Trustworthiness => measures::trustworthiness(args),
            QualityMeasure::Continuity => measures::continuity(args),
            QualityMeasure::OneNearestNeighborError => measures::one_nearest_neighbor_error(args),
        }
    }

    /// Per-point contributions of the measure.
    ///
    /// For trustworthiness and continuity these are the penalties
    /// (untrustworthiness, discontinuity); for the 1-NN error a `0/1` miss
    /// indicator per point.
    pub fn evaluate_points(&self, args: &QualityArgs) -> anyhow::Result<Array1<f64>> {
        log::debug!("evaluating per-point {}", self);
        match self {
            QualityMeasure::Stress => measures::point_stress(args),
            QualityMeasure::Strain => measures::point_strain(args),
            QualityMeasure::Trustworthiness => measures::point_untrustworthiness(args),
            QualityMeasure::Continuity => measures::point_discontinuity(args),
            QualityMeasure::OneNearestNeighborError => {
                measures::point_one_nearest_neighbor_error(args)
            }
        }
    }
}

impl fmt::Display for QualityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityMeasure {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        available_quality_measures()
            .get(s)
            .copied()
            .ok_or_else(|| QualityError::UnknownName(format!("quality measure '{}'", s)))
    }
}

/// Parameters a scorer passes on to its measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreParams<'a> {
    n_neighbors: Option<usize>,
    metric: DistanceMetric,
    y: Option<&'a [usize]>,
}

impl<'a> ScoreParams<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = Some(n_neighbors);
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn y(mut self, y: &'a [usize]) -> Self {
        self.y = Some(y);
        self
    }
}

/// A measure wrapped so that higher scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scorer {
    measure: QualityMeasure,
}

impl Scorer {
    pub fn new(measure: QualityMeasure) -> Self {
        Scorer { measure }
    }

    pub fn measure(&self) -> QualityMeasure {
        self.measure
    }

    /// `1.0` for measures where higher is better, `-1.0` otherwise.
    pub fn sign(&self) -> f64 {
        if self.measure.greater_is_better() {
            1.0
        } else {
            -1.0
        }
    }

    /// Score an already fitted estimator on `high_data`.
    ///
    /// The estimator is only asked to `transform`; the embedding it returns is
    /// compared against `high_data` (or, for the 1-NN error, against `y`).
    pub fn score<E: Estimator + ?Sized>(
        &self,
        estimator: &E,
        high_data: ArrayView2<f64>,
        params: &ScoreParams,
    ) -> anyhow::Result<f64> {
        let low_data = estimator.transform(high_data)?;
        self.score_embedding(high_data, low_data.view(), params)
    }

    /// Fit the estimator on `high_data`, then score it.
    pub fn fit_score<E: Estimator + ?Sized>(
        &self,
        estimator: &mut E,
        high_data: ArrayView2<f64>,
        params: &ScoreParams,
    ) -> anyhow::Result<f64> {
        let low_data = estimator.fit_transform(high_data)?;
        self.score_embedding(high_data, low_data.view(), params)
    }

    /// Score an embedding that has already been computed.
    pub fn score_embedding(
        &self,
        high_data: ArrayView2<f64>,
        low_data: ArrayView2<f64>,
        params: &ScoreParams,
    ) -> anyhow::Result<f64> {
        log::debug!(
            "scoring {} ({} points, {} -> {} dimensions)",
            self.measure,
            high_data.nrows(),
            high_data.ncols(),
            low_data.ncols()
        );

        let mut args = QualityArgs::new()
            .high_data(high_data.view())
            .low_data(low_data.view())
            .metric(params.metric);
        if let Some(k) = params.n_neighbors {
            args = args.n_neighbors(k);
        }
        if let Some(y) = params.y {
            args = args.classes(y);
        }

        let value = self.measure.evaluate(&args)?;
        Ok(self.sign() * value)
    }
}

/// All quality measures by name.
pub fn available_quality_measures() -> &'static BTreeMap<&'static str, QualityMeasure> {
    static MEASURES: OnceLock<BTreeMap<&'static str, QualityMeasure>> = OnceLock::new();
    MEASURES.get_or_init(|| {
        QualityMeasure::ALL
            .iter()
            .map(|measure| (measure.name(), *measure))
            .collect()
    })
}

/// A scorer for every quality measure, under the same names.
pub fn available_scorers() -> &'static BTreeMap<&'static str, Scorer> {
    static SCORERS: OnceLock<BTreeMap<&'static str, Scorer>> = OnceLock::new();
    SCORERS.get_or_init(|| {
        available_quality_measures()
            .iter()
            .map(|(name, measure)| (*name, Scorer::new(*measure)))
            .collect()
    })
}
