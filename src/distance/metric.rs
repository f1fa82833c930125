use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;
use num_traits::{Float, ToPrimitive};

use crate::error::QualityError;

/// Pairwise distance used when a quality measure is given raw coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    SquaredEuclidean,
    Manhattan,
    Chebyshev,
    /// `1 - cos(a, b)`; a zero vector is at distance 1 from everything else.
    Cosine,
}

impl DistanceMetric {
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::SquaredEuclidean => "sqeuclidean",
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Chebyshev => "chebyshev",
            DistanceMetric::Cosine => "cosine",
        }
    }

    pub fn distance<T>(&self, a: ArrayView1<T>, b: ArrayView1<T>) -> f64
    where
        T: Float + ToPrimitive,
    {
        match self {
            DistanceMetric::Euclidean => squared_euclidean(a, b).sqrt(),
            DistanceMetric::SquaredEuclidean => squared_euclidean(a, b),
            DistanceMetric::Manhattan => {
                let mut dist = 0.0;
                for i in 0..a.len() {
                    dist += to_f64(a[i] - b[i]).abs();
                }
                dist
            }
            DistanceMetric::Chebyshev => {
                let mut dist = 0.0f64;
                for i in 0..a.len() {
                    dist = dist.max(to_f64(a[i] - b[i]).abs());
                }
                dist
            }
            DistanceMetric::Cosine => {
                let mut dot_product = 0.0;
                let mut norm_a = 0.0;
                let mut norm_b = 0.0;

                for i in 0..a.len() {
                    let (x, y) = (to_f64(a[i]), to_f64(b[i]));
                    dot_product += x * y;
                    norm_a += x * x;
                    norm_b += y * y;
                }

                if norm_a > 0.0 && norm_b > 0.0 {
                    1.0 - dot_product / (norm_a.sqrt() * norm_b.sqrt())
                } else if norm_a == norm_b {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }
}

fn squared_euclidean<T>(a: ArrayView1<T>, b: ArrayView1<T>) -> f64
where
    T: Float + ToPrimitive,
{
    let mut squared_dist = 0.0;
    for i in 0..a.len() {
        let diff = to_f64(a[i] - b[i]);
        squared_dist += diff * diff;
    }
    squared_dist
}

#[inline]
fn to_f64<T: ToPrimitive>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(DistanceMetric::Euclidean),
            "sqeuclidean" => Ok(DistanceMetric::SquaredEuclidean),
            "manhattan" | "cityblock" | "l1" => Ok(DistanceMetric::Manhattan),
            "chebyshev" => Ok(DistanceMetric::Chebyshev),
            "cosine" => Ok(DistanceMetric::Cosine),
            other => Err(QualityError::UnknownName(format!(
                "distance metric '{}'",
                other
            ))),
        }
    }
}
