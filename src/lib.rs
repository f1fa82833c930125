pub mod dense;
pub mod distance;
pub mod error;
pub mod measures;
pub mod rank;
pub mod registry;
mod utils;

pub use distance::{pairwise_distance_differences, pairwise_distances, DistanceInput, DistanceMetric};
pub use error::QualityError;
pub use measures::QualityArgs;
pub use rank::{rank_matrix, rank_to_knn, slower_rank_matrix};
pub use registry::{available_quality_measures, available_scorers, Estimator, QualityMeasure, ScoreParams, Scorer};
pub use utils::compare_distances;
