use crate::PointId;
use thiserror::Error;

/// Errors raised while validating input, clustering, or doing file I/O around a run.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("number of clusters must be at least 1, got {0}")]
    InvalidClusterCount(usize),
    #[error("dataset contains no points")]
    EmptyDataset,
    #[error("dataset points have no coordinates")]
    ZeroDimensional,
    #[error("point {id} has {found} coordinates, expected {expected}")]
    RaggedPoint { id: PointId, expected: usize, found: usize },
    #[error("point {id} has a non-finite coordinate in dimension {dim}")]
    NonFiniteCoordinate { id: PointId, dim: usize },
    #[error("dimension {dim} cannot be normalized, its values exceed the floating point range")]
    NonFiniteNormalization { dim: usize },
    #[error("invalid stopping rule: limit {limit} must be at least 1 and threshold {threshold} greater than 0")]
    InvalidAbortStrategy { limit: usize, threshold: f64 },
    #[error("cannot compare vectors of different lengths ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },
    #[error("expected {expected} precomputed centroids, got {found}")]
    CentroidCount { expected: usize, found: usize },
    #[error("line {line}: `{field}` is not a number")]
    Parse {
        line: usize,
        field: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("plot script `{script}` failed: {reason}")]
    PlotScript { script: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ClusterError>;
