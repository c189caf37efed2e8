use thiserror::Error;

use crate::error::CanvasError;

/// Errors raised while building or querying a `KnnClassifier`.
#[derive(Debug, Error)]
pub enum KnnError {
    /// A training or query image could not be read or decoded.
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("k must be at least 1")]
    InvalidK,

    #[error("k = {k} exceeds the {available} available training samples")]
    NotEnoughSamples { k: usize, available: usize },

    #[error(
        "canvas size mismatch: expected {}x{}, found {}x{}",
        expected.0, expected.1, found.0, found.1
    )]
    SizeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

pub type KnnResult<T> = std::result::Result<T, KnnError>;
