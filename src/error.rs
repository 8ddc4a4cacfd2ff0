use thiserror::Error;

/// Top-level error type for the curvalign kernel.
#[derive(Debug, Error)]
pub enum CurvalignError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Align(#[from] AlignError),
}

/// Errors related to curve construction and arclength queries.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("curve requires at least 2 points, got {count}")]
    InvalidPointCount { count: usize },

    #[error("flat coordinate array of length {len} is not a whole number of 3D points")]
    DimensionMismatch { len: usize },

    #[error("arclength {value} is out of range [0, {max}]")]
    ArcLengthOutOfRange { value: f64, max: f64 },

    #[error(
        "resampling to {requested} points would discard detail from {current}; \
         set allow_lossy to permit this"
    )]
    LossyResampleRejected { requested: usize, current: usize },
}

/// Errors related to spatial index queries.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("nearest-neighbor query on an empty index")]
    EmptyIndex,
}

/// Errors related to rigid alignment.
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("point counts differ: reference has {reference}, curve has {curve}")]
    PointCountMismatch { reference: usize, curve: usize },

    #[error("degenerate curve: all points coincide with the centroid")]
    DegenerateCurve,

    #[error("singular value decomposition did not converge")]
    SvdFailed,
}

/// Convenience type alias for results using [`CurvalignError`].
pub type Result<T> = std::result::Result<T, CurvalignError>;
