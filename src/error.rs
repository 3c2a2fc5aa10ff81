use thiserror::Error;

/// Contract violations reported by the percolation models and the statistics driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercolationError {
    /// A size or count that must be positive was not.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A coordinate outside `[0, n)`. Kept signed so negative input is reported as given.
    #[error("site ({i}, {j}) is out of range for a {n} x {n} grid")]
    OutOfRange { i: i64, j: i64, n: usize },
}

pub type Result<T> = std::result::Result<T, PercolationError>;
