use serde::{Serialize, Deserialize};

/// Summary of a Monte Carlo threshold experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)] // Derive traits for easy saving/loading
pub struct ThresholdReport {
    /// Side length n of the n x n grid.
    pub grid_size: usize,
    /// Number of independent trials m.
    pub trials: usize,
    /// Base seed the trials were derived from.
    pub seed: u64,
    /// Sample mean of the thresholds.
    pub mean: f64,
    /// Sample standard deviation (divisor m - 1); `None` for a single trial.
    pub stddev: Option<f64>,
    /// Low endpoint of the 95% confidence interval; `None` for a single trial.
    pub confidence_low: Option<f64>,
    /// High endpoint of the 95% confidence interval; `None` for a single trial.
    pub confidence_high: Option<f64>,
    /// One threshold per trial, in trial order.
    pub samples: Vec<f64>,
}
