use crate::error::{PercolationError, Result};
use crate::percolation::{check_size, Percolation, UfPercolation};
use log::{debug, info};
use percolation_common::ThresholdReport;
use rand::prelude::*;
use rayon::prelude::*;
use std::time::Instant;

/// z-score of the two-sided 95% normal interval.
const CONFIDENCE_95: f64 = 1.96;

/// Source of uniformly distributed integers.
pub trait UniformSource {
    /// Returns a value in `[0, bound)`.
    fn uniform(&mut self, bound: usize) -> usize;
}

impl<R: Rng> UniformSource for R {
    fn uniform(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Runs one experiment: opens uniformly random blocked sites of a fresh n x n
/// system until it percolates and returns the fraction of sites opened.
pub fn run_trial<P, R>(n: usize, rng: &mut R) -> Result<f64>
where
    P: Percolation,
    R: UniformSource + ?Sized,
{
    let mut perc = P::new(n)?;
    while !perc.percolates() {
        let i = rng.uniform(n);
        let j = rng.uniform(n);
        if !perc.is_open(i, j)? {
            perc.open(i, j)?;
        }
    }
    Ok(perc.number_of_open_sites() as f64 / (n * n) as f64)
}

/// Monte Carlo estimate of the percolation threshold over m independent trials.
#[derive(Debug, Clone)]
pub struct PercolationStats {
    n: usize,
    seed: u64,
    samples: Vec<f64>,
}

impl PercolationStats {
    /// Performs m independent experiments on an n x n system, seeded from entropy.
    pub fn new(n: usize, m: usize) -> Result<Self> {
        Self::with_seed(n, m, rand::rng().random())
    }

    /// Performs m independent experiments; trial k draws from `StdRng` seeded with `seed + k`.
    pub fn with_seed(n: usize, m: usize, seed: u64) -> Result<Self> {
        if n == 0 || m == 0 {
            return Err(PercolationError::InvalidArgument(format!(
                "grid size and trial count must be positive, got n = {n}, m = {m}"
            )));
        }
        check_size(n)?;

        info!("Running {} trials on a {} x {} grid (seed {})...", m, n, n, seed);
        let start_time = Instant::now();

        let samples = (0..m)
            .into_par_iter()
            .map(|trial| -> Result<f64> {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
                let threshold = run_trial::<UfPercolation, _>(n, &mut rng)?;
                debug!("Trial {} percolated at threshold {:.4}", trial, threshold);
                Ok(threshold)
            })
            .collect::<Result<Vec<f64>>>()?;

        let stats = Self { n, seed, samples };
        info!(
            "Finished {} trials in {:.3} s: mean {:.4}, stddev {:.4}",
            m,
            start_time.elapsed().as_secs_f64(),
            stats.mean(),
            stats.stddev()
        );
        Ok(stats)
    }

    /// Aggregates thresholds collected elsewhere for an n x n system.
    pub fn from_samples(n: usize, samples: Vec<f64>) -> Result<Self> {
        if n == 0 || samples.is_empty() {
            return Err(PercolationError::InvalidArgument(format!(
                "grid size and trial count must be positive, got n = {n}, m = {}",
                samples.len()
            )));
        }
        Ok(Self { n, seed: 0, samples })
    }

    pub fn grid_size(&self) -> usize {
        self.n
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Thresholds in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.trials() as f64
    }

    /// Sample standard deviation (divisor m - 1). NaN when m = 1.
    pub fn stddev(&self) -> f64 {
        let m = self.trials();
        if m < 2 {
            return f64::NAN;
        }
        let mean = self.mean();
        let sum_sq: f64 = self.samples.iter().map(|x| (x - mean) * (x - mean)).sum();
        (sum_sq / (m - 1) as f64).sqrt()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.trials() as f64).sqrt()
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_low(&self) -> f64 {
        self.mean() - self.half_width()
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_high(&self) -> f64 {
        self.mean() + self.half_width()
    }

    /// Serializable summary of the experiment. Spread fields are `None`
    /// where they are undefined (a single trial).
    pub fn report(&self) -> ThresholdReport {
        let defined = |x: f64| (!x.is_nan()).then_some(x);
        ThresholdReport {
            grid_size: self.n,
            trials: self.trials(),
            seed: self.seed,
            mean: self.mean(),
            stddev: defined(self.stddev()),
            confidence_low: defined(self.confidence_low()),
            confidence_high: defined(self.confidence_high()),
            samples: self.samples.clone(),
        }
    }
}
