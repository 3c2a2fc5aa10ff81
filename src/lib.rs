//! Percolation on an n x n grid of sites, and Monte Carlo estimation of the
//! fraction of open sites at which the grid first percolates.

pub mod error;
pub mod percolation;
pub mod site_file;
pub mod stats;
pub mod union_find;

pub use error::{PercolationError, Result};
pub use percolation::{ArrayPercolation, Percolation, UfPercolation};
pub use site_file::SiteFile;
pub use stats::{run_trial, PercolationStats, UniformSource};
pub use union_find::WeightedQuickUnion;
