pub mod config;
pub mod report;

// Re-export key types for easier use by dependent crates
pub use config::{PercolationConfig, ExperimentConfig, OutputConfig};
pub use report::ThresholdReport;
