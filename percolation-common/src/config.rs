use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::path::Path;

// Parameters of the Monte Carlo threshold experiment
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Side length n of the n x n grid.
    pub grid_size: usize,
    /// Number of independent trials m.
    pub trials: usize,
    /// Base seed; trial k is seeded with `seed + k`. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Size of the rayon pool running the trials (rayon's default when absent).
    #[serde(default)]
    pub threads: Option<usize>,
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub base_filename: String,
    pub save_stats: bool,
    #[serde(default)]
    pub save_samples: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: default_base_filename(),
            save_stats: false,
            save_samples: false,
            format: None,
        }
    }
}

fn default_base_filename() -> String {
    "percolation".to_string()
}

// Main experiment configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PercolationConfig {
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl PercolationConfig {
    /// In-memory configuration for an n x n grid and m trials, writing no files.
    pub fn new(grid_size: usize, trials: usize) -> Self {
        PercolationConfig {
            experiment: ExperimentConfig {
                grid_size,
                trials,
                seed: None,
                threads: None,
            },
            output: OutputConfig::default(),
        }
    }

    /// Loads the experiment configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;

        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: PercolationConfig = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants every experiment relies on.
    pub fn validate(&self) -> Result<()> {
        if self.experiment.grid_size == 0 {
            anyhow::bail!("grid_size must be greater than 0.");
        }
        if self.experiment.trials == 0 {
            anyhow::bail!("trials must be greater than 0.");
        }
        if self.experiment.threads == Some(0) {
            anyhow::bail!("threads must be greater than 0 when set.");
        }
        if self.output.base_filename.trim().is_empty() {
            anyhow::bail!("base_filename must not be empty.");
        }
        Ok(())
    }

    /// Output format name, defaulting to json.
    pub fn output_format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("json")
    }
}
