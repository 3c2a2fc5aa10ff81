use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error, info};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use percolation_common::{PercolationConfig, ThresholdReport};
use percolation_engine::percolation::{site_from_signed, size_from_signed};
use percolation_engine::{ArrayPercolation, Percolation, PercolationStats, SiteFile, UfPercolation};

/// Percolation on n x n grids and Monte Carlo estimation of the percolation threshold
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a grid from a site file and report whether it percolates
    Grid {
        /// Site file: n, then one "i j" pair per site to open
        file: PathBuf,

        /// Row of a site to report fullness for
        #[arg(allow_negative_numbers = true, requires = "col")]
        row: Option<i64>,

        /// Column of a site to report fullness for
        #[arg(allow_negative_numbers = true)]
        col: Option<i64>,

        /// Percolation implementation to use
        #[arg(long, value_enum, default_value_t = Model::Uf)]
        model: Model,
    },

    /// Estimate the percolation threshold with independent random trials
    Stats {
        /// Grid size n (overrides the config file)
        #[arg(allow_negative_numbers = true)]
        n: Option<i64>,

        /// Number of trials m (overrides the config file)
        #[arg(allow_negative_numbers = true)]
        m: Option<i64>,

        /// Base seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Number of worker threads
        #[arg(long)]
        threads: Option<usize>,

        /// Optional path to a config.toml with experiment and output settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Model {
    /// Flood fill on every query
    Array,
    /// Incremental union-find
    Uf,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    match Args::parse().command {
        Command::Grid { file, row, col, model } => {
            let sites = SiteFile::load(&file)?;
            debug!("Loaded {} sites for a {} x {} grid from {}", sites.sites.len(), sites.n, sites.n, file.display());
            let site = row.zip(col);
            match model {
                Model::Array => describe_grid(&sites.apply::<ArrayPercolation>()?, site),
                Model::Uf => describe_grid(&sites.apply::<UfPercolation>()?, site),
            }
        }
        Command::Stats { n, m, seed, threads, config } => {
            let mut config = match config {
                Some(path) => PercolationConfig::load(path)?,
                None => {
                    let (Some(n), Some(m)) = (n, m) else {
                        anyhow::bail!("stats needs N and M, or a --config file");
                    };
                    PercolationConfig::new(size_from_signed(n)?, trial_count(m)?)
                }
            };
            if let Some(n) = n {
                config.experiment.grid_size = size_from_signed(n)?;
            }
            if let Some(m) = m {
                config.experiment.trials = trial_count(m)?;
            }
            config.experiment.seed = seed.or(config.experiment.seed);
            config.experiment.threads = threads.or(config.experiment.threads);
            config.validate()?;
            run_stats(&config)
        }
    }
}

fn trial_count(m: i64) -> Result<usize> {
    match usize::try_from(m) {
        Ok(trials) if trials > 0 => Ok(trials),
        _ => anyhow::bail!("trial count must be positive, got {}", m),
    }
}

fn describe_grid<P: Percolation>(perc: &P, site: Option<(i64, i64)>) -> Result<()> {
    let n = perc.size();
    println!("{} x {} system:", n, n);
    println!("  Open sites = {}", perc.number_of_open_sites());
    println!("  Percolates = {}", perc.percolates());
    if let Some((i, j)) = site {
        let (row, col) = site_from_signed(n, i, j)?;
        println!("  isFull({}, {}) = {}", i, j, perc.is_full(row, col)?);
    }
    Ok(())
}

fn run_stats(config: &PercolationConfig) -> Result<()> {
    // --- Configure Rayon Thread Pool (Optional) ---
    if let Some(threads) = config.experiment.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the rayon thread pool")?;
    }
    info!("Using {} Rayon threads.", rayon::current_num_threads());

    let n = config.experiment.grid_size;
    let m = config.experiment.trials;
    let stats = match config.experiment.seed {
        Some(seed) => PercolationStats::with_seed(n, m, seed)?,
        None => PercolationStats::new(n, m)?,
    };

    println!("Percolation threshold for a {} x {} system:", n, n);
    println!("  Mean                = {:.3}", stats.mean());
    println!("  Standard deviation  = {:.3}", stats.stddev());
    println!("  Confidence interval = [{:.3}, {:.3}]", stats.confidence_low(), stats.confidence_high());

    let report = stats.report();
    if config.output.save_stats {
        save_report(config, &report)?;
    } else {
        debug!("Skipping saving report as per config (save_stats is false).");
    }
    if config.output.save_samples {
        save_samples(config, &report)?;
    }
    Ok(())
}

fn save_report(config: &PercolationConfig, report: &ThresholdReport) -> Result<()> {
    let base = &config.output.base_filename;
    match config.output_format() {
        "bincode" => {
            // Binary format (compact)
            let filename = format!("{}_report.bin", base);
            let file = File::create(&filename)
                .with_context(|| format!("Error creating report file '{}'", filename))?;
            bincode::serialize_into(file, report)
                .with_context(|| format!("Error serializing report to bincode '{}'", filename))?;
            info!("Report saved to {} (binary format)", filename);
        }
        "messagepack" => {
            // MessagePack format (compact and cross-platform)
            let filename = format!("{}_report.msgpack", base);
            let mut file = File::create(&filename)
                .with_context(|| format!("Error creating report file '{}'", filename))?;
            rmp_serde::encode::write(&mut file, report)
                .with_context(|| format!("Error serializing report to MessagePack '{}'", filename))?;
            info!("Report saved to {} (MessagePack format)", filename);
        }
        format => {
            if format != "json" {
                error!("Unknown output format: {}. Using JSON instead.", format);
            }
            let filename = format!("{}_report.json", base);
            let mut file = File::create(&filename)
                .with_context(|| format!("Error creating report file '{}'", filename))?;
            let json_string = serde_json::to_string_pretty(report)?;
            file.write_all(json_string.as_bytes())
                .with_context(|| format!("Error writing report JSON to file '{}'", filename))?;
            info!("Report saved to {}", filename);
        }
    }
    Ok(())
}

fn save_samples(config: &PercolationConfig, report: &ThresholdReport) -> Result<()> {
    let filename = format!("{}_samples.csv", config.output.base_filename);
    let mut writer = csv::Writer::from_path(&filename)
        .with_context(|| format!("Error saving CSV file '{}'", filename))?;
    writer.write_record(["trial", "threshold"])?;
    for (trial, threshold) in report.samples.iter().enumerate() {
        writer.write_record([trial.to_string(), format!("{:.6}", threshold)])?;
    }
    writer.flush()?;
    info!("Samples saved to {}", filename);
    Ok(())
}
