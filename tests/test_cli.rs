/// End-to-end tests of the `percolate` binary
use anyhow::Result;
use percolation_common::ThresholdReport;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn percolate(args: &[&str], dir: &TempDir) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_percolate"))
        .args(args)
        .current_dir(dir.path())
        .output()?)
}

#[test]
fn test_grid_reports_percolation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("column.txt");
    fs::write(&input, "3\n0 0\n1 0\n2 0\n")?;

    for model in ["array", "uf"] {
        let output = percolate(
            &["grid", input.to_str().unwrap(), "2", "2", "--model", model],
            &temp_dir,
        )?;
        assert!(output.status.success(), "model {model} failed");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(
            stdout,
            "3 x 3 system:\n  Open sites = 3\n  Percolates = true\n  isFull(2, 2) = false\n"
        );
    }
    Ok(())
}

#[test]
fn test_grid_rejects_out_of_range_site() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("bad.txt");
    fs::write(&input, "2\n0 0\n2 1\n")?;

    let output = percolate(&["grid", input.to_str().unwrap()], &temp_dir)?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_grid_rejects_negative_query() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("open.txt");
    fs::write(&input, "2\n0 0\n")?;

    let output = percolate(&["grid", input.to_str().unwrap(), "-1", "0"], &temp_dir)?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("(-1, 0)"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_stats_single_site() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = percolate(&["stats", "1", "5", "--seed", "3"], &temp_dir)?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Percolation threshold for a 1 x 1 system:\n"));
    assert!(stdout.contains("  Mean                = 1.000\n"));
    assert!(stdout.contains("  Standard deviation  = 0.000\n"));
    assert!(stdout.contains("  Confidence interval = [1.000, 1.000]\n"));
    Ok(())
}

#[test]
fn test_stats_rejects_invalid_sizes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    for args in [["stats", "0", "5"], ["stats", "5", "-1"], ["stats", "5000000000", "1"]] {
        let output = percolate(&args, &temp_dir)?;
        assert!(!output.status.success(), "{args:?} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.is_empty());
        assert!(!stderr.contains("panicked"), "{args:?} panicked: {stderr}");
    }
    Ok(())
}

#[test]
fn test_stats_writes_configured_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[experiment]
grid_size = 4
trials = 3
seed = 11

[output]
base_filename = "run"
save_stats = true
save_samples = true
format = "json"
"#,
    )?;

    let output = percolate(&["stats", "--config", "config.toml"], &temp_dir)?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(temp_dir.path().join("run_report.json"))?)?;
    assert_eq!(report["grid_size"], 4);
    assert_eq!(report["trials"], 3);
    assert_eq!(report["seed"], 11);
    assert_eq!(report["samples"].as_array().map(Vec::len), Some(3));

    let samples = fs::read_to_string(temp_dir.path().join("run_samples.csv"))?;
    let lines: Vec<&str> = samples.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "trial,threshold");
    assert!(lines[1].starts_with("0,"));
    Ok(())
}

#[test]
fn test_single_trial_report_reads_back() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[experiment]
grid_size = 3
trials = 1
seed = 1

[output]
base_filename = "single"
save_stats = true
"#,
    )?;

    let output = percolate(&["stats", "--config", "config.toml"], &temp_dir)?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = fs::read_to_string(temp_dir.path().join("single_report.json"))?;
    let report: ThresholdReport = serde_json::from_str(&json)?;
    assert_eq!(report.trials, 1);
    assert_eq!(report.samples.len(), 1);
    assert_eq!(report.mean, report.samples[0]);
    assert_eq!(report.stddev, None);
    assert_eq!(report.confidence_low, None);
    assert_eq!(report.confidence_high, None);
    Ok(())
}
