use anyhow::{Context, Result};
use bench_plot::plot::parse_cli;
use bench_plot::BenchHistory;
use std::process;

fn main() -> Result<()> {
    let (csvin, svgout) = parse_cli();
    if !csvin.exists() {
        println!("CSV not found: {}", csvin.display());
        process::exit(1);
    }
    let history = BenchHistory::from_csv(&csvin)
        .with_context(|| format!("failed to read {}", csvin.display()))?;
    if history.samples.is_empty() {
        println!("No valid rows in CSV");
        process::exit(1);
    }
    let (baseline, profiled) = history.split_modes();
    history
        .write_svg(&svgout, &csvin.to_string_lossy())
        .with_context(|| format!("failed to write {}", svgout.display()))?;
    println!("Saved plot: {}", svgout.display());
    println!(
        "Rows: {} (baseline={}, profiled={})",
        history.samples.len(),
        baseline.len(),
        profiled.len()
    );
    Ok(())
}
