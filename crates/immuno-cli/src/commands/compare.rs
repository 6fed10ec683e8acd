//! Compare healthy and disease-mode clearance.

use anyhow::{ensure, Result};
use colored::Colorize;
use immuno::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;

pub fn run(steps: Option<u64>, runs: u64) -> Result<()> {
    ensure!(runs > 0, "--runs must be at least 1");

    let config = Config::load()?;
    let steps = steps.unwrap_or(config.run.steps);
    let (width, height) = (config.run.width, config.run.height);
    let antigen = config.antigen.build(width, height)?;
    let base_seed = config.run.seed.unwrap_or(0);
    let seeds: Vec<u64> = (0..runs).map(|i| base_seed + i).collect();
    let automaton_config = config.automaton_config(None);

    println!(
        "{} Comparing {} seeded runs of {} steps per mode...",
        "→".blue(),
        runs.to_string().cyan(),
        steps.to_string().cyan()
    );

    let pb = ProgressBar::new(runs * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} runs")?
            .progress_chars("#>-"),
    );

    let comparison = compare_disease_mode(&automaton_config, &antigen, steps, &seeds, |_| {
        pb.inc(1)
    })?;
    pb.finish_with_message("done");

    println!();
    println!(
        "  {:<10} {:>10} {:>14} {:>16} {:>10}",
        "mode".bold(),
        "cleared".bold(),
        "fully cleared".bold(),
        "mean clear tick".bold(),
        "kills".bold()
    );
    print_row("healthy", &comparison.healthy);
    print_row("disease", &comparison.diseased);

    let gap = comparison.clearance_gap();
    println!();
    if gap > 0.0 {
        println!(
            "{} Disease mode clears {:.1} points less antigen",
            "✓".green().bold(),
            gap * 100.0
        );
    } else {
        println!(
            "{} No clearance gap at {} steps; try a longer run",
            "•".yellow(),
            steps
        );
    }

    Ok(())
}

fn print_row(label: &str, summary: &ClearanceSummary) {
    let tick = summary
        .mean_clearance_tick
        .map(|t| format!("{:.1}", t))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {:<10} {:>9.1}% {:>14} {:>16} {:>10.1}",
        label,
        summary.mean_fraction_cleared * 100.0,
        format!("{}/{}", summary.fully_cleared, summary.runs),
        tick,
        summary.mean_kills
    );
}
