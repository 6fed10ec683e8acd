//! Run the automaton.

use anyhow::{Context, Result};
use colored::Colorize;
use immuno::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;

use crate::config::Config;

pub struct RunOptions {
    pub steps: Option<u64>,
    pub seed: Option<u64>,
    pub disease: bool,
    pub output: Option<String>,
    pub frames: bool,
}

/// JSON document written by `--output`.
#[derive(Serialize)]
struct RunOutput<'a> {
    config: &'a AutomatonConfig,
    disease: bool,
    initial_antigen: usize,
    stats: AutomatonStats,
    steps: &'a [StepReport],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    frames: Vec<Frame>,
}

pub fn run(options: RunOptions) -> Result<()> {
    let config = Config::load()?;
    let steps = options.steps.unwrap_or(config.run.steps);
    let (width, height) = (config.run.width, config.run.height);

    let mut automaton =
        Automaton::from_config(width, height, config.automaton_config(options.seed))
            .context("Invalid automaton configuration")?;
    automaton.set_antigen_map(config.antigen.build(width, height)?)?;
    if options.disease {
        automaton.activate_disease();
    }
    let initial_antigen = automaton.antigen_count();

    println!(
        "{} Running {} steps on a {}×{} grid ({} antigen cells{})...",
        "→".blue(),
        steps.to_string().cyan(),
        width,
        height,
        initial_antigen.to_string().cyan(),
        if options.disease { ", disease mode" } else { "" }
    );

    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} steps")?
            .progress_chars("#>-"),
    );

    let mut frames = Vec::new();
    if options.frames {
        frames.push(automaton.snapshot());
    }
    for _ in 0..steps {
        automaton.step();
        if options.frames {
            frames.push(automaton.snapshot());
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    let stats = automaton.stats();
    let kills: usize = automaton.history().iter().map(|r| r.kills).sum();
    let cleared = clearance_fraction(initial_antigen, stats.antigen_cells);

    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!(
        "  Antigen: {} → {} ({:.1}% cleared)",
        initial_antigen.to_string().yellow(),
        stats.antigen_cells.to_string().green(),
        cleared * 100.0
    );
    println!("  Kills: {}", kills.to_string().cyan());
    println!(
        "  T-cells: {} ({} active)",
        stats.t_cells.to_string().cyan(),
        stats.active_t_cells.to_string().cyan()
    );
    println!(
        "  Helpers: {}  B-cells: {}",
        stats.helper_cells.to_string().cyan(),
        stats.b_cells.to_string().cyan()
    );
    println!(
        "  Cytokine: total {:.3}, peak {:.3}",
        stats.total_cytokine, stats.peak_cytokine
    );

    if let Some(output) = options.output {
        let document = RunOutput {
            config: automaton.config(),
            disease: options.disease,
            initial_antigen,
            stats,
            steps: automaton.history(),
            frames,
        };
        write_json(Path::new(&output), &document)?;
        println!("  {} Wrote {}", "✓".green(), output);
    }

    Ok(())
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut automaton =
            Automaton::from_config(4, 4, AutomatonConfig::default().with_seed(1)).unwrap();
        automaton.run(3);
        let document = RunOutput {
            config: automaton.config(),
            disease: false,
            initial_antigen: 0,
            stats: automaton.stats(),
            steps: automaton.history(),
            frames: vec![automaton.snapshot()],
        };
        write_json(&path, &document).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["steps"].as_array().unwrap().len(), 3);
        assert_eq!(value["stats"]["tick"], 3);
        assert_eq!(value["frames"].as_array().unwrap().len(), 1);
    }
}
