//! Clearance metrics: how well a configuration removes antigen.
//!
//! A clearance run seeds a fresh automaton, installs an antigen map and
//! steps until the antigen is gone or the step budget runs out. Summaries
//! over several seeds make healthy and disease-mode runs comparable.

use crate::automaton::Automaton;
use crate::config::AutomatonConfig;
use immuno_core::error::Result;
use immuno_core::grid::Grid;
use immuno_core::types::Tick;
use serde::Serialize;
use tracing::debug;

/// Fraction of the initial antigen that was removed. An empty map counts as cleared.
pub fn clearance_fraction(initial: usize, remaining: usize) -> f64 {
    if initial == 0 {
        return 1.0;
    }
    1.0 - remaining.min(initial) as f64 / initial as f64
}

/// Outcome of one seeded clearance run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClearanceRun {
    pub seed: u64,
    pub disease: bool,
    pub initial_antigen: usize,
    pub remaining_antigen: usize,
    pub fraction_cleared: f64,
    /// Tick at which the last antigen cell disappeared.
    pub cleared_at: Option<Tick>,
    pub kills: usize,
    pub steps_run: u64,
}

/// Step a fresh automaton for at most `steps` ticks, stopping early once cleared.
pub fn run_clearance(
    config: &AutomatonConfig,
    antigen: &Grid<bool>,
    steps: u64,
    seed: u64,
    disease: bool,
) -> Result<ClearanceRun> {
    let (width, height) = antigen.dimensions();
    let mut automaton = Automaton::from_config(width, height, config.clone().with_seed(seed))?;
    automaton.set_antigen_map(antigen.clone())?;
    if disease {
        automaton.activate_disease();
    }

    let initial_antigen = automaton.antigen_count();
    let mut cleared_at = if initial_antigen == 0 { Some(0) } else { None };
    let mut kills = 0;
    let mut steps_run = 0;

    while cleared_at.is_none() && steps_run < steps {
        let report = automaton.step();
        kills += report.kills;
        steps_run += 1;
        if automaton.antigen_count() == 0 {
            cleared_at = Some(report.tick);
        }
    }

    let remaining_antigen = automaton.antigen_count();
    debug!(seed, disease, remaining_antigen, steps_run, "clearance run finished");

    Ok(ClearanceRun {
        seed,
        disease,
        initial_antigen,
        remaining_antigen,
        fraction_cleared: clearance_fraction(initial_antigen, remaining_antigen),
        cleared_at,
        kills,
        steps_run,
    })
}

/// Aggregate over several clearance runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClearanceSummary {
    pub runs: usize,
    pub mean_fraction_cleared: f64,
    /// Runs that removed every antigen cell.
    pub fully_cleared: usize,
    /// Mean clearance tick over fully cleared runs.
    pub mean_clearance_tick: Option<f64>,
    pub mean_kills: f64,
}

impl ClearanceSummary {
    pub fn from_runs(runs: &[ClearanceRun]) -> Self {
        let n = runs.len();
        if n == 0 {
            return Self {
                runs: 0,
                mean_fraction_cleared: 0.0,
                fully_cleared: 0,
                mean_clearance_tick: None,
                mean_kills: 0.0,
            };
        }

        let cleared_ticks: Vec<Tick> = runs.iter().filter_map(|r| r.cleared_at).collect();
        let mean_clearance_tick = if cleared_ticks.is_empty() {
            None
        } else {
            Some(cleared_ticks.iter().sum::<Tick>() as f64 / cleared_ticks.len() as f64)
        };

        Self {
            runs: n,
            mean_fraction_cleared: runs.iter().map(|r| r.fraction_cleared).sum::<f64>()
                / n as f64,
            fully_cleared: cleared_ticks.len(),
            mean_clearance_tick,
            mean_kills: runs.iter().map(|r| r.kills as f64).sum::<f64>() / n as f64,
        }
    }
}

/// Healthy and disease-mode runs over the same seeds.
#[derive(Debug, Clone, Serialize)]
pub struct ClearanceComparison {
    pub healthy: ClearanceSummary,
    pub diseased: ClearanceSummary,
    pub healthy_runs: Vec<ClearanceRun>,
    pub diseased_runs: Vec<ClearanceRun>,
}

impl ClearanceComparison {
    /// Healthy minus disease-mode mean fraction cleared.
    pub fn clearance_gap(&self) -> f64 {
        self.healthy.mean_fraction_cleared - self.diseased.mean_fraction_cleared
    }
}

/// Run every seed once healthy and once in disease mode.
///
/// `on_run` sees each finished run, healthy before diseased for every seed.
pub fn compare_disease_mode(
    config: &AutomatonConfig,
    antigen: &Grid<bool>,
    steps: u64,
    seeds: &[u64],
    mut on_run: impl FnMut(&ClearanceRun),
) -> Result<ClearanceComparison> {
    let mut healthy_runs = Vec::with_capacity(seeds.len());
    let mut diseased_runs = Vec::with_capacity(seeds.len());
    for &seed in seeds {
        let healthy = run_clearance(config, antigen, steps, seed, false)?;
        on_run(&healthy);
        healthy_runs.push(healthy);

        let diseased = run_clearance(config, antigen, steps, seed, true)?;
        on_run(&diseased);
        diseased_runs.push(diseased);
    }

    Ok(ClearanceComparison {
        healthy: ClearanceSummary::from_runs(&healthy_runs),
        diseased: ClearanceSummary::from_runs(&diseased_runs),
        healthy_runs,
        diseased_runs,
    })
}
