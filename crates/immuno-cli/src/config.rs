//! Configuration management for the immuno CLI.

use anyhow::{Context, Result};
use immuno::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "immuno.toml";

/// Immuno project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub antigen: AntigenSpec,
    #[serde(default)]
    pub automaton: AutomatonConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_steps")]
    pub steps: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Shape of the initial antigen map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum AntigenSpec {
    Disc {
        x: usize,
        y: usize,
        radius: f64,
    },
    Rect {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    Cells { cells: Vec<[usize; 2]> },
}

// Default value functions
fn default_width() -> usize { 50 }
fn default_height() -> usize { 50 }
fn default_steps() -> u64 { 200 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            steps: default_steps(),
            seed: None,
        }
    }
}

impl Default for AntigenSpec {
    fn default() -> Self {
        AntigenSpec::Disc {
            x: default_width() / 2,
            y: default_height() / 2,
            radius: 5.0,
        }
    }
}

impl AntigenSpec {
    /// Build the antigen map for a `width × height` grid.
    pub fn build(&self, width: usize, height: usize) -> Result<Grid<bool>> {
        let grid = match self {
            AntigenSpec::Disc { x, y, radius } => {
                antigen::disc(width, height, GridPos::new(*x, *y), *radius)
            }
            AntigenSpec::Rect {
                x,
                y,
                width: w,
                height: h,
            } => antigen::rect(width, height, GridPos::new(*x, *y), *w, *h),
            AntigenSpec::Cells { cells } => {
                let cells: Vec<GridPos> = cells.iter().map(|&[x, y]| GridPos::new(x, y)).collect();
                antigen::from_cells(width, height, &cells)
            }
        };
        grid.context("Invalid antigen map")
    }
}

impl Config {
    /// Load config from immuno.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Automaton configuration with the run seed applied, if any.
    pub fn automaton_config(&self, seed: Option<u64>) -> AutomatonConfig {
        let mut config = self.automaton.clone();
        if let Some(seed) = seed.or(self.run.seed) {
            config.rng_seed = Some(seed);
        }
        config
    }
}

/// Find immuno.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
