//! Automaton configuration.
//!
//! Every rate and constant of the stepping engine lives here. Use with
//! [`Automaton::from_config`](crate::automaton::Automaton::from_config);
//! the configuration is validated before any state is built.

use immuno_core::chemotaxis::ChemotaxisParams;
use immuno_core::error::{ImmunoError, Result};
use immuno_core::types::Tick;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Rates applied once disease mode is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseProfile {
    /// Antigen affinity in disease mode (default: 0.1).
    pub antigen_affinity: f64,
    /// Attack probability in disease mode (default: 0.2).
    pub r_t_attack: f64,
}

impl Default for DiseaseProfile {
    fn default() -> Self {
        Self {
            antigen_affinity: 0.1,
            r_t_attack: 0.2,
        }
    }
}

/// Configuration for automaton simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Cytokine released by a B-cell (default: 0.1).
    pub b_cell_inflammation: f64,
    /// Cytokine released by a T-cell (default: 0.05).
    pub t_cell_inflammation: f64,
    /// Cytokine released by a helper cell (default: 0.1).
    pub helper_cell_inflammation: f64,
    /// Cytokine subtracted per diffusion pass (default: 0.0).
    pub cytokine_dissipation: f64,
    /// Laplacian relaxation rate (default: 0.3).
    pub cytokine_diffusion: f64,
    /// Per-tick chance an antigen cell recruits a helper (default: 0.005).
    pub r_helper: f64,
    /// Per-tick chance a helper recruits a B-cell (default: 0.05).
    pub r_b_cell: f64,
    /// Per-tick chance a B-cell deposits an antibody (default: 0.1).
    pub r_antibody: f64,
    /// Chance a T-cell on an antibody kills the antigen (default: 1.0).
    pub r_t_attack: f64,
    /// Suppressor level that hides antigen (default: 0.5). Carried, not used.
    pub suppressor_threshold: f64,
    /// T-cells produced per tick with no active T-cells (default: 1).
    pub min_t_cell_production_rate: u32,
    /// Production rate scale (default: 20).
    pub max_t_cell_production_rate: u32,
    /// Hard cap on the T-cell population (default: 300).
    pub max_t_cells: usize,
    /// Chance a T-cell does NOT signal when it fails to attack (default: 1.0).
    pub antigen_affinity: f64,
    /// T-cells older than this are removed (default: 1000).
    pub max_t_cell_life: Tick,
    /// Rates installed by disease mode.
    pub disease: DiseaseProfile,
    /// Chemotaxis model constants.
    pub chemotaxis: ChemotaxisParams,
    /// Optional RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            b_cell_inflammation: 0.1,
            t_cell_inflammation: 0.05,
            helper_cell_inflammation: 0.1,
            cytokine_dissipation: 0.0,
            cytokine_diffusion: 0.3,
            r_helper: 0.005,
            r_b_cell: 0.05,
            r_antibody: 0.1,
            r_t_attack: 1.0,
            suppressor_threshold: 0.5,
            min_t_cell_production_rate: 1,
            max_t_cell_production_rate: 20,
            max_t_cells: 300,
            antigen_affinity: 1.0,
            max_t_cell_life: 1000,
            disease: DiseaseProfile::default(),
            chemotaxis: ChemotaxisParams::default(),
            rng_seed: None,
        }
    }
}

impl AutomatonConfig {
    /// Same configuration with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Reject probabilities outside [0, 1] and negative rates.
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("r_helper", self.r_helper),
            ("r_b_cell", self.r_b_cell),
            ("r_antibody", self.r_antibody),
            ("r_t_attack", self.r_t_attack),
            ("antigen_affinity", self.antigen_affinity),
            ("disease.antigen_affinity", self.disease.antigen_affinity),
            ("disease.r_t_attack", self.disease.r_t_attack),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ImmunoError::out_of_range(field, 0.0, 1.0, value));
            }
        }

        let non_negative = [
            ("b_cell_inflammation", self.b_cell_inflammation),
            ("t_cell_inflammation", self.t_cell_inflammation),
            ("helper_cell_inflammation", self.helper_cell_inflammation),
            ("cytokine_dissipation", self.cytokine_dissipation),
            ("cytokine_diffusion", self.cytokine_diffusion),
            ("suppressor_threshold", self.suppressor_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ImmunoError::invalid_config(
                    field,
                    value.to_string(),
                    "must be finite and non-negative",
                ));
            }
        }

        if self.max_t_cell_production_rate == 0 {
            return Err(ImmunoError::invalid_config(
                "max_t_cell_production_rate",
                "0",
                "must be positive",
            ));
        }
        if self.min_t_cell_production_rate > self.max_t_cell_production_rate {
            return Err(ImmunoError::invalid_config(
                "min_t_cell_production_rate",
                self.min_t_cell_production_rate.to_string(),
                "cannot exceed max_t_cell_production_rate",
            ));
        }

        self.chemotaxis.validate()
    }

    /// RNG seeded from `rng_seed`, or from entropy if absent.
    pub fn seeded_rng(&self) -> ChaCha8Rng {
        match self.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        }
    }
}
