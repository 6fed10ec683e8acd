//! Chemotaxis kernel: direction weights from a discretized Keller–Segel model.
//!
//! An active T-cell compares the cytokine concentration of its four
//! axis-aligned neighbors and biases its random walk along the gradient.
//! The sensitivity `χ(c) = χ₀ / (1 + α·c)` saturates at high concentration.
//!
//! Weights are ordered as [`Direction::ALL`]: stay, left, right, up, down.

use crate::error::{ImmunoError, Result};
use crate::grid::Grid;
use crate::types::{Direction, GridPos};
use rand::distributions::Open01;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Movement distribution of a T-cell that has not been activated yet.
pub const INACTIVE_PROBABILITIES: [f64; 5] = [0.0, 0.25, 0.25, 0.25, 0.25];

/// Largest accepted `step_distance`; keeps [`ChemotaxisParams::step_offset`]
/// well inside `isize`.
pub const MAX_STEP_DISTANCE: f64 = 1.0e12;

/// Fixed constants of the chemotaxis model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemotaxisParams {
    /// Cell motility `D`.
    pub motility: f64,
    /// Base chemotactic sensitivity `χ₀`.
    pub chi0: f64,
    /// Receptor saturation `α`.
    pub alpha: f64,
    /// Time-step scale `k`.
    pub k: f64,
    /// Squared lattice distance covered by one move.
    pub step_distance: f64,
}

impl Default for ChemotaxisParams {
    fn default() -> Self {
        Self {
            motility: 0.2,
            chi0: 0.2,
            alpha: 0.6,
            k: 0.5,
            step_distance: 2.0,
        }
    }
}

impl ChemotaxisParams {
    /// Chemotactic sensitivity at concentration `c`.
    pub fn sensitivity(&self, c: f64) -> f64 {
        self.chi0 / (1.0 + self.alpha * c)
    }

    /// Whole cells moved per step along one axis.
    pub fn step_offset(&self) -> usize {
        (self.step_distance / 2.0).sqrt() as usize
    }

    /// Unnormalized direction weights for a cell at `pos`.
    ///
    /// The stay weight is always 0.
    pub fn weights(&self, field: &Grid<f64>, pos: GridPos) -> [f64; 5] {
        let c = field[pos];
        let left = *field.neighbor(pos, Direction::Left);
        let right = *field.neighbor(pos, Direction::Right);
        let above = *field.neighbor(pos, Direction::Up);
        let below = *field.neighbor(pos, Direction::Down);

        let base = self.k * self.motility;
        let bias = (self.k / 4.0) * self.sensitivity(c);
        let horizontal = bias * (right - left);
        let vertical = bias * (above - below);

        [
            0.0,
            base - horizontal,
            base + horizontal,
            base + vertical,
            base - vertical,
        ]
    }

    /// Movement probabilities for an active cell at `pos`.
    pub fn probabilities(&self, field: &Grid<f64>, pos: GridPos) -> [f64; 5] {
        normalize(self.weights(field, pos))
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("chemotaxis.motility", self.motility),
            ("chemotaxis.chi0", self.chi0),
            ("chemotaxis.alpha", self.alpha),
            ("chemotaxis.k", self.k),
            ("chemotaxis.step_distance", self.step_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ImmunoError::invalid_config(
                    name,
                    value.to_string(),
                    "must be finite and non-negative",
                ));
            }
        }
        if self.step_distance > MAX_STEP_DISTANCE {
            return Err(ImmunoError::out_of_range(
                "chemotaxis.step_distance",
                0.0,
                MAX_STEP_DISTANCE,
                self.step_distance,
            ));
        }
        Ok(())
    }
}

/// Min-max rescale `weights` to [0, 1], then rescale to sum to 1.
///
/// Degenerate input (all weights equal, or any non-finite weight) yields
/// the uniform distribution over the four moving directions.
pub fn normalize(weights: [f64; 5]) -> [f64; 5] {
    if weights.iter().any(|w| !w.is_finite()) {
        return INACTIVE_PROBABILITIES;
    }
    let max = weights.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = weights.iter().cloned().fold(f64::INFINITY, f64::min);
    let spread = max - min;
    if spread <= 0.0 {
        return INACTIVE_PROBABILITIES;
    }

    let mut scaled = weights.map(|w| (w - min) / spread);
    let total: f64 = scaled.iter().sum();
    for p in scaled.iter_mut() {
        *p /= total;
    }
    scaled
}

/// Pick the direction whose half-open interval `(cum_{i-1}, cum_{i-1} + p_i]`
/// contains `draw`.
///
/// A draw above the last cumulative bound (float rounding) selects the last
/// direction with non-zero probability.
pub fn select_direction(probabilities: &[f64; 5], draw: f64) -> Direction {
    let mut accumulated = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        if draw > accumulated && draw <= accumulated + p {
            return Direction::ALL[i];
        }
        accumulated += p;
    }
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .map(|i| Direction::ALL[i])
        .unwrap_or(Direction::Stay)
}

/// Sample a direction with one uniform draw from the open interval (0, 1).
pub fn sample_direction<R: Rng + ?Sized>(probabilities: &[f64; 5], rng: &mut R) -> Direction {
    let draw: f64 = rng.sample(Open01);
    select_direction(probabilities, draw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64; 5], expected: &[f64; 5]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn default_step_offset_is_one_cell() {
        assert_eq!(ChemotaxisParams::default().step_offset(), 1);
    }

    #[test]
    fn uniform_field_gives_uniform_moves() {
        let field = Grid::filled(5, 5, 0.7).unwrap();
        let p = ChemotaxisParams::default().probabilities(&field, GridPos::new(2, 2));
        assert_close(&p, &INACTIVE_PROBABILITIES);
    }

    #[test]
    fn gradient_biases_toward_higher_concentration() {
        let field = Grid::from_fn(5, 5, |p| p.x as f64 * 0.1).unwrap();
        let params = ChemotaxisParams::default();
        let w = params.weights(&field, GridPos::new(2, 2));
        assert!(w[Direction::Right.index()] > w[Direction::Left.index()]);
        assert_eq!(w[Direction::Up.index()], w[Direction::Down.index()]);

        let p = params.probabilities(&field, GridPos::new(2, 2));
        assert_eq!(p[Direction::Stay.index()], 0.0);
        assert!(p[Direction::Right.index()] > p[Direction::Left.index()]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equal_weights_fall_back_to_uniform() {
        assert_eq!(normalize([0.3; 5]), INACTIVE_PROBABILITIES);
        assert_eq!(normalize([0.0; 5]), INACTIVE_PROBABILITIES);
        assert_eq!(
            normalize([0.0, f64::NAN, 0.1, 0.1, 0.1]),
            INACTIVE_PROBABILITIES
        );
    }

    #[test]
    fn minimum_weight_gets_zero_probability() {
        let p = normalize([0.0, -0.1, 0.3, 0.1, 0.1]);
        assert_eq!(p[1], 0.0);
        assert!(p[0] > 0.0);
    }

    #[test]
    fn interval_selection_uses_open_lower_bound() {
        let p = INACTIVE_PROBABILITIES;
        assert_eq!(select_direction(&p, 0.25), Direction::Left);
        assert_eq!(select_direction(&p, 0.2500001), Direction::Right);
        assert_eq!(select_direction(&p, 0.5), Direction::Right);
        assert_eq!(select_direction(&p, 1.0), Direction::Down);
    }

    #[test]
    fn zero_probability_directions_are_never_selected() {
        let p = [0.0, 0.0, 0.5, 0.0, 0.5];
        for draw in [1e-9, 0.1, 0.5, 0.5000001, 0.9, 1.0] {
            let d = select_direction(&p, draw);
            assert!(d == Direction::Right || d == Direction::Down, "{:?}", d);
        }
    }

    #[test]
    fn rounding_overflow_picks_last_nonzero_direction() {
        let p = [0.0, 0.3, 0.3, 0.3, 0.0];
        assert_eq!(select_direction(&p, 0.95), Direction::Up);
    }

    #[test]
    fn negative_constants_are_rejected() {
        let params = ChemotaxisParams {
            alpha: -1.0,
            ..ChemotaxisParams::default()
        };
        assert!(params.validate().is_err());
        assert!(ChemotaxisParams::default().validate().is_ok());
    }

    #[test]
    fn huge_step_distance_is_rejected() {
        let params = ChemotaxisParams {
            step_distance: 1.0e300,
            ..ChemotaxisParams::default()
        };
        assert!(params.validate().is_err());

        let params = ChemotaxisParams {
            step_distance: MAX_STEP_DISTANCE,
            ..ChemotaxisParams::default()
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.step_offset(), 707_106);
    }
}
