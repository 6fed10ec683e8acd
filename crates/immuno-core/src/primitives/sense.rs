//! SENSE: Chemotaxis
//!
//! A T-cell reads the cytokine concentration around its own cell and
//! biases its random walk up the gradient. The cell only sees its four
//! neighbors; it has no knowledge of where the antigen is. The grid it
//! walks on is whatever field it is handed.

use crate::chemotaxis::{sample_direction, ChemotaxisParams};
use crate::grid::Grid;
use crate::types::{Direction, GridPos};
use rand::Rng;

/// Detect the local cytokine gradient and move along it.
pub trait Sense {
    /// The cell from which this agent senses.
    fn sense_position(&self) -> GridPos;

    /// Whether this agent migrates at all.
    fn is_motile(&self) -> bool;

    /// Probabilities over [`Direction::ALL`] for the next move.
    fn orient(&self, field: &Grid<f64>, params: &ChemotaxisParams) -> [f64; 5];

    /// Set the agent's cell.
    fn relocate(&mut self, to: GridPos);

    /// Sample a direction and step along it, wrapping at the grid edges.
    ///
    /// Non-motile agents stay put and consume no randomness.
    fn move_cell<R: Rng + ?Sized>(
        &mut self,
        field: &Grid<f64>,
        params: &ChemotaxisParams,
        rng: &mut R,
    ) -> Direction {
        if !self.is_motile() {
            return Direction::Stay;
        }
        let probabilities = self.orient(field, params);
        let direction = sample_direction(&probabilities, rng);
        let to = self.sense_position().step(
            direction,
            params.step_offset(),
            field.width(),
            field.height(),
        );
        self.relocate(to);
        direction
    }
}
