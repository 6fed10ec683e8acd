//! ImmuneCell: one helper cell, B-cell, or T-cell on the lattice.
//!
//! Helper and B-cells are sessile and active from birth. T-cells start
//! inactive and random-walk uniformly; the first signaling or combat event
//! activates them for good, after which they follow the cytokine gradient.

use crate::chemotaxis::{ChemotaxisParams, INACTIVE_PROBABILITIES};
use crate::grid::Grid;
use crate::primitives::{Apoptose, Sense};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// An immune cell agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmuneCell {
    id: CellId,
    position: GridPos,
    kind: CellKind,
    /// Cytokine released by this cell type when it signals.
    inflammation_rate: f64,
    /// Carried for every cell; the automaton's current value drives dynamics.
    antigen_affinity: f64,
    active: bool,
    life: Tick,
    marked: bool,
}

impl ImmuneCell {
    pub fn new(
        id: CellId,
        position: GridPos,
        kind: CellKind,
        inflammation_rate: f64,
        antigen_affinity: f64,
    ) -> Self {
        Self {
            id,
            position,
            kind,
            inflammation_rate,
            antigen_affinity,
            active: kind != CellKind::TCell,
            life: 0,
            marked: false,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn inflammation_rate(&self) -> f64 {
        self.inflammation_rate
    }

    pub fn antigen_affinity(&self) -> f64 {
        self.antigen_affinity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Sense for ImmuneCell {
    fn sense_position(&self) -> GridPos {
        self.position
    }

    fn is_motile(&self) -> bool {
        self.kind.is_motile()
    }

    fn orient(&self, field: &Grid<f64>, params: &ChemotaxisParams) -> [f64; 5] {
        if self.active {
            params.probabilities(field, self.position)
        } else {
            INACTIVE_PROBABILITIES
        }
    }

    fn relocate(&mut self, to: GridPos) {
        self.position = to;
    }
}

impl Apoptose for ImmuneCell {
    fn life(&self) -> Tick {
        self.life
    }

    fn set_life(&mut self, life: Tick) {
        self.life = life;
    }

    fn is_marked(&self) -> bool {
        self.marked
    }

    fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }
}
