//! Shared types used across the automaton crates.

use serde::{Deserialize, Serialize};

/// Discrete simulation time.
pub type Tick = u64;

/// Stable identifier for an immune cell within its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u64);

/// A cell coordinate: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset this position with periodic wraparound on both axes.
    pub fn wrapped_offset(&self, dx: isize, dy: isize, width: usize, height: usize) -> GridPos {
        GridPos {
            x: wrap(self.x, dx, width),
            y: wrap(self.y, dy, height),
        }
    }

    /// Move `distance` cells in `direction` on a torus of the given size.
    pub fn step(
        &self,
        direction: Direction,
        distance: usize,
        width: usize,
        height: usize,
    ) -> GridPos {
        let (dx, dy) = direction.delta();
        let distance = distance as isize;
        self.wrapped_offset(dx * distance, dy * distance, width, height)
    }

    /// Whether this position lies inside a `width` x `height` grid.
    pub fn within(&self, width: usize, height: usize) -> bool {
        self.x < width && self.y < height
    }
}

fn wrap(value: usize, delta: isize, size: usize) -> usize {
    (value as isize + delta).rem_euclid(size as isize) as usize
}

/// The three immune cell populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Helper cell: recognizes antigen, recruits B-cells.
    Helper,
    /// B-cell: deposits antibodies at its cell.
    BCell,
    /// T-cell: migrates, attacks antibody-marked antigen.
    TCell,
}

impl CellKind {
    /// Only T-cells migrate.
    pub fn is_motile(&self) -> bool {
        matches!(self, CellKind::TCell)
    }
}

/// A single lattice move.
///
/// The row axis is inverted: `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Stay,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in sampling order.
    pub const ALL: [Direction; 5] = [
        Direction::Stay,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Direction::Stay => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
            Direction::Down => 4,
        }
    }

    /// Unit `(dx, dy)` offset.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Stay => (0, 0),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}
