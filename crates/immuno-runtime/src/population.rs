//! Population: one ordered arena of immune cells of a single kind.
//!
//! Cells are appended in birth order and keep their
//! [`CellId`](immuno_core::types::CellId) for life.
//! Deletion is two-phase: logic marks cells during the tick, and
//! [`Population::sweep`] compacts the arena once at the end of it.

use immuno_core::cell::ImmuneCell;
use immuno_core::primitives::Apoptose;
use immuno_core::types::{CellKind, GridPos};

/// An ordered, mutable collection of cells of one kind.
#[derive(Debug, Clone)]
pub struct Population {
    kind: CellKind,
    cells: Vec<ImmuneCell>,
}

impl Population {
    pub fn new(kind: CellKind) -> Self {
        Self {
            kind,
            cells: Vec::new(),
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[ImmuneCell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImmuneCell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ImmuneCell> {
        self.cells.iter_mut()
    }

    /// Append a cell. The cell's kind must match the population's.
    pub(crate) fn push(&mut self, cell: ImmuneCell) {
        debug_assert_eq!(cell.kind(), self.kind);
        self.cells.push(cell);
    }

    /// Index of the first cell at `pos`, in birth order.
    pub fn index_at(&self, pos: GridPos) -> Option<usize> {
        self.cells.iter().position(|c| c.position() == pos)
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.index_at(pos).is_some()
    }

    /// Mark the first cell at `pos` for deletion. Returns `false` on a miss.
    pub fn mark_at(&mut self, pos: GridPos) -> bool {
        match self.index_at(pos) {
            Some(idx) => {
                self.cells[idx].mark_for_deletion();
                true
            }
            None => false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_active()).count()
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_marked()).count()
    }

    /// Remove every marked cell in one compacting pass. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.cells.len();
        self.cells.retain(|c| !c.is_marked());
        before - self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immuno_core::types::CellId;

    fn b_cell(id: u64, x: usize, y: usize) -> ImmuneCell {
        ImmuneCell::new(CellId(id), GridPos::new(x, y), CellKind::BCell, 0.1, 1.0)
    }

    #[test]
    fn lookup_returns_first_match_in_birth_order() {
        let mut pop = Population::new(CellKind::BCell);
        pop.push(b_cell(1, 0, 0));
        pop.push(b_cell(2, 3, 1));
        pop.push(b_cell(3, 3, 1));
        assert_eq!(pop.index_at(GridPos::new(3, 1)), Some(1));
        assert_eq!(pop.index_at(GridPos::new(2, 2)), None);
    }

    #[test]
    fn mark_miss_is_a_no_op() {
        let mut pop = Population::new(CellKind::BCell);
        pop.push(b_cell(1, 0, 0));
        assert!(!pop.mark_at(GridPos::new(1, 1)));
        assert_eq!(pop.marked_count(), 0);
    }

    #[test]
    fn sweep_removes_only_marked_cells() {
        let mut pop = Population::new(CellKind::BCell);
        pop.push(b_cell(1, 0, 0));
        pop.push(b_cell(2, 1, 0));
        pop.push(b_cell(3, 2, 0));
        assert!(pop.mark_at(GridPos::new(1, 0)));

        assert_eq!(pop.sweep(), 1);
        let ids: Vec<CellId> = pop.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![CellId(1), CellId(3)]);
        assert_eq!(pop.sweep(), 0);
    }
}
