//! APOPTOSE: Programmed Cell Death
//!
//! Cells age one tick at a time. A cell past its lifetime, or one that was
//! the target of a successful attack, is marked for deletion; the owning
//! population removes marked cells in a single sweep at the end of the tick.

use crate::types::Tick;

/// Track age and the deletion mark.
pub trait Apoptose {
    /// Ticks lived so far.
    fn life(&self) -> Tick;

    fn set_life(&mut self, life: Tick);

    /// Whether the cell is scheduled for removal.
    fn is_marked(&self) -> bool;

    fn set_marked(&mut self, marked: bool);

    /// Schedule the cell for removal at the end of the tick.
    fn mark_for_deletion(&mut self) {
        self.set_marked(true);
    }

    /// Age by one tick; marks the cell once `life` exceeds `max_life`.
    ///
    /// Returns `true` if this call marked the cell.
    fn age(&mut self, max_life: Tick) -> bool {
        self.set_life(self.life() + 1);
        if self.life() > max_life && !self.is_marked() {
            self.mark_for_deletion();
            true
        } else {
            false
        }
    }
}
