//! Cellular behaviors shared by every immune cell.
//!
//! Each primitive is a trait representing a cellular mechanism. The
//! automaton drives cells only through these traits.

pub mod apoptose;
pub mod sense;

pub use apoptose::Apoptose;
pub use sense::Sense;
