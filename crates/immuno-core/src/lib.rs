//! # Immuno Core
//!
//! Core types and agent behavior for the immune-response automaton.
//!
//! The automaton is a discrete 2D torus on which three immune populations
//! live: helper cells, B-cells and T-cells. This crate holds the pieces
//! that do not depend on how a step is sequenced:
//!
//! - **Grid**: row-major fields with periodic neighbor lookup
//! - **Chemotaxis**: Keller–Segel direction weights and interval sampling
//! - **ImmuneCell**: the agent, driven through the SENSE and APOPTOSE primitives
//! - **Error**: configuration and grid-shape errors
//!
//! ## Quick Start
//!
//! ```rust
//! use immuno_core::prelude::*;
//!
//! let field = Grid::filled(5, 5, 0.0).unwrap();
//! let params = ChemotaxisParams::default();
//! let p = params.probabilities(&field, GridPos::new(2, 2));
//! assert_eq!(p[Direction::Stay.index()], 0.0);
//! ```

pub mod cell;
pub mod chemotaxis;
pub mod error;
pub mod grid;
pub mod prelude;
pub mod primitives;
pub mod types;
