//! Immuno Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use immuno_core::prelude::*;
//! ```

pub use crate::types::{CellId, CellKind, Direction, GridPos, Tick};

pub use crate::grid::Grid;

pub use crate::cell::ImmuneCell;

pub use crate::chemotaxis::{ChemotaxisParams, INACTIVE_PROBABILITIES};

pub use crate::primitives::{Apoptose, Sense};

pub use crate::error::{ConfigError, GridError, ImmunoError, Result};
