//! Immuno Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use immuno_runtime::prelude::*;
//! ```

// Re-export automaton
pub use crate::automaton::{Automaton, AutomatonStats, StepReport};

// Re-export configuration
pub use crate::config::{AutomatonConfig, DiseaseProfile};

pub use crate::population::Population;

pub use crate::snapshot::{Frame, Palette, Rgb};

// Re-export metrics
pub use crate::metrics::{
    clearance_fraction, compare_disease_mode, run_clearance, ClearanceComparison, ClearanceRun,
    ClearanceSummary,
};

pub use crate::antigen;

// Re-export from core
pub use immuno_core::prelude::*;
