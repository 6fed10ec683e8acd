//! # Immuno Runtime
//!
//! The stepping engine for the immune-response automaton.
//!
//! The runtime owns the fields and populations, sequences the per-tick
//! update rules, and renders color-coded frames:
//!
//! - **Automaton**: state plus the ordered step
//! - **Population**: birth-ordered cell arenas with mark-and-sweep deletion
//! - **Cytokine**: in-place diffusion with frozen antigen sources
//! - **Snapshot**: RGB frames for external renderers
//! - **Metrics**: clearance runs and healthy/disease comparisons
//!
//! ## Quick Start
//!
//! ```rust
//! use immuno_runtime::prelude::*;
//!
//! let config = AutomatonConfig::default().with_seed(42);
//! let mut automaton = Automaton::from_config(20, 20, config).unwrap();
//! let antigen = antigen::disc(20, 20, GridPos::new(10, 10), 3.0).unwrap();
//! automaton.set_antigen_map(antigen).unwrap();
//!
//! let frames = automaton.evolve_with_history(5);
//! assert_eq!(frames.len(), 6);
//! assert_eq!(frames[0].shape(), (20, 20, 3));
//! ```

pub mod antigen;
pub mod automaton;
pub mod config;
pub mod cytokine;
pub mod metrics;
pub mod population;
pub mod prelude;
pub mod snapshot;
