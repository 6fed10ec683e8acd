//! # Immuno
//!
//! An agent-based automaton of the adaptive immune response.
//!
//! Antigen sits on a periodic 2D grid. Helper cells gather on it, recruit
//! B-cells, and the B-cells mark it with antibodies. T-cells enter from the
//! grid edges and random-walk under chemotaxis up a diffusing cytokine field;
//! when one lands on an antibody-marked cell it may destroy the antigen there.
//! Disease mode lowers T-cell affinity and attack probability, turning
//! efficient clearance into chronic inflammation.
//!
//! ## Quick Start
//!
//! ```rust
//! use immuno::prelude::*;
//!
//! let config = AutomatonConfig::default().with_seed(7);
//! let mut automaton = Automaton::from_config(30, 30, config).unwrap();
//! automaton
//!     .set_antigen_map(antigen::disc(30, 30, GridPos::new(15, 15), 4.0).unwrap())
//!     .unwrap();
//!
//! // Run the simulation
//! automaton.run(50);
//!
//! let stats = automaton.stats();
//! println!("{} T-cells, {} antigen cells left", stats.t_cells, stats.antigen_cells);
//!
//! // Render the current state as an RGB frame
//! let frame = automaton.snapshot();
//! assert_eq!(frame.shape(), (30, 30, 3));
//! ```
//!
//! ## Architecture
//!
//! - [`immuno_core`] - Grid, cells, chemotaxis and the SENSE / APOPTOSE primitives
//! - [`immuno_runtime`] - The automaton, cytokine diffusion, snapshots and clearance metrics
//!
//! ## Key Concepts
//!
//! | Primitive | Biological Analog | What It Does |
//! |-----------|-------------------|--------------|
//! | SENSE | Chemotaxis | Bias the random walk up the cytokine gradient |
//! | APOPTOSE | Programmed cell death | Age T-cells and mark them for removal |
//!
//! ### Chemotaxis
//!
//! Direction weights follow the Keller–Segel receptor sensitivity
//! `χ(c) = χ0 / (1 + α·c)`. Weights are min-max normalized and a
//! direction is drawn by interval selection. Inactive T-cells ignore the
//! field and walk uniformly.
//!
//! ## Disease Mode
//!
//! ```rust
//! use immuno::prelude::*;
//!
//! let mut automaton = Automaton::new(10, 10).unwrap();
//! automaton.activate_disease();
//! assert_eq!(automaton.config().r_t_attack, 0.2);
//! ```

pub use immuno_core as core;
pub use immuno_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use immuno::prelude::*;
/// ```
pub mod prelude {
    pub use immuno_runtime::prelude::*;
}
