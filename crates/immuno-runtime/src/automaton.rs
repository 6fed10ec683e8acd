//! Automaton: the immune response stepping engine.
//!
//! The automaton owns every field (antigen, antibody, cytokine, suppressor)
//! and the three cell populations. Each tick, in order:
//! 1. T-cell production rate adapts to the number of active T-cells
//! 2. New T-cells are born on the grid boundary
//! 3. Antigen cells recruit helper cells
//! 4. Helper cells recruit B-cells
//! 5. B-cells deposit antibodies
//! 6. Antibody-bearing B-cells set the local cytokine level
//! 7. T-cells move, then attack antibody-marked antigen or signal
//! 8. Marked cells are removed
//! 9. The cytokine field diffuses

use crate::config::AutomatonConfig;
use crate::cytokine;
use crate::population::Population;
use crate::snapshot::{Frame, Palette};
use immuno_core::cell::ImmuneCell;
use immuno_core::error::Result;
use immuno_core::grid::Grid;
use immuno_core::primitives::{Apoptose, Sense};
use immuno_core::types::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepReport {
    /// Tick reached at the end of this step.
    pub tick: Tick,
    /// Production rate computed at the start of the step.
    pub production_rate: u32,
    pub t_cells_spawned: usize,
    pub helpers_born: usize,
    pub b_cells_born: usize,
    /// Antibody flags newly set this step.
    pub antibodies_deposited: usize,
    /// Successful attacks (antigen cleared).
    pub kills: usize,
    /// T-cells that released cytokine instead of attacking.
    pub inflammations: usize,
    /// T-cells that exceeded their lifetime.
    pub t_cells_expired: usize,
    /// Kills that found no B-cell or helper cell to remove.
    pub lookup_misses: usize,
    pub helpers_removed: usize,
    pub b_cells_removed: usize,
    pub t_cells_removed: usize,
}

/// Point-in-time statistics about the automaton.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomatonStats {
    pub tick: Tick,
    pub width: usize,
    pub height: usize,
    pub helper_cells: usize,
    pub b_cells: usize,
    pub t_cells: usize,
    pub active_t_cells: usize,
    pub antigen_cells: usize,
    pub antibody_cells: usize,
    pub total_cytokine: f64,
    pub peak_cytokine: f64,
    pub production_rate: u32,
    pub disease_active: bool,
}

/// Grid side on which a new T-cell enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Top,
    Bottom,
    Left,
    Right,
}

impl Boundary {
    const ALL: [Boundary; 4] = [
        Boundary::Top,
        Boundary::Bottom,
        Boundary::Left,
        Boundary::Right,
    ];

    /// A uniformly random cell along this side.
    fn random_cell<R: Rng + ?Sized>(&self, width: usize, height: usize, rng: &mut R) -> GridPos {
        match self {
            Boundary::Top => GridPos::new(rng.gen_range(0..width), 0),
            Boundary::Bottom => GridPos::new(rng.gen_range(0..width), height - 1),
            Boundary::Left => GridPos::new(0, rng.gen_range(0..height)),
            Boundary::Right => GridPos::new(width - 1, rng.gen_range(0..height)),
        }
    }
}

/// The immune response automaton.
pub struct Automaton {
    width: usize,
    height: usize,
    config: AutomatonConfig,
    disease_active: bool,
    tick: Tick,
    t_cell_production_rate: u32,
    next_cell_id: u64,
    rng: ChaCha8Rng,
    palette: Palette,

    // Fields
    antigen: Grid<bool>,
    antibodies: Grid<bool>,
    cytokine: Grid<f64>,
    suppressor: Grid<f64>,

    // Populations
    helper_cells: Population,
    b_cells: Population,
    t_cells: Population,

    history: Vec<StepReport>,
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tick", &self.tick)
            .field("disease_active", &self.disease_active)
            .field("helper_cells", &self.helper_cells.len())
            .field("b_cells", &self.b_cells.len())
            .field("t_cells", &self.t_cells.len())
            .finish()
    }
}

impl Automaton {
    /// Create an automaton with default configuration, empty populations and zeroed fields.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_config(width, height, AutomatonConfig::default())
    }

    /// Create an automaton with the specified configuration.
    pub fn from_config(width: usize, height: usize, config: AutomatonConfig) -> Result<Self> {
        config.validate()?;
        let rng = config.seeded_rng();
        Ok(Self {
            width,
            height,
            disease_active: false,
            tick: 0,
            t_cell_production_rate: config.min_t_cell_production_rate,
            next_cell_id: 0,
            rng,
            palette: Palette::default(),
            antigen: Grid::new(width, height)?,
            antibodies: Grid::new(width, height)?,
            cytokine: Grid::new(width, height)?,
            suppressor: Grid::new(width, height)?,
            helper_cells: Population::new(CellKind::Helper),
            b_cells: Population::new(CellKind::BCell),
            t_cells: Population::new(CellKind::TCell),
            history: Vec::new(),
            config,
        })
    }

    /// Use a custom palette for snapshots.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Re-seed the random source.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Install the antigen map. It must match the automaton's dimensions.
    pub fn set_antigen_map(&mut self, antigen: Grid<bool>) -> Result<()> {
        antigen.check_dimensions(self.width, self.height)?;
        info!(
            antigen_cells = antigen.count(|&a| a),
            width = self.width,
            height = self.height,
            "antigen map installed"
        );
        self.antigen = antigen;
        Ok(())
    }

    /// Switch to disease mode: lower antigen affinity and attack probability.
    ///
    /// One-way; calling it again has no effect.
    pub fn activate_disease(&mut self) {
        if self.disease_active {
            return;
        }
        self.config.antigen_affinity = self.config.disease.antigen_affinity;
        self.config.r_t_attack = self.config.disease.r_t_attack;
        self.disease_active = true;
        info!(
            antigen_affinity = self.config.antigen_affinity,
            r_t_attack = self.config.r_t_attack,
            "disease mode activated"
        );
    }

    /// Number of T-cells that have been activated.
    pub fn active_t_cell_count(&self) -> usize {
        self.t_cells.active_count()
    }

    // --- Seeding ---

    /// Place a helper cell at `pos` unless one is already there.
    pub fn spawn_helper_cell(&mut self, pos: GridPos) -> Result<bool> {
        self.antigen.check_bounds(pos)?;
        if self.helper_cells.is_occupied(pos) {
            return Ok(false);
        }
        self.push_cell(pos, CellKind::Helper);
        Ok(true)
    }

    /// Place a B-cell at `pos` unless one is already there.
    pub fn spawn_b_cell(&mut self, pos: GridPos) -> Result<bool> {
        self.antigen.check_bounds(pos)?;
        if self.b_cells.is_occupied(pos) {
            return Ok(false);
        }
        self.push_cell(pos, CellKind::BCell);
        Ok(true)
    }

    /// Place an inactive T-cell at `pos`. Bypasses the population cap.
    pub fn spawn_t_cell(&mut self, pos: GridPos) -> Result<CellId> {
        self.antigen.check_bounds(pos)?;
        Ok(self.push_cell(pos, CellKind::TCell))
    }

    /// Set the antibody flag at `pos`.
    pub fn deposit_antibody(&mut self, pos: GridPos) -> Result<()> {
        self.antibodies.check_bounds(pos)?;
        self.antibodies[pos] = true;
        Ok(())
    }

    fn push_cell(&mut self, pos: GridPos, kind: CellKind) -> CellId {
        let id = CellId(self.next_cell_id);
        self.next_cell_id += 1;
        let (inflammation, population) = match kind {
            CellKind::Helper => (self.config.helper_cell_inflammation, &mut self.helper_cells),
            CellKind::BCell => (self.config.b_cell_inflammation, &mut self.b_cells),
            CellKind::TCell => (self.config.t_cell_inflammation, &mut self.t_cells),
        };
        population.push(ImmuneCell::new(
            id,
            pos,
            kind,
            inflammation,
            self.config.antigen_affinity,
        ));
        id
    }

    // --- Stepping ---

    /// Run a single tick.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();

        report.production_rate = self.update_production_rate();
        report.t_cells_spawned = self.spawn_boundary_t_cells();
        report.helpers_born = self.update_helper_cells();
        report.b_cells_born = self.update_b_cells();
        report.antibodies_deposited = self.update_antibodies();
        self.inject_antibody_cytokines();
        self.move_and_attack(&mut report);

        report.helpers_removed = self.helper_cells.sweep();
        report.b_cells_removed = self.b_cells.sweep();
        report.t_cells_removed = self.t_cells.sweep();

        cytokine::diffuse(
            &mut self.cytokine,
            &self.antigen,
            self.config.cytokine_diffusion,
            self.config.cytokine_dissipation,
        );

        self.tick += 1;
        report.tick = self.tick;
        debug!(
            tick = report.tick,
            t_cells = self.t_cells.len(),
            spawned = report.t_cells_spawned,
            kills = report.kills,
            inflammations = report.inflammations,
            "step complete"
        );
        self.history.push(report.clone());
        report
    }

    /// Run the simulation for `steps` ticks.
    pub fn run(&mut self, steps: u64) -> Vec<StepReport> {
        (0..steps).map(|_| self.step()).collect()
    }

    /// Run `steps` ticks, capturing a frame before the first and after each one.
    ///
    /// Returns `steps + 1` frames.
    pub fn evolve_with_history(&mut self, steps: u64) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(steps as usize + 1);
        frames.push(self.snapshot());
        for _ in 0..steps {
            self.step();
            frames.push(self.snapshot());
        }
        frames
    }

    fn update_production_rate(&mut self) -> u32 {
        let active = self.active_t_cell_count() as f64;
        let min = self.config.min_t_cell_production_rate as f64;
        let max = self.config.max_t_cell_production_rate as f64;
        self.t_cell_production_rate = (min + (active / max) * (max - min)) as u32;
        self.t_cell_production_rate
    }

    fn spawn_boundary_t_cells(&mut self) -> usize {
        let len = self.t_cells.len();
        let cap = self.config.max_t_cells;
        if len >= cap {
            return 0;
        }
        let count = (self.t_cell_production_rate as usize).min(cap - len);
        for _ in 0..count {
            let boundary = Boundary::ALL[self.rng.gen_range(0..Boundary::ALL.len())];
            let pos = boundary.random_cell(self.width, self.height, &mut self.rng);
            self.push_cell(pos, CellKind::TCell);
        }
        count
    }

    fn update_helper_cells(&mut self) -> usize {
        let mut born = 0;
        for pos in self.antigen.set_positions() {
            if self.rng.gen::<f64>() < self.config.r_helper && !self.helper_cells.is_occupied(pos)
            {
                self.push_cell(pos, CellKind::Helper);
                cytokine::raise(&mut self.cytokine, pos, self.config.helper_cell_inflammation);
                born += 1;
            }
        }
        born
    }

    fn update_b_cells(&mut self) -> usize {
        let mut born = 0;
        let helper_positions: Vec<GridPos> =
            self.helper_cells.iter().map(|c| c.position()).collect();
        for pos in helper_positions {
            if self.rng.gen::<f64>() < self.config.r_b_cell && !self.b_cells.is_occupied(pos) {
                self.push_cell(pos, CellKind::BCell);
                cytokine::raise(&mut self.cytokine, pos, self.config.b_cell_inflammation);
                born += 1;
            }
        }
        born
    }

    fn update_antibodies(&mut self) -> usize {
        let mut deposited = 0;
        for cell in self.b_cells.iter() {
            if self.rng.gen::<f64>() < self.config.r_antibody {
                let pos = cell.position();
                if !self.antibodies[pos] {
                    deposited += 1;
                }
                self.antibodies[pos] = true;
            }
        }
        deposited
    }

    /// Antibody-bearing B-cells set (not add to) the local cytokine level.
    fn inject_antibody_cytokines(&mut self) {
        let level = self.config.b_cell_inflammation + self.config.helper_cell_inflammation;
        for cell in self.b_cells.iter() {
            let pos = cell.position();
            if self.antibodies[pos] {
                self.cytokine[pos] = level;
            }
        }
    }

    fn move_and_attack(&mut self, report: &mut StepReport) {
        let Self {
            config,
            rng,
            antigen,
            antibodies,
            cytokine: field,
            helper_cells,
            b_cells,
            t_cells,
            ..
        } = self;

        for cell in t_cells.iter_mut() {
            cell.move_cell(field, &config.chemotaxis, &mut *rng);
            let pos = cell.position();

            if antibodies[pos] && rng.gen::<f64>() < config.r_t_attack {
                antigen[pos] = false;
                antibodies[pos] = false;
                let b_hit = b_cells.mark_at(pos);
                let helper_hit = helper_cells.mark_at(pos);
                if !(b_hit && helper_hit) {
                    report.lookup_misses += 1;
                    warn!(
                        x = pos.x,
                        y = pos.y,
                        b_cell = b_hit,
                        helper = helper_hit,
                        "attack found no co-located cell to remove"
                    );
                }
                cell.set_active(true);
                report.kills += 1;
            } else if rng.gen::<f64>() < 1.0 - config.antigen_affinity {
                cytokine::raise(field, pos, config.t_cell_inflammation);
                cell.set_active(true);
                report.inflammations += 1;
            }

            if cell.age(config.max_t_cell_life) {
                report.t_cells_expired += 1;
            }
        }
    }

    // --- Accessors ---

    /// Render the current state with the automaton's palette.
    pub fn snapshot(&self) -> Frame {
        Frame::render(
            self.tick,
            &self.antigen,
            &self.antibodies,
            &self.t_cells,
            &self.palette,
        )
    }

    /// Get automaton statistics.
    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            tick: self.tick,
            width: self.width,
            height: self.height,
            helper_cells: self.helper_cells.len(),
            b_cells: self.b_cells.len(),
            t_cells: self.t_cells.len(),
            active_t_cells: self.active_t_cell_count(),
            antigen_cells: self.antigen_count(),
            antibody_cells: self.antibodies.count(|&a| a),
            total_cytokine: cytokine::total(&self.cytokine),
            peak_cytokine: cytokine::peak(&self.cytokine),
            production_rate: self.t_cell_production_rate,
            disease_active: self.disease_active,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Current configuration, including any disease-mode overrides.
    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn is_disease_active(&self) -> bool {
        self.disease_active
    }

    pub fn t_cell_production_rate(&self) -> u32 {
        self.t_cell_production_rate
    }

    pub fn antigen(&self) -> &Grid<bool> {
        &self.antigen
    }

    pub fn antigen_count(&self) -> usize {
        self.antigen.count(|&a| a)
    }

    pub fn antibodies(&self) -> &Grid<bool> {
        &self.antibodies
    }

    pub fn cytokine(&self) -> &Grid<f64> {
        &self.cytokine
    }

    /// Mutable access to the cytokine field, for seeding initial conditions.
    pub fn cytokine_mut(&mut self) -> &mut Grid<f64> {
        &mut self.cytokine
    }

    /// Suppressor concentration. Allocated but not driven by any rule yet.
    pub fn suppressor(&self) -> &Grid<f64> {
        &self.suppressor
    }

    pub fn suppressor_threshold(&self) -> f64 {
        self.config.suppressor_threshold
    }

    pub fn helper_cells(&self) -> &Population {
        &self.helper_cells
    }

    pub fn b_cells(&self) -> &Population {
        &self.b_cells
    }

    pub fn t_cells(&self) -> &Population {
        &self.t_cells
    }

    /// Reports of every step taken so far.
    pub fn history(&self) -> &[StepReport] {
        &self.history
    }
}
