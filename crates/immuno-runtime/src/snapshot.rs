//! Color-coded frames of the automaton for external renderers.
//!
//! A frame is a `height × width × 3` RGB grid. Layers are painted in order:
//! white background, antigen, antibody, then T-cells. Later layers win, so
//! an antibody hides the antigen under it and a T-cell hides both. Helper
//! and B-cells are not drawn.

use crate::population::Population;
use immuno_core::grid::Grid;
use immuno_core::types::{GridPos, Tick};
use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Colors used to paint a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub antigen: Rgb,
    pub antibody: Rgb,
    pub inactive_t_cell: Rgb,
    pub active_t_cell: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            antigen: [255, 221, 84],
            antibody: [23, 152, 232],
            inactive_t_cell: [222, 29, 29],
            active_t_cell: [101, 255, 18],
        }
    }
}

/// One rendered state of the automaton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    tick: Tick,
    width: usize,
    height: usize,
    /// Row-major pixels.
    pixels: Vec<Rgb>,
}

impl Frame {
    /// Paint the given layers into a new frame.
    pub fn render(
        tick: Tick,
        antigen: &Grid<bool>,
        antibodies: &Grid<bool>,
        t_cells: &Population,
        palette: &Palette,
    ) -> Self {
        let (width, height) = antigen.dimensions();
        let mut frame = Frame {
            tick,
            width,
            height,
            pixels: vec![palette.background; width * height],
        };

        for (pos, &present) in antigen.iter() {
            if present {
                frame.paint(pos, palette.antigen);
            }
        }
        for (pos, &present) in antibodies.iter() {
            if present {
                frame.paint(pos, palette.antibody);
            }
        }
        for cell in t_cells.iter() {
            let color = if cell.is_active() {
                palette.active_t_cell
            } else {
                palette.inactive_t_cell
            };
            frame.paint(cell.position(), color);
        }
        frame
    }

    fn paint(&mut self, pos: GridPos, color: Rgb) {
        let idx = pos.y * self.width + pos.x;
        self.pixels[idx] = color;
    }

    /// Tick at which the frame was taken.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width, 3)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, 3)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, pos: GridPos) -> Option<Rgb> {
        if pos.within(self.width, self.height) {
            Some(self.pixels[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    /// Whether every pixel is `color`.
    pub fn is_uniform(&self, color: Rgb) -> bool {
        self.pixels.iter().all(|&p| p == color)
    }

    /// Number of pixels painted `color`.
    pub fn count_color(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}
