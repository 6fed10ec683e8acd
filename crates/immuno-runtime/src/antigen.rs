//! Antigen map builders.
//!
//! The automaton takes any `Grid<bool>`; these cover the shapes used by
//! the CLI and tests.

use immuno_core::error::Result;
use immuno_core::grid::Grid;
use immuno_core::types::GridPos;

/// Filled disc of radius `radius` centered on `center` (no wraparound).
pub fn disc(width: usize, height: usize, center: GridPos, radius: f64) -> Result<Grid<bool>> {
    let r2 = radius * radius;
    Grid::from_fn(width, height, |p| {
        let dx = p.x as f64 - center.x as f64;
        let dy = p.y as f64 - center.y as f64;
        dx * dx + dy * dy <= r2
    })
}

/// Axis-aligned rectangle with top-left corner `origin`, clipped to the grid.
pub fn rect(
    width: usize,
    height: usize,
    origin: GridPos,
    rect_width: usize,
    rect_height: usize,
) -> Result<Grid<bool>> {
    Grid::from_fn(width, height, |p| {
        p.x >= origin.x
            && p.y >= origin.y
            && p.x < origin.x + rect_width
            && p.y < origin.y + rect_height
    })
}

/// Antigen at exactly the listed cells. Every cell must lie on the grid.
pub fn from_cells(width: usize, height: usize, cells: &[GridPos]) -> Result<Grid<bool>> {
    let mut grid: Grid<bool> = Grid::new(width, height)?;
    for &pos in cells {
        grid.check_bounds(pos)?;
        grid[pos] = true;
    }
    Ok(grid)
}
