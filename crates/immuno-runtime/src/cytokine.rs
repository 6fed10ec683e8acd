//! Cytokine field: the diffusing signal that drives chemotaxis.
//!
//! Cells raise the concentration where they signal; a relaxation pass
//! spreads it each tick. Antigen cells act as fixed sources: diffusion
//! never touches them, and it never touches the outer border either.

use immuno_core::grid::Grid;
use immuno_core::types::GridPos;

/// Add `amount` at `pos`.
pub fn raise(field: &mut Grid<f64>, pos: GridPos, amount: f64) {
    field[pos] += amount;
}

/// One in-place relaxation sweep over interior cells, row by row.
///
/// `c ← max(0, c + rate·(Σ neighbors − 4c) − dissipation)`. Cells updated
/// earlier in the sweep feed their new value into later ones. Cells where
/// `frozen` is set keep their value.
pub fn diffuse(field: &mut Grid<f64>, frozen: &Grid<bool>, rate: f64, dissipation: f64) {
    let (width, height) = field.dimensions();
    if width < 3 || height < 3 {
        return;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let pos = GridPos::new(x, y);
            if frozen[pos] {
                continue;
            }
            let c = field[pos];
            let neighbors = field[GridPos::new(x + 1, y)]
                + field[GridPos::new(x - 1, y)]
                + field[GridPos::new(x, y - 1)]
                + field[GridPos::new(x, y + 1)];
            field[pos] = (c + rate * (neighbors - 4.0 * c) - dissipation).max(0.0);
        }
    }
}

/// Sum of all concentrations.
pub fn total(field: &Grid<f64>) -> f64 {
    field.cells().iter().sum()
}

/// Largest concentration.
pub fn peak(field: &Grid<f64>) -> f64 {
    field.cells().iter().cloned().fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(width: usize, height: usize, at: GridPos, value: f64) -> Grid<f64> {
        Grid::from_fn(width, height, |p| if p == at { value } else { 0.0 }).unwrap()
    }

    #[test]
    fn point_source_spreads_to_neighbors() {
        let mut field = spike(5, 5, GridPos::new(2, 2), 1.0);
        let frozen = Grid::new(5, 5).unwrap();
        diffuse(&mut field, &frozen, 0.1, 0.0);

        assert!(field[GridPos::new(2, 2)] < 1.0);
        assert!(field[GridPos::new(1, 2)] > 0.0);
        assert!(field[GridPos::new(3, 2)] > 0.0);
        assert!(field[GridPos::new(2, 1)] > 0.0);
        assert!(field[GridPos::new(2, 3)] > 0.0);
    }

    #[test]
    fn border_cells_are_never_updated() {
        let mut field = Grid::from_fn(6, 5, |p| (p.x + p.y) as f64 * 0.1).unwrap();
        let before = field.clone();
        let frozen = Grid::new(6, 5).unwrap();
        diffuse(&mut field, &frozen, 0.3, 0.0);

        for (pos, value) in before.iter() {
            let border = pos.x == 0 || pos.y == 0 || pos.x == 5 || pos.y == 4;
            if border {
                assert_eq!(field[pos], *value, "border cell {:?} changed", pos);
            }
        }
    }

    #[test]
    fn frozen_cells_keep_their_value() {
        let mut field = Grid::from_fn(7, 7, |p| ((p.x * 3 + p.y * 5) % 7) as f64 * 0.2).unwrap();
        let frozen = Grid::from_fn(7, 7, |p| p.x == 3 || p.y == 2).unwrap();
        let before = field.clone();
        diffuse(&mut field, &frozen, 0.3, 0.05);

        for pos in frozen.set_positions() {
            assert_eq!(field[pos], before[pos]);
        }
    }

    #[test]
    fn dissipation_never_drives_values_negative() {
        let mut field =
            Grid::from_fn(8, 8, |p| if (p.x + p.y) % 2 == 0 { 0.01 } else { 1.0 }).unwrap();
        let frozen = Grid::new(8, 8).unwrap();
        for _ in 0..20 {
            diffuse(&mut field, &frozen, 0.3, 0.2);
            assert!(field.cells().iter().all(|&c| c >= 0.0));
        }
    }

    #[test]
    fn tiny_grids_have_no_interior() {
        let mut field = Grid::filled(2, 2, 1.0).unwrap();
        let frozen = Grid::new(2, 2).unwrap();
        diffuse(&mut field, &frozen, 0.3, 0.5);
        assert_eq!(field.cells(), &[1.0; 4]);
    }

    #[test]
    fn total_and_peak() {
        let field = spike(3, 3, GridPos::new(1, 1), 0.4);
        assert_eq!(total(&field), 0.4);
        assert_eq!(peak(&field), 0.4);
    }
}
