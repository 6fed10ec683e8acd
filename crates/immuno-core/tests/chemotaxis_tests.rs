//! Chemotaxis (SENSE) movement tests.

use immuno_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn active_t_cell(pos: GridPos) -> ImmuneCell {
    let mut cell = ImmuneCell::new(CellId(1), pos, CellKind::TCell, 0.05, 1.0);
    cell.set_active(true);
    cell
}

fn direction_counts(field: &Grid<f64>, start: GridPos, samples: usize, seed: u64) -> [usize; 5] {
    let params = ChemotaxisParams::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut counts = [0usize; 5];
    for _ in 0..samples {
        let mut cell = active_t_cell(start);
        let d = cell.move_cell(field, &params, &mut rng);
        counts[d.index()] += 1;
    }
    counts
}

#[test]
fn active_cell_in_flat_field_moves_uniformly() {
    let field = Grid::filled(9, 9, 0.4).unwrap();
    let samples = 20_000;
    let counts = direction_counts(&field, GridPos::new(4, 4), samples, 11);

    assert_eq!(counts[Direction::Stay.index()], 0, "stay weight is always 0");
    for d in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
        let freq = counts[d.index()] as f64 / samples as f64;
        assert!(
            (freq - 0.25).abs() < 0.02,
            "{:?} frequency {} should be near 0.25",
            d,
            freq
        );
    }
}

#[test]
fn active_cell_climbs_the_gradient() {
    // Concentration increases to the right and downward.
    let field = Grid::from_fn(9, 9, |p| p.x as f64 + 0.5 * p.y as f64).unwrap();
    let counts = direction_counts(&field, GridPos::new(4, 4), 40_000, 5);

    assert!(
        counts[Direction::Right.index()] > counts[Direction::Left.index()],
        "right {} should beat left {}",
        counts[Direction::Right.index()],
        counts[Direction::Left.index()]
    );
    assert!(
        counts[Direction::Down.index()] > counts[Direction::Up.index()],
        "down {} should beat up {}",
        counts[Direction::Down.index()],
        counts[Direction::Up.index()]
    );
}

#[test]
fn neighbor_lookup_wraps_at_the_border() {
    // High concentration only on the last column; a cell on column 0 sees
    // it as its left neighbor.
    let field = Grid::from_fn(6, 6, |p| if p.x == 5 { 1.0 } else { 0.0 }).unwrap();
    let params = ChemotaxisParams::default();
    let w = params.weights(&field, GridPos::new(0, 3));
    assert!(w[Direction::Left.index()] > w[Direction::Right.index()]);
}

#[test]
fn same_seed_same_walk() {
    let field = Grid::from_fn(8, 8, |p| (p.x * p.y) as f64 * 0.01).unwrap();
    let params = ChemotaxisParams::default();

    let walk = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cell = active_t_cell(GridPos::new(3, 3));
        (0..100)
            .map(|_| {
                cell.move_cell(&field, &params, &mut rng);
                cell.position()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(walk(42), walk(42));
}
