//! Integration tests: full automaton runs.

use immuno_runtime::prelude::*;

fn recruiting_config(seed: u64) -> AutomatonConfig {
    AutomatonConfig {
        r_helper: 1.0,
        r_b_cell: 1.0,
        r_antibody: 1.0,
        r_t_attack: 1.0,
        ..AutomatonConfig::default()
    }
    .with_seed(seed)
}

fn all_positions_in_bounds(automaton: &Automaton) -> bool {
    let (w, h) = (automaton.width(), automaton.height());
    automaton
        .helper_cells()
        .iter()
        .chain(automaton.b_cells().iter())
        .chain(automaton.t_cells().iter())
        .all(|c| c.position().within(w, h))
}

#[test]
fn single_cell_grid_kill_is_deterministic() {
    let config = AutomatonConfig {
        max_t_cells: 1,
        r_helper: 0.0,
        r_b_cell: 0.0,
        r_antibody: 0.0,
        ..AutomatonConfig::default()
    }
    .with_seed(0);
    let mut automaton = Automaton::from_config(1, 1, config).unwrap();
    let origin = GridPos::new(0, 0);
    automaton
        .set_antigen_map(antigen::from_cells(1, 1, &[origin]).unwrap())
        .unwrap();
    automaton.spawn_helper_cell(origin).unwrap();
    automaton.spawn_b_cell(origin).unwrap();
    automaton.deposit_antibody(origin).unwrap();
    automaton.spawn_t_cell(origin).unwrap();

    let report = automaton.step();

    assert_eq!(report.t_cells_spawned, 0, "population already at the cap");
    assert_eq!(report.kills, 1);
    assert_eq!(report.lookup_misses, 0);
    assert!(!automaton.antigen()[origin]);
    assert!(!automaton.antibodies()[origin]);
    assert!(automaton.helper_cells().is_empty());
    assert!(automaton.b_cells().is_empty());
    assert_eq!(automaton.t_cells().len(), 1);
    assert!(automaton.t_cells().cells()[0].is_active());
    assert_eq!(automaton.active_t_cell_count(), 1);
}

#[test]
fn kill_without_co_located_cells_is_a_no_op() {
    let config = AutomatonConfig {
        max_t_cells: 1,
        r_helper: 0.0,
        r_b_cell: 0.0,
        r_antibody: 0.0,
        ..AutomatonConfig::default()
    }
    .with_seed(4);
    let mut automaton = Automaton::from_config(1, 1, config).unwrap();
    let origin = GridPos::new(0, 0);
    automaton
        .set_antigen_map(antigen::from_cells(1, 1, &[origin]).unwrap())
        .unwrap();
    automaton.deposit_antibody(origin).unwrap();
    automaton.spawn_t_cell(origin).unwrap();

    let report = automaton.step();

    assert_eq!(report.kills, 1);
    assert_eq!(report.lookup_misses, 1, "no helper or b-cell to remove");
    assert_eq!(report.helpers_removed + report.b_cells_removed, 0);
    assert!(!automaton.antigen()[origin]);
    assert!(!automaton.antibodies()[origin]);
    assert!(automaton.t_cells().cells()[0].is_active());
}

#[test]
fn small_antigen_is_cleared_and_stays_cleared() {
    let mut automaton = Automaton::from_config(5, 5, recruiting_config(11)).unwrap();
    automaton
        .set_antigen_map(antigen::from_cells(5, 5, &[GridPos::new(2, 2)]).unwrap())
        .unwrap();

    let mut cleared_at = None;
    for _ in 0..500 {
        automaton.step();
        if automaton.antigen_count() == 0 {
            cleared_at = Some(automaton.tick());
            break;
        }
    }
    assert!(cleared_at.is_some(), "antigen survived 500 steps");

    for _ in 0..50 {
        automaton.step();
        assert_eq!(automaton.antigen_count(), 0);
    }
}

#[test]
fn cells_stay_on_the_grid() {
    let config = AutomatonConfig {
        r_helper: 0.2,
        r_b_cell: 0.5,
        r_antibody: 0.5,
        antigen_affinity: 0.5,
        ..AutomatonConfig::default()
    }
    .with_seed(5);
    let mut automaton = Automaton::from_config(13, 9, config).unwrap();
    automaton
        .set_antigen_map(antigen::disc(13, 9, GridPos::new(6, 4), 2.5).unwrap())
        .unwrap();

    for _ in 0..200 {
        automaton.step();
        assert!(all_positions_in_bounds(&automaton));
    }
}

#[test]
fn t_cell_cap_is_never_exceeded() {
    let config = AutomatonConfig {
        max_t_cells: 12,
        antigen_affinity: 0.0,
        max_t_cell_life: 10_000,
        ..AutomatonConfig::default()
    }
    .with_seed(8);
    let mut automaton = Automaton::from_config(10, 10, config).unwrap();

    for _ in 0..100 {
        automaton.step();
        assert!(automaton.t_cells().len() <= 12);
    }
    assert_eq!(automaton.t_cells().len(), 12);
}

#[test]
fn history_frames_cover_every_step() {
    let mut automaton = Automaton::from_config(7, 4, recruiting_config(2)).unwrap();
    let frames = automaton.evolve_with_history(6);

    assert_eq!(frames.len(), 7);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.shape(), (4, 7, 3));
        assert_eq!(frame.tick(), i as u64);
    }
    assert!(frames[0].is_uniform(Palette::default().background));
    assert!(
        !frames[1].is_uniform(Palette::default().background),
        "a t-cell was born"
    );
}

#[test]
fn antigen_shows_in_the_first_frame() {
    let mut automaton = Automaton::new(6, 6).unwrap();
    automaton
        .set_antigen_map(antigen::rect(6, 6, GridPos::new(1, 1), 2, 2).unwrap())
        .unwrap();
    let frame = automaton.snapshot();
    assert_eq!(frame.count_color(Palette::default().antigen), 4);
}

#[test]
fn kills_match_antigen_loss() {
    let mut automaton = Automaton::from_config(9, 9, recruiting_config(21)).unwrap();
    automaton
        .set_antigen_map(antigen::disc(9, 9, GridPos::new(4, 4), 2.0).unwrap())
        .unwrap();

    let mut previous = automaton.antigen_count();
    for _ in 0..150 {
        let report = automaton.step();
        let current = automaton.antigen_count();
        assert_eq!(previous - current, report.kills);
        let antibodies = automaton.antibodies().cells();
        let antigen = automaton.antigen().cells();
        assert!(antibodies
            .iter()
            .zip(antigen)
            .all(|(&antibody, &antigen)| !antibody || antigen));
        previous = current;
    }
}

#[test]
fn same_seed_same_trajectory() {
    let run = |seed: u64| {
        let mut automaton = Automaton::from_config(11, 11, recruiting_config(seed)).unwrap();
        automaton
            .set_antigen_map(antigen::disc(11, 11, GridPos::new(5, 5), 2.0).unwrap())
            .unwrap();
        automaton.run(80);
        (automaton.stats(), automaton.snapshot())
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn mismatched_antigen_dimensions_are_an_error() {
    let mut automaton = Automaton::new(8, 6).unwrap();
    let err = automaton
        .set_antigen_map(Grid::new(6, 8).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        ImmunoError::Grid(GridError::DimensionMismatch { .. })
    ));
}

#[test]
fn disease_mode_clears_less_antigen() {
    let config = AutomatonConfig {
        max_t_cells: 5,
        r_helper: 1.0,
        r_b_cell: 1.0,
        r_antibody: 1.0,
        ..AutomatonConfig::default()
    };
    let antigen = antigen::disc(15, 15, GridPos::new(7, 7), 3.0).unwrap();
    let seeds: Vec<u64> = (0..16).collect();

    let comparison = compare_disease_mode(&config, &antigen, 60, &seeds, |_| {}).unwrap();

    assert_eq!(comparison.healthy.runs, 16);
    assert!(comparison.diseased_runs.iter().all(|r| r.disease));
    assert!(
        comparison.healthy.mean_fraction_cleared > comparison.diseased.mean_fraction_cleared,
        "healthy {:.3} vs disease {:.3}",
        comparison.healthy.mean_fraction_cleared,
        comparison.diseased.mean_fraction_cleared
    );
    assert!(comparison.clearance_gap() > 0.0);
}
