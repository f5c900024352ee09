//! Level generation reliability across the standard and custom board sizes.
//!
//! Run the heavy stress pass with:
//!     cargo test --release --test level_generation -- --ignored --nocapture

use std::collections::BTreeSet;

use hex_flip_engine::engine::arena::run_arena;
use hex_flip_engine::engine::presets::builtin_presets;
use hex_flip_engine::engine::strategy::HintStrategy;
use hex_flip_engine::games::hex_flip::grid::HexGrid;
use hex_flip_engine::games::hex_flip::state::GameState;
use hex_flip_engine::games::hex_flip::types::{Difficulty, GameSettings, HexCoord};

fn assert_well_formed(state: &GameState, radius: u32, pieces: usize) {
    assert_eq!(state.pieces().len(), pieces);
    assert_eq!(state.grid().len(), HexGrid::cell_count_for(radius));
    assert!(state.placed_pieces().is_empty());
    assert!(state.history().is_empty());
    assert_eq!(state.current_piece_index(), 0);

    // Starting heights are exactly the solution footprints stacked up.
    let footprint_total: usize = state
        .solution()
        .iter()
        .map(|m| state.pieces()[m.piece_index].len())
        .sum();
    assert_eq!(state.remaining_height(), footprint_total as u64);

    for piece in state.pieces() {
        assert!((3..=7).contains(&piece.len()));
        assert_eq!(piece.center, HexCoord::ORIGIN);
        let unique: BTreeSet<HexCoord> = piece.tiles.iter().copied().collect();
        assert_eq!(unique.len(), piece.len());
    }
}

#[test]
fn test_standard_difficulties_generate() {
    for (name, preset) in builtin_presets() {
        for seed in 0..100 {
            let state = GameState::with_seed(preset.radius, preset.pieces, seed);
            assert_well_formed(&state, preset.radius, preset.pieces);
            assert_ne!(state.difficulty(), Difficulty::Custom, "{name}");
        }
    }
}

#[test]
fn test_extreme_custom_configurations_generate() {
    let configs = [(5, 20), (6, 30), (2, 10), (1, 5), (7, 50)];
    for (radius, pieces) in configs {
        for seed in 0..40 {
            let state = GameState::with_seed(radius, pieces, seed);
            assert_well_formed(&state, radius, pieces);
            assert_eq!(state.difficulty(), Difficulty::Custom);
        }
    }
}

#[test]
fn test_constrained_boards_stack_instead_of_failing() {
    for (radius, pieces) in [(1, 20), (1, 50), (2, 50)] {
        for seed in 0..20 {
            let state = GameState::with_seed(radius, pieces, seed);
            assert_well_formed(&state, radius, pieces);
            assert_eq!(state.solution().len(), pieces);
        }
    }
}

#[test]
fn test_small_board_many_pieces_has_tall_stacks() {
    let state = GameState::new(2, 15);
    assert_well_formed(&state, 2, 15);
    // At least 45 tiles over 19 cells.
    assert!(state.grid().max_height() >= 3);
    assert!(state.current_piece().is_some());
}

#[test]
fn test_every_piece_has_a_hint_on_small_board() {
    let mut state = GameState::with_seed(2, 15, 11);
    let mut hinted = BTreeSet::new();
    for i in 0..15 {
        if state.solution_hint().is_some() {
            hinted.insert(state.current_piece_index());
        }
        if i < 14 {
            assert!(state.cycle_piece(1));
        }
    }
    assert_eq!(hinted.len(), 15);

    let hint = state.solution_hint().unwrap();
    let piece = state.current_piece().unwrap();
    assert!(state.can_place_piece(piece, hint, true));
}

#[test]
fn test_following_hints_solves_small_board() {
    let mut state = GameState::with_seed(2, 15, 5);
    let mut attempts = 0;
    while !state.is_game_won() && attempts < 100 {
        attempts += 1;
        match state.solution_hint() {
            Some(at) if state.place_piece(at) => {}
            _ => {
                state.cycle_piece(1);
            }
        }
    }
    assert!(state.is_game_won());
    assert!(state.all_pieces_placed());
    assert!(attempts <= 100);
}

#[test]
fn test_radius_three_grid_shape() {
    let state = GameState::with_seed(3, 4, 0);
    assert_eq!(state.grid().len(), 37);
    assert!(state.grid().contains(HexCoord::new(3, -3)));
    assert!(!state.grid().contains(HexCoord::new(3, 1)));
    assert_eq!(state.difficulty(), Difficulty::Easy);
}

#[test]
fn test_same_seed_same_level() {
    let a = GameState::with_seed(4, 14, 99);
    let b = GameState::with_seed(4, 14, 99);
    assert_eq!(a.pieces(), b.pieces());
    assert_eq!(a.solution(), b.solution());
    assert_eq!(a.grid().heights(), b.grid().heights());
}

#[test]
fn test_hint_arena_solves_all_presets() {
    for (name, preset) in builtin_presets() {
        let result = run_arena(preset.settings(), &HintStrategy, 25, 1000, 200, None);
        assert_eq!(result.solved(), 25, "{name}");
        assert_eq!(result.levels_with_unhinted_pieces(), 0, "{name}");
    }
}

#[test]
#[ignore]
fn stress_generation_and_hint_solve() {
    let configs = [(1, 50), (2, 15), (3, 8), (4, 14), (7, 50), (8, 15)];
    for (radius, pieces) in configs {
        let settings = GameSettings::new(radius, pieces);
        let result = run_arena(settings, &HintStrategy, 1000, 0, 10 * pieces + 10, None);
        println!("{}\n", result.summary());
        assert_eq!(result.solved(), result.num_games());
    }
}
