//! Solve strategies: automated players used by the arena and benches.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::engine::models::PlayerAction;
use crate::games::hex_flip::state::GameState;
use crate::games::hex_flip::types::HexCoord;

/// A strategy picks the next command for a game, or `None` to give up.
pub trait SolveStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn choose_action(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<PlayerAction>;
}

/// Every cell where the current piece can go right now.
pub fn valid_placements(state: &GameState) -> Vec<HexCoord> {
    let Some(piece) = state.current_piece() else {
        return vec![];
    };
    if state.is_piece_placed(state.current_piece_index()) {
        return vec![];
    }
    state
        .grid()
        .hexes()
        .filter(|h| h.height > 0)
        .map(|h| h.coord())
        .filter(|&c| state.can_place_piece(piece, c, true))
        .collect()
}

/// Replays the generator's solution: place at the hint, or move on to a
/// piece that has one.
pub struct HintStrategy;

impl SolveStrategy for HintStrategy {
    fn name(&self) -> &str {
        "hint"
    }

    fn choose_action(&self, state: &GameState, _rng: &mut dyn RngCore) -> Option<PlayerAction> {
        if state.is_game_won() {
            return None;
        }
        match state.solution_hint() {
            Some(at) if state.can_place_piece(state.current_piece()?, at, true) => {
                Some(PlayerAction::Place { q: at.q, r: at.r })
            }
            _ => state
                .next_piece_index()
                .map(|_| PlayerAction::Cycle { direction: 1 }),
        }
    }
}

/// Places the current piece at a uniformly random valid cell. When it fits
/// nowhere, tries another piece now and then, otherwise backs up one move.
pub struct RandomStrategy {
    /// Chance of switching pieces instead of undoing when stuck.
    pub cycle_probability: f64,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self {
            cycle_probability: 0.5,
        }
    }
}

impl SolveStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&self, state: &GameState, rng: &mut dyn RngCore) -> Option<PlayerAction> {
        if state.is_game_won() {
            return None;
        }

        let placements = valid_placements(state);
        if let Some(at) = placements.choose(rng) {
            return Some(PlayerAction::Place { q: at.q, r: at.r });
        }

        let can_cycle = state.next_piece_index().is_some();
        if can_cycle && (!state.can_undo() || rng.gen_bool(self.cycle_probability)) {
            Some(PlayerAction::Cycle { direction: 1 })
        } else if state.can_undo() {
            Some(PlayerAction::Undo)
        } else {
            None
        }
    }
}

/// Build a strategy by name: `"hint"` or `"random"`.
pub fn strategy_by_name(name: &str) -> Option<Box<dyn SolveStrategy>> {
    match name {
        "hint" => Some(Box::new(HintStrategy)),
        "random" => Some(Box::new(RandomStrategy::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::simulator::PlaySession;

    #[test]
    fn test_hint_strategy_places_at_hint() {
        let state = GameState::with_seed(3, 4, 1);
        let mut rng = StdRng::seed_from_u64(0);
        let hint = state.solution_hint().unwrap();
        assert_eq!(
            HintStrategy.choose_action(&state, &mut rng),
            Some(PlayerAction::Place { q: hint.q, r: hint.r })
        );
    }

    #[test]
    fn test_hint_strategy_stops_when_won() {
        let mut session = PlaySession::new(GameState::with_seed(3, 4, 1));
        let mut rng = StdRng::seed_from_u64(0);
        while let Some(action) = HintStrategy.choose_action(session.state(), &mut rng) {
            assert!(session.apply(&action).applied);
        }
        assert!(session.state().is_game_won());
    }

    #[test]
    fn test_valid_placements_all_fit() {
        let state = GameState::with_seed(4, 10, 3);
        let piece = state.current_piece().unwrap();
        let placements = valid_placements(&state);
        assert!(!placements.is_empty());
        for at in placements {
            assert!(state.can_place_piece(piece, at, true));
        }
    }

    #[test]
    fn test_random_strategy_only_issues_legal_places() {
        let mut session = PlaySession::new(GameState::with_seed(3, 6, 4));
        let strategy = RandomStrategy::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let Some(action) = strategy.choose_action(session.state(), &mut rng) else {
                break;
            };
            let outcome = session.apply(&action);
            if let PlayerAction::Place { .. } = action {
                assert!(outcome.applied);
            }
        }
    }

    #[test]
    fn test_strategy_by_name() {
        assert_eq!(strategy_by_name("hint").unwrap().name(), "hint");
        assert_eq!(strategy_by_name("random").unwrap().name(), "random");
        assert!(strategy_by_name("mcts").is_none());
    }
}
