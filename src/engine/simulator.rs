//! PlaySession: drives one GameState from player commands.
//!
//! The session is the single owner of its game. It feeds the in-order
//! tracker before each placement and produces the completion record exactly
//! once, on the action that turns the board to all zeros.

use crate::engine::models::PlayerAction;
use crate::games::hex_flip::completion::{GameCompletionData, InOrderTracker};
use crate::games::hex_flip::state::GameState;
use crate::games::hex_flip::types::HexCoord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The command changed the game (or revealed a hint).
    pub applied: bool,
    pub hint: Option<HexCoord>,
    /// Set only on the action that won the game.
    pub completion: Option<GameCompletionData>,
}

pub struct PlaySession {
    state: GameState,
    tracker: InOrderTracker,
    completion: Option<GameCompletionData>,
}

impl PlaySession {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            tracker: InOrderTracker::new(),
            completion: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn tracker(&self) -> &InOrderTracker {
        &self.tracker
    }

    /// Completion record of the last win, cleared by `Restart`.
    pub fn completion(&self) -> Option<&GameCompletionData> {
        self.completion.as_ref()
    }

    pub fn apply(&mut self, action: &PlayerAction) -> ActionOutcome {
        let was_won = self.state.is_game_won();
        let mut hint = None;

        let applied = match *action {
            PlayerAction::Place { q, r } => {
                let index = self.state.current_piece_index();
                let placed = self.state.place_piece(HexCoord::new(q, r));
                if placed {
                    self.tracker.track_piece_placed(index);
                }
                placed
            }
            PlayerAction::Undo => {
                let undone = self.state.undo();
                if undone {
                    self.tracker.track_undo();
                }
                undone
            }
            PlayerAction::Redo => {
                let redone = self.state.redo();
                if let Some(mv) = self.state.history().last().filter(|_| redone) {
                    self.tracker.track_piece_placed(mv.piece_index);
                }
                redone
            }
            PlayerAction::Cycle { direction } => self.state.cycle_piece(direction as isize),
            PlayerAction::Select { piece_index } => self.state.set_current_piece_index(piece_index),
            PlayerAction::Hint => {
                hint = self.state.solution_hint();
                if hint.is_some() {
                    self.state.increment_hint_count();
                }
                hint.is_some()
            }
            PlayerAction::Restart => {
                self.state.restart();
                self.tracker.reset();
                self.completion = None;
                true
            }
        };

        tracing::trace!(%action, applied, "action");

        let mut outcome = ActionOutcome {
            applied,
            hint,
            completion: None,
        };
        if !was_won && self.state.is_game_won() {
            let data = GameCompletionData::from_state(&self.state, self.tracker.is_placed_in_order());
            tracing::debug!(
                difficulty = %data.difficulty,
                moves = data.move_count,
                undos = data.undo_count,
                hints = data.hint_count,
                in_order = data.placed_in_order,
                "game won"
            );
            self.completion = Some(data);
            outcome.completion = Some(data);
        }

        outcome
    }
}
