//! GameState: level generation, placement, undo/redo and win detection.
//!
//! The board at any moment is the generated starting heights with every move
//! in `history` replayed on top. Each [`Move`] records exactly the cells it
//! decremented and their previous heights, so undo restores them verbatim and
//! redo re-applies the same decrements without re-validating the placement.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::grid::HexGrid;
use super::pieces::generate_set;
use super::types::*;

pub struct GameState {
    settings: GameSettings,
    grid: HexGrid,
    pieces: Vec<Piece>,
    current_piece_index: usize,
    placed_pieces: BTreeSet<usize>,
    solution: Vec<SolutionMove>,
    history: Vec<Move>,
    redo_stack: Vec<Move>,
    initial_heights: Vec<u32>,
    undo_count: u32,
    hint_count: u32,
}

/// Serializable view of a game for front ends.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub settings: GameSettings,
    pub difficulty: Difficulty,
    pub cells: Vec<Hex>,
    pub pieces: Vec<Piece>,
    pub current_piece_index: usize,
    pub placed_pieces: Vec<usize>,
    pub move_count: usize,
    pub undo_count: u32,
    pub hint_count: u32,
    pub can_undo: bool,
    pub can_redo: bool,
    pub won: bool,
}

impl GameState {
    /// New level from OS entropy.
    pub fn new(radius: u32, num_pieces: usize) -> Self {
        let mut rng = StdRng::from_entropy();
        Self::generate(GameSettings::new(radius, num_pieces), &mut rng)
    }

    /// Reproducible level for a given seed.
    pub fn with_seed(radius: u32, num_pieces: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(GameSettings::new(radius, num_pieces), &mut rng)
    }

    pub fn generate<R: Rng + ?Sized>(settings: GameSettings, rng: &mut R) -> Self {
        let mut state = Self {
            settings,
            grid: HexGrid::new(settings.radius),
            pieces: Vec::new(),
            current_piece_index: 0,
            placed_pieces: BTreeSet::new(),
            solution: Vec::new(),
            history: Vec::new(),
            redo_stack: Vec::new(),
            initial_heights: Vec::new(),
            undo_count: 0,
            hint_count: 0,
        };
        state.generate_level(rng);
        state
    }

    /// Stack every piece onto the board at a random position where its whole
    /// footprint fits. A piece with no such position is left without a
    /// solution move; generation never retries.
    fn generate_level<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pieces = generate_set(self.settings.num_pieces, rng);
        self.solution.clear();
        self.placed_pieces.clear();
        self.history.clear();
        self.redo_stack.clear();
        self.current_piece_index = 0;
        self.grid.clear_heights();

        let positions: Vec<HexCoord> = self.grid.coords().collect();

        for index in 0..self.pieces.len() {
            let valid: Vec<HexCoord> = positions
                .iter()
                .copied()
                .filter(|&pos| self.can_place_piece(&self.pieces[index], pos, false))
                .collect();

            let Some(&pos) = valid.choose(rng) else {
                tracing::debug!(
                    piece = index,
                    tiles = self.pieces[index].len(),
                    radius = self.settings.radius,
                    "no valid position for piece, leaving it without a hint"
                );
                continue;
            };

            self.solution.push(SolutionMove {
                piece_index: index,
                q: pos.q,
                r: pos.r,
            });

            let cells: Vec<HexCoord> = self.pieces[index].footprint(pos).collect();
            for cell in cells {
                if let Some(hex) = self.grid.get_hex_mut(cell) {
                    hex.height += 1;
                }
            }
            tracing::debug!(piece = index, at = %pos, candidates = valid.len(), "placed piece");
        }

        self.initial_heights = self.grid.heights();
        tracing::debug!(
            radius = self.settings.radius,
            pieces = self.pieces.len(),
            solved_pieces = self.solution.len(),
            total_height = self.grid.total_height(),
            "level generated"
        );
    }

    /// Whether `piece` fits with its center on `at`. With `check_height`,
    /// every covered cell must also still have height left.
    pub fn can_place_piece(&self, piece: &Piece, at: HexCoord, check_height: bool) -> bool {
        piece.footprint(at).all(|cell| match self.grid.get_hex(cell) {
            Some(hex) => !check_height || hex.height > 0,
            None => false,
        })
    }

    /// Place the current piece with its center on `at`.
    ///
    /// Fails without side effects when the piece doesn't fit or is already
    /// placed. Clears the redo stack.
    pub fn place_piece(&mut self, at: HexCoord) -> bool {
        let index = self.current_piece_index;
        let Some(piece) = self.pieces.get(index) else {
            return false;
        };
        if !self.can_place_piece(piece, at, true) || self.placed_pieces.contains(&index) {
            return false;
        }

        self.redo_stack.clear();

        let cells: Vec<HexCoord> = piece.footprint(at).collect();
        let mut height_changes = Vec::with_capacity(cells.len());
        for cell in cells {
            if let Some(hex) = self.grid.get_hex_mut(cell) {
                // Cells already at zero are skipped and not recorded.
                if hex.height > 0 {
                    height_changes.push(HeightChange {
                        q: hex.q,
                        r: hex.r,
                        old_height: hex.height,
                    });
                    hex.height -= 1;
                }
            }
        }

        tracing::trace!(piece = index, at = %at, cells = height_changes.len(), "placed piece");
        self.history.push(Move {
            piece_index: index,
            q: at.q,
            r: at.r,
            height_changes,
        });
        self.placed_pieces.insert(index);
        self.find_next_unplaced_piece();

        true
    }

    /// Advance to the next unplaced piece, scanning forward and wrapping.
    /// Leaves the index unchanged when every piece is placed.
    fn find_next_unplaced_piece(&mut self) {
        let n = self.pieces.len();
        for i in 0..n {
            let index = (self.current_piece_index + 1 + i) % n;
            if !self.placed_pieces.contains(&index) {
                self.current_piece_index = index;
                return;
            }
        }
    }

    /// The unplaced piece reached by stepping `direction` from the current
    /// one, if it differs from the current piece.
    fn step_unplaced(&self, direction: isize) -> Option<usize> {
        if self.all_pieces_placed() {
            return None;
        }

        let n = self.pieces.len() as isize;
        let mut index = self.current_piece_index as isize;
        for _ in 0..n {
            index = (index + direction).rem_euclid(n);
            if index as usize == self.current_piece_index {
                return None;
            }
            if !self.placed_pieces.contains(&(index as usize)) {
                return Some(index as usize);
            }
        }
        None
    }

    /// Select the next (`+1`) or previous (`-1`) unplaced piece.
    pub fn cycle_piece(&mut self, direction: isize) -> bool {
        match self.step_unplaced(direction.signum()) {
            Some(index) => {
                self.current_piece_index = index;
                true
            }
            None => false,
        }
    }

    pub fn next_piece_index(&self) -> Option<usize> {
        self.step_unplaced(1)
    }

    pub fn previous_piece_index(&self) -> Option<usize> {
        self.step_unplaced(-1)
    }

    /// Select a piece directly. Fails for out-of-range or placed pieces.
    pub fn set_current_piece_index(&mut self, index: usize) -> bool {
        if index >= self.pieces.len() || self.placed_pieces.contains(&index) {
            return false;
        }
        self.current_piece_index = index;
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(mv) = self.history.pop() else {
            return false;
        };

        for change in &mv.height_changes {
            if let Some(hex) = self.grid.get_hex_mut(HexCoord::new(change.q, change.r)) {
                hex.height = change.old_height;
            }
        }

        self.placed_pieces.remove(&mv.piece_index);
        self.current_piece_index = mv.piece_index;
        self.undo_count += 1;
        tracing::trace!(piece = mv.piece_index, "undo");
        self.redo_stack.push(mv);

        true
    }

    /// Re-apply the most recently undone move. The recorded decrements are
    /// trusted; the placement is not checked again.
    pub fn redo(&mut self) -> bool {
        let Some(mv) = self.redo_stack.pop() else {
            return false;
        };

        for change in &mv.height_changes {
            if let Some(hex) = self.grid.get_hex_mut(HexCoord::new(change.q, change.r)) {
                hex.height = change.old_height.saturating_sub(1);
            }
        }

        self.placed_pieces.insert(mv.piece_index);
        tracing::trace!(piece = mv.piece_index, "redo");
        self.history.push(mv);
        self.find_next_unplaced_piece();

        true
    }

    /// Back to the generated starting board. Pieces and solution are kept.
    pub fn restart(&mut self) {
        self.grid.set_heights(&self.initial_heights);
        self.placed_pieces.clear();
        self.history.clear();
        self.redo_stack.clear();
        self.current_piece_index = 0;
        self.undo_count = 0;
        self.hint_count = 0;
    }

    /// Won when every cell is at height 0, however many pieces are placed.
    pub fn is_game_won(&self) -> bool {
        self.grid.all_zero()
    }

    /// Recorded solution position of the current piece, if it has one.
    pub fn solution_hint(&self) -> Option<HexCoord> {
        self.solution
            .iter()
            .find(|m| m.piece_index == self.current_piece_index)
            .map(|m| HexCoord::new(m.q, m.r))
    }

    pub fn increment_hint_count(&mut self) {
        self.hint_count += 1;
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_settings(&self.settings)
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn current_piece_index(&self) -> usize {
        self.current_piece_index
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.pieces.get(self.current_piece_index)
    }

    pub fn piece_by_index(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    pub fn solution(&self) -> &[SolutionMove] {
        &self.solution
    }

    pub fn placed_pieces(&self) -> &BTreeSet<usize> {
        &self.placed_pieces
    }

    pub fn is_piece_placed(&self, index: usize) -> bool {
        self.placed_pieces.contains(&index)
    }

    pub fn all_pieces_placed(&self) -> bool {
        self.placed_pieces.len() >= self.pieces.len()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn redo_stack(&self) -> &[Move] {
        &self.redo_stack
    }

    pub fn undo_count(&self) -> u32 {
        self.undo_count
    }

    pub fn hint_count(&self) -> u32 {
        self.hint_count
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Generated starting height of `coord`.
    pub fn initial_height(&self, coord: HexCoord) -> Option<u32> {
        self.grid
            .coords()
            .position(|c| c == coord)
            .map(|i| self.initial_heights[i])
    }

    /// Height still on the board.
    pub fn remaining_height(&self) -> u64 {
        self.grid.total_height()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            settings: self.settings,
            difficulty: self.difficulty(),
            cells: self.grid.hexes().copied().collect(),
            pieces: self.pieces.clone(),
            current_piece_index: self.current_piece_index,
            placed_pieces: self.placed_pieces.iter().copied().collect(),
            move_count: self.move_count(),
            undo_count: self.undo_count,
            hint_count: self.hint_count,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            won: self.is_game_won(),
        }
    }
}
