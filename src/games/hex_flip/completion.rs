//! Completion record and achievement unlock conditions.
//!
//! Storage and display of unlocked achievements belong to the caller; this
//! module only decides which ones a finished game earns.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use super::types::Difficulty;

/// Statistics of a won game, handed to whoever tracks achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCompletionData {
    pub difficulty: Difficulty,
    pub undo_count: u32,
    pub hint_count: u32,
    pub move_count: usize,
    pub placed_in_order: bool,
}

impl GameCompletionData {
    pub fn from_state(state: &GameState, placed_in_order: bool) -> Self {
        Self {
            difficulty: state.difficulty(),
            undo_count: state.undo_count(),
            hint_count: state.hint_count(),
            move_count: state.move_count(),
            placed_in_order,
        }
    }
}

/// Watches which piece is placed at each step to tell whether the player went
/// 0, 1, 2, ... in order. Once broken the streak stays broken until `reset`.
#[derive(Debug, Clone)]
pub struct InOrderTracker {
    progress: Vec<usize>,
    in_order: bool,
}

impl Default for InOrderTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InOrderTracker {
    pub fn new() -> Self {
        Self {
            progress: Vec::new(),
            in_order: true,
        }
    }

    pub fn reset(&mut self) {
        self.progress.clear();
        self.in_order = true;
    }

    /// Call with the current piece index right before a successful placement.
    pub fn track_piece_placed(&mut self, piece_index: usize) {
        if !self.in_order {
            return;
        }
        self.progress.push(piece_index);
        if piece_index != self.progress.len() - 1 {
            self.in_order = false;
        }
    }

    pub fn track_undo(&mut self) {
        if self.in_order {
            self.progress.pop();
        }
    }

    pub fn is_placed_in_order(&self) -> bool {
        self.in_order
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// Beat the difficulty at all.
    Completion,
    NoUndo,
    InOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AchievementId {
    pub difficulty: Difficulty,
    pub kind: AchievementKind,
}

/// Renders the stable key, e.g. `beat_hard_no_undo`.
impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.difficulty.as_str().to_lowercase();
        match self.kind {
            AchievementKind::Completion => write!(f, "beat_{level}"),
            AchievementKind::NoUndo => write!(f, "beat_{level}_no_undo"),
            AchievementKind::InOrder => write!(f, "beat_{level}_in_order"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: String,
}

fn achievement_name(id: AchievementId) -> &'static str {
    use AchievementKind::*;
    use Difficulty::*;
    match (id.kind, id.difficulty) {
        (Completion, Easy) => "First Steps",
        (Completion, Medium) => "Getting There",
        (Completion, Hard) => "Challenging",
        (Completion, Extreme) => "Extreme Solver",
        (Completion, Impossible) => "The Impossible",
        (NoUndo, Easy) => "Perfect Start",
        (NoUndo, Medium) => "Flawless Progress",
        (NoUndo, Hard) => "Perfect Precision",
        (NoUndo, Extreme) => "Extreme Perfection",
        (NoUndo, Impossible) => "Godlike",
        (InOrder, Easy) => "Orderly Beginner",
        (InOrder, Medium) => "Sequential Solver",
        (InOrder, Hard) => "Methodical Master",
        (InOrder, Extreme) => "Extreme Order",
        (InOrder, Impossible) => "Perfect Sequence",
        (_, Custom) => "Custom",
    }
}

/// All 15 achievements: completion, then no-undo, then in-order, each from
/// Easy to Impossible.
pub static ACHIEVEMENT_CATALOG: Lazy<Vec<Achievement>> = Lazy::new(|| {
    let kinds = [
        AchievementKind::Completion,
        AchievementKind::NoUndo,
        AchievementKind::InOrder,
    ];
    let mut catalog = Vec::with_capacity(kinds.len() * Difficulty::RANKED.len());
    for kind in kinds {
        for difficulty in Difficulty::RANKED {
            let id = AchievementId { difficulty, kind };
            let description = match kind {
                AchievementKind::Completion => format!("Beat {difficulty} difficulty"),
                AchievementKind::NoUndo => {
                    format!("Beat {difficulty} difficulty without using undo")
                }
                AchievementKind::InOrder => {
                    format!("Beat {difficulty} difficulty placing pieces in order")
                }
            };
            catalog.push(Achievement {
                id,
                name: achievement_name(id),
                description,
            });
        }
    }
    catalog
});

pub fn find_achievement(id: AchievementId) -> Option<&'static Achievement> {
    ACHIEVEMENT_CATALOG.iter().find(|a| a.id == id)
}

/// Achievements a completed game qualifies for. Custom games earn none.
pub fn unlocked_by(data: &GameCompletionData) -> Vec<AchievementId> {
    if data.difficulty == Difficulty::Custom {
        return vec![];
    }

    let mut earned = vec![AchievementId {
        difficulty: data.difficulty,
        kind: AchievementKind::Completion,
    }];
    if data.undo_count == 0 {
        earned.push(AchievementId {
            difficulty: data.difficulty,
            kind: AchievementKind::NoUndo,
        });
    }
    if data.placed_in_order {
        earned.push(AchievementId {
            difficulty: data.difficulty,
            kind: AchievementKind::InOrder,
        });
    }
    earned
}
