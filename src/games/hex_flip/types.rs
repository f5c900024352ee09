//! Domain types for Hex Flip.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Axial hex coordinate. The cube component is `s = -q - r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        HexCoord::new(q, r)
    }
}

/// Renders the canonical "q,r" key.
impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// A board cell and its current height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub height: u32,
}

impl Hex {
    pub fn new(q: i32, r: i32) -> Self {
        Self {
            q,
            r,
            s: -q - r,
            height: 0,
        }
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

/// A generated piece: tile offsets plus the offset that lands on the target
/// cell when the piece is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub tiles: Vec<HexCoord>,
    pub center: HexCoord,
}

impl Piece {
    /// Board cells covered when the piece's center sits on `at`.
    pub fn footprint(&self, at: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.iter().map(move |&tile| at + tile - self.center)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Height of one cell before a placement decremented it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightChange {
    pub q: i32,
    pub r: i32,
    pub old_height: u32,
}

/// A player placement, recorded for undo/redo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub piece_index: usize,
    pub q: i32,
    pub r: i32,
    pub height_changes: Vec<HeightChange>,
}

impl Move {
    /// Total height this move removed from the board.
    pub fn height_removed(&self) -> u32 {
        self.height_changes.len() as u32
    }
}

/// Where the generator put a piece's center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionMove {
    pub piece_index: usize,
    pub q: i32,
    pub r: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub radius: u32,
    pub num_pieces: usize,
}

impl GameSettings {
    pub fn new(radius: u32, num_pieces: usize) -> Self {
        Self { radius, num_pieces }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
    Impossible,
    Custom,
}

impl Difficulty {
    /// The five named levels, in ascending order.
    pub const RANKED: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
        Difficulty::Impossible,
    ];

    /// Exact lookup on (radius, pieces); anything unlisted is `Custom`.
    pub fn from_settings(settings: &GameSettings) -> Self {
        match (settings.radius, settings.num_pieces) {
            (3, 4) => Difficulty::Easy,
            (3, 6) => Difficulty::Medium,
            (3, 8) => Difficulty::Hard,
            (4, 10) => Difficulty::Extreme,
            (4, 14) => Difficulty::Impossible,
            _ => Difficulty::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
            Difficulty::Impossible => "Impossible",
            Difficulty::Custom => "Custom",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_display_is_key() {
        assert_eq!(HexCoord::new(-1, 2).to_string(), "-1,2");
    }

    #[test]
    fn test_cube_component() {
        let c = HexCoord::new(2, -5);
        assert_eq!(c.q + c.r + c.s(), 0);
        assert_eq!(Hex::new(2, -5).s, 3);
    }

    #[test]
    fn test_footprint_translates_by_center() {
        let piece = Piece {
            tiles: vec![HexCoord::new(0, 0), HexCoord::new(1, 0), HexCoord::new(1, -1)],
            center: HexCoord::new(1, 0),
        };
        let cells: Vec<HexCoord> = piece.footprint(HexCoord::new(2, 2)).collect();
        assert_eq!(
            cells,
            vec![HexCoord::new(1, 2), HexCoord::new(2, 2), HexCoord::new(2, 1)]
        );
    }

    #[test]
    fn test_difficulty_table() {
        assert_eq!(Difficulty::from_settings(&GameSettings::new(3, 4)), Difficulty::Easy);
        assert_eq!(Difficulty::from_settings(&GameSettings::new(3, 6)), Difficulty::Medium);
        assert_eq!(Difficulty::from_settings(&GameSettings::new(3, 8)), Difficulty::Hard);
        assert_eq!(Difficulty::from_settings(&GameSettings::new(4, 10)), Difficulty::Extreme);
        assert_eq!(Difficulty::from_settings(&GameSettings::new(4, 14)), Difficulty::Impossible);
        assert_eq!(Difficulty::from_settings(&GameSettings::new(5, 12)), Difficulty::Custom);
        assert_eq!(Difficulty::from_settings(&GameSettings::new(4, 4)), Difficulty::Custom);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Impossible.to_string(), "Impossible");
        assert_eq!(Difficulty::Custom.as_str(), "Custom");
    }
}
