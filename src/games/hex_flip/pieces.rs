//! Random piece generation.
//!
//! Pieces grow in a star around a fixed origin: every extra tile is drawn
//! from the free neighbors of (0,0), never from tiles added later. A piece
//! therefore holds 3..=7 tiles, all within distance 1 of its center.

use rand::seq::SliceRandom;
use rand::Rng;

use super::hex_math::hex_neighbors;
use super::types::{HexCoord, Piece};

pub const MIN_EXTRA_TILES: usize = 2;
pub const MAX_EXTRA_TILES: usize = 6;

/// Grow one piece from the origin tile.
pub fn generate_piece<R: Rng + ?Sized>(rng: &mut R) -> Piece {
    let mut tiles = vec![HexCoord::ORIGIN];
    let extra = rng.gen_range(MIN_EXTRA_TILES..=MAX_EXTRA_TILES);

    for _ in 0..extra {
        let available: Vec<HexCoord> = hex_neighbors(HexCoord::ORIGIN)
            .into_iter()
            .filter(|n| !tiles.contains(n))
            .collect();

        // Saturated: all six neighbors taken, the step is skipped.
        if let Some(&next) = available.choose(rng) {
            tiles.push(next);
        }
    }

    Piece {
        tiles,
        center: HexCoord::ORIGIN,
    }
}

/// `count` independent pieces.
pub fn generate_set<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Piece> {
    (0..count).map(|_| generate_piece(rng)).collect()
}
