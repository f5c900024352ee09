//! Hex Flip: a single-player puzzle on a hexagonal board.
//!
//! A level is built by stacking random star-shaped pieces onto an empty board;
//! the player wins by placing the same pieces again until every cell is back
//! at height 0.

pub mod completion;
pub mod grid;
pub mod hex_math;
pub mod pieces;
pub mod state;
pub mod types;
