//! Hex Flip puzzle engine: level generation, move state, and the tooling
//! that drives it.

pub mod engine;
pub mod games;
