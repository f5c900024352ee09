//! Hexagonal board of a fixed radius with a mutable height per cell.

use std::collections::HashMap;

use serde::Serialize;

use super::hex_math::hex_neighbors;
use super::types::{Hex, HexCoord};

#[derive(Debug, Clone, Serialize)]
pub struct HexGrid {
    radius: u32,
    cells: Vec<Hex>,
    #[serde(skip)]
    index: HashMap<HexCoord, usize>,
}

impl HexGrid {
    /// Every `(q, r)` with `|q|, |r|, |s| <= radius`, all at height 0.
    pub fn new(radius: u32) -> Self {
        let radius_i = radius as i32;
        let mut cells = Vec::with_capacity(Self::cell_count_for(radius));
        let mut index = HashMap::with_capacity(Self::cell_count_for(radius));

        for q in -radius_i..=radius_i {
            for r in -radius_i..=radius_i {
                let s = -q - r;
                if s.abs() <= radius_i {
                    index.insert(HexCoord::new(q, r), cells.len());
                    cells.push(Hex::new(q, r));
                }
            }
        }

        Self {
            radius,
            cells,
            index,
        }
    }

    /// Number of cells on a board of `radius`: `3r² + 3r + 1`.
    pub fn cell_count_for(radius: u32) -> usize {
        let r = radius as usize;
        3 * r * r + 3 * r + 1
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index.contains_key(&coord)
    }

    pub fn get_hex(&self, coord: HexCoord) -> Option<&Hex> {
        self.index.get(&coord).map(|&i| &self.cells[i])
    }

    pub(crate) fn get_hex_mut(&mut self, coord: HexCoord) -> Option<&mut Hex> {
        match self.index.get(&coord) {
            Some(&i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Height at `coord`, or `None` off the board.
    pub fn height(&self, coord: HexCoord) -> Option<u32> {
        self.get_hex(coord).map(|h| h.height)
    }

    /// On-board neighbors of `coord`.
    pub fn get_neighbors(&self, coord: HexCoord) -> Vec<HexCoord> {
        hex_neighbors(coord)
            .into_iter()
            .filter(|n| self.contains(*n))
            .collect()
    }

    /// Cells in construction order (q-major, then r).
    pub fn hexes(&self) -> impl Iterator<Item = &Hex> {
        self.cells.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.cells.iter().map(Hex::coord)
    }

    /// Heights in construction order.
    pub fn heights(&self) -> Vec<u32> {
        self.cells.iter().map(|h| h.height).collect()
    }

    /// Overwrite all heights from a vector produced by [`HexGrid::heights`].
    pub(crate) fn set_heights(&mut self, heights: &[u32]) {
        for (cell, &h) in self.cells.iter_mut().zip(heights) {
            cell.height = h;
        }
    }

    pub(crate) fn clear_heights(&mut self) {
        for cell in &mut self.cells {
            cell.height = 0;
        }
    }

    pub fn total_height(&self) -> u64 {
        self.cells.iter().map(|h| h.height as u64).sum()
    }

    pub fn max_height(&self) -> u32 {
        self.cells.iter().map(|h| h.height).max().unwrap_or(0)
    }

    pub fn all_zero(&self) -> bool {
        self.cells.iter().all(|h| h.height == 0)
    }
}
