//! Hex coordinate math: directions, distance, and flat-top pixel conversion.
//!
//! Pixel space has its origin at the center of hex (0,0); `size` is the
//! center-to-corner distance of one hex.

use super::types::HexCoord;

/// The six axial directions, counter-clockwise from east.
pub const HEX_DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
];

const CANVAS_PADDING: f64 = 40.0;
const MIN_HEX_SIZE: f64 = 10.0;

/// Return the 6 axial-coordinate neighbors of `hex`, bounded or not.
pub fn hex_neighbors(hex: HexCoord) -> [HexCoord; 6] {
    HEX_DIRECTIONS.map(|d| hex + d)
}

pub fn hex_distance(a: HexCoord, b: HexCoord) -> i32 {
    let d = a - b;
    (d.q.abs() + d.r.abs() + d.s().abs()) / 2
}

/// Center of `hex` in pixel space.
pub fn axial_to_pixel(hex: HexCoord, size: f64) -> (f64, f64) {
    let q = hex.q as f64;
    let r = hex.r as f64;
    let x = size * (1.5 * q);
    let y = size * ((3f64.sqrt() / 2.0) * q + 3f64.sqrt() * r);
    (x, y)
}

/// The hex containing pixel `(x, y)`.
pub fn pixel_to_axial(x: f64, y: f64, size: f64) -> HexCoord {
    let q = (2.0 / 3.0 * x) / size;
    let r = (-1.0 / 3.0 * x + 3f64.sqrt() / 3.0 * y) / size;
    round_axial(q, r)
}

/// Round fractional axial coordinates to the nearest lattice point.
///
/// Each cube component is rounded on its own; the one with the largest
/// rounding error is then recomputed from the other two so `q + r + s == 0`.
pub fn round_axial(q: f64, r: f64) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}

/// Largest hex size that fits a board of `radius` into a canvas, scaled by
/// `zoom` and never below 10px.
pub fn calculate_hex_size(canvas_width: f64, canvas_height: f64, radius: u32, zoom: f64) -> f64 {
    let radius = radius.max(1) as f64;
    let width_based = (canvas_width - CANVAS_PADDING) / (radius * 3.0);
    let height_based = (canvas_height - CANVAS_PADDING) / (radius * 2.0 * 3f64.sqrt());
    (width_based.min(height_based) * zoom).max(MIN_HEX_SIZE)
}
