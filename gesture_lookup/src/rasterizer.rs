use tracing::debug;

use super::config::MAX_GRID_SIZE;
use super::entities::Fingerprint;
use super::error::{Error, Result};
use super::Point;

/// Inks a block of cells for every normalized point.
///
/// Each point covers a square of `stroke_thickness / 2` cells per side, with its
/// lower-left corner at the point's grid position. The grid is inset by the same
/// amount so that points at 1.0 still land inside it. A thickness of 1 still
/// inks a single cell per point.
pub fn rasterize(points: &[Point], grid_size: usize, stroke_thickness: usize) -> Result<Fingerprint> {
    if grid_size == 0 || grid_size > MAX_GRID_SIZE {
        return Err(Error::InvalidConfiguration(format!(
            "grid size must lie in 1..={}, got {}",
            MAX_GRID_SIZE, grid_size
        )));
    }
    if stroke_thickness == 0 || stroke_thickness > grid_size {
        return Err(Error::InvalidConfiguration(format!(
            "stroke thickness must lie in 1..={}, got {}",
            grid_size, stroke_thickness
        )));
    }
    let block = std::cmp::max(stroke_thickness / 2, 1);
    let scale = (grid_size - block) as f32;

    let mut res = Fingerprint::new(grid_size);
    for pt in points {
        // Also rejects NaN, which fails every comparison
        if !(pt.x >= 0f32 && pt.x <= 1f32 && pt.y >= 0f32 && pt.y <= 1f32) {
            return Err(Error::InvalidStroke(format!(
                "normalized point ({}, {}) lies outside the unit square",
                pt.x, pt.y
            )));
        }
        let gx = (pt.x * scale).round() as usize;
        let gy = (pt.y * scale).round() as usize;
        for dy in 0..block {
            for dx in 0..block {
                res.set(gx + dx, gy + dy);
            }
        }
    }
    debug!(points = points.len(), inked = res.inked_count(), "rasterized stroke");
    Ok(res)
}
