use super::error::{Error, Result};
use super::*;

/// Default distance the pointer must travel before another point is recorded
pub const DEFAULT_MIN_DISTANCE: f32 = 0.5;

/// Collects pointer positions during a drag, skipping jitter below a minimum distance.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    min_distance: f32,
    points: Vec<Point>,
}

impl Default for StrokeBuilder {
    fn default() -> Self {
        StrokeBuilder::new(DEFAULT_MIN_DISTANCE)
    }
}

impl StrokeBuilder {
    pub fn new(min_distance: f32) -> StrokeBuilder {
        StrokeBuilder {
            min_distance: min_distance,
            points: Vec::new(),
        }
    }

    /// Records the position if it is far enough from the last recorded one.
    /// Returns whether the point was kept.
    pub fn push(&mut self, pt: Point) -> bool {
        if let Some(last) = self.points.last() {
            let dx = pt.x - last.x;
            let dy = pt.y - last.y;
            if (dx * dx + dy * dy).sqrt() < self.min_distance {
                return false;
            }
        }
        self.points.push(pt);
        true
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Hands over the recorded stroke and leaves the builder empty.
    pub fn finish(&mut self) -> Result<Stroke> {
        if self.points.len() < 2 {
            let count = self.points.len();
            self.points.clear();
            return Err(Error::InvalidStroke(format!("a stroke needs at least 2 points, got {}", count)));
        }
        Ok(Stroke {
            points: std::mem::replace(&mut self.points, Vec::new()),
        })
    }
}
