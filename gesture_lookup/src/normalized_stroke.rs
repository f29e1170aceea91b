use tracing::debug;

use super::error::{Error, Result};
use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

/// A stroke after resampling and fitting into the unit square.
pub struct NormalizedStroke {
    /// Evenly spaced points along the raw path, in input coordinates
    pub resampled: Vec<Point>,
    /// The resampled points scaled into [0,1]x[0,1], aspect ratio preserved
    pub points: Vec<Point>,
}

impl NormalizedStroke {
    pub fn from_stroke(stroke: &Stroke, resample_count: usize) -> Result<NormalizedStroke> {
        let resampled = resample(stroke, resample_count)?;
        let points = normalize(&resampled);
        Ok(NormalizedStroke {
            resampled: resampled,
            points: points,
        })
    }
}

// Gets distance between two points
fn dist(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Sum of the distances between consecutive points
pub fn path_length(points: &[Point]) -> f32 {
    let mut length = 0f32;
    for i in 1..points.len() {
        length += dist(points[i - 1], points[i]);
    }
    length
}

// Rejects strokes the resampler would divide by zero on, or poison with NaN
fn check_stroke(stroke: &Stroke) -> Result<f32> {
    if stroke.points.len() < 2 {
        return Err(Error::InvalidStroke(format!(
            "a stroke needs at least 2 points, got {}",
            stroke.points.len()
        )));
    }
    if let Some(ix) = stroke.points.iter().position(|pt| !pt.x.is_finite() || !pt.y.is_finite()) {
        return Err(Error::InvalidStroke(format!("point {} has a non-finite coordinate", ix)));
    }
    let length = path_length(&stroke.points);
    if !(length > 0f32) || !length.is_finite() {
        return Err(Error::InvalidStroke("stroke has zero path length".to_string()));
    }
    Ok(length)
}

/// Resamples the stroke into `target_count` points spaced evenly along its path.
/// The first point is kept as is; the stroke itself is never modified.
pub fn resample(stroke: &Stroke, target_count: usize) -> Result<Vec<Point>> {
    if target_count < 2 {
        return Err(Error::InvalidConfiguration(format!(
            "resample count must be at least 2, got {}",
            target_count
        )));
    }
    let total_length = check_stroke(stroke)?;
    let points = &stroke.points;
    let interval = total_length / ((target_count - 1) as f32);

    let mut res: Vec<Point> = Vec::with_capacity(target_count);
    res.push(points[0]);

    // Start of the segment being walked; becomes the last emitted point after each emission
    let mut prev = points[0];
    let mut walked = 0f32;
    let mut i = 1;
    while i < points.len() && res.len() < target_count {
        let next = points[i];
        let segment_length = dist(prev, next);
        walked += segment_length;
        if walked >= interval && segment_length > 0f32 {
            // Step back from `next` by however far we overshot the interval
            let ratio = (walked - interval) / segment_length;
            let pt = Point {
                x: next.x - ratio * (next.x - prev.x),
                y: next.y - ratio * (next.y - prev.y),
            };
            res.push(pt);
            // Keep walking the same segment, from the new point
            prev = pt;
            walked = 0f32;
        } else {
            prev = next;
            i += 1;
        }
    }

    // Rounding can leave us short of the final point
    if res.len() < target_count {
        debug!(missing = target_count - res.len(), "padding resampled stroke with its last point");
    }
    let last = points[points.len() - 1];
    while res.len() < target_count {
        res.push(last);
    }
    Ok(res)
}

fn get_bounding_rect(points: &[Point]) -> Rect {
    let mut res = Rect {
        min_x: std::f32::MAX,
        max_x: std::f32::MIN,
        min_y: std::f32::MAX,
        max_y: std::f32::MIN,
    };
    for pt in points {
        if pt.x < res.min_x { res.min_x = pt.x; }
        if pt.x > res.max_x { res.max_x = pt.x; }
        if pt.y < res.min_y { res.min_y = pt.y; }
        if pt.y > res.max_y { res.max_y = pt.y; }
    }
    // A flat axis is stretched to reach the origin
    if res.max_x == res.min_x {
        if res.max_x < 0f32 { res.max_x = 0f32; }
        else { res.min_x = 0f32; }
    }
    if res.max_y == res.min_y {
        if res.max_y < 0f32 { res.max_y = 0f32; }
        else { res.min_y = 0f32; }
    }
    res
}

// Maps an offset from the box minimum onto the axis' share of the unit square.
// Dividing last keeps the far edge of the long axis at exactly 1.
// An axis with no extent left (it sits on the origin) collapses to 0.
fn scale_axis(offset: f32, ratio: f32, extent: f32) -> f32 {
    if extent > 0f32 { offset * ratio / extent } else { 0f32 }
}

/// Fits points into [0,1]x[0,1]. The longer side of the bounding box spans
/// the full unit, the shorter side keeps its proportion to it.
pub fn normalize(points: &[Point]) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let rect = get_bounding_rect(points);
    let width = rect.max_x - rect.min_x;
    let height = rect.max_y - rect.min_y;

    // Landscape box: x gets the full unit
    let (ratio_x, ratio_y) = if height < width {
        (1f32, height / width)
    }
    // Portrait or square
    else if height > 0f32 {
        (width / height, 1f32)
    }
    // Single point sitting on the origin
    else {
        (0f32, 0f32)
    };

    points
        .iter()
        .map(|pt| Point {
            x: scale_axis(pt.x - rect.min_x, ratio_x, width),
            y: scale_axis(pt.y - rect.min_y, ratio_y, height),
        })
        .collect()
}
