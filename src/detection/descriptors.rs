//! Shape descriptors computed from an outline and its ink grid.
//!
//! All thresholds are hand-tuned for children's doodles on a canvas of
//! roughly 400x300 pixels.

use std::f64::consts::{FRAC_PI_3, PI, TAU};
use crate::models::{InkGrid, Point, ShapeDescriptor};

/// Below this many outline points there is nothing to measure
pub const MIN_OUTLINE_POINTS: usize = 5;

/// Combined turn across the sliding window that counts as a corner (60°)
pub const CORNER_ANGLE: f64 = FRAC_PI_3;

/// Window positions that must pass before another corner can be counted
pub const CORNER_COOLDOWN: usize = 5;

/// Outlines longer than this get an estimated corner count when none were found
pub const CORNER_FALLBACK_MIN_POINTS: usize = 20;

/// Outline points per estimated corner in the fallback
pub const CORNER_FALLBACK_SPACING: f64 = 50.0;

/// Endpoints closer than this (in pixels) always count as closed
pub const CLOSURE_MIN_DISTANCE: f64 = 15.0;

/// Endpoint distance relative to shape size that counts as closed
pub const CLOSURE_SIZE_FRACTION: f64 = 0.1;

pub const LOOP_CHECK_MIN_POINTS: usize = 10;

/// Position along the outline that is compared against the start point
pub const LOOP_CHECK_POSITION: f64 = 0.75;

/// Distance relative to shape size under which the outline loops back
pub const LOOP_CHECK_FRACTION: f64 = 0.3;

/// Compute all descriptors; short outlines yield the zeroed descriptor
pub fn describe(outline: &[Point], grid: &InkGrid) -> ShapeDescriptor {
    if outline.len() < MIN_OUTLINE_POINTS {
        return ShapeDescriptor::default();
    }

    ShapeDescriptor {
        roundness: roundness(outline),
        symmetry: symmetry(grid),
        corners: count_corners(outline),
        closed: is_closed(outline),
    }
}

pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sum_x / n, sum_y / n)
}

/// `1 - variance / mean²` of the centroid distances, floored at 0
pub fn roundness(points: &[Point]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }

    let center = centroid(points);
    let distances: Vec<f64> = points.iter().map(|p| p.distance(&center)).collect();
    let n = distances.len() as f64;

    let avg = distances.iter().sum::<f64>() / n;
    if avg == 0.0 {
        return 0.0;
    }

    let variance = distances.iter().map(|d| (d - avg).powi(2)).sum::<f64>() / n;
    (1.0 - variance / (avg * avg)).max(0.0)
}

/// Half a point per matching mirrored cell pair, across both midlines,
/// normalised by the grid area. Odd widths compare the middle cell with itself.
pub fn symmetry(grid: &InkGrid) -> f64 {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return 0.0;
    }

    let mut score = 0.0;

    for y in 0..height {
        for x in 0..width.div_ceil(2) {
            if grid.is_ink(x, y) == grid.is_ink(width - 1 - x, y) {
                score += 0.5;
            }
        }
    }

    for x in 0..width {
        for y in 0..height.div_ceil(2) {
            if grid.is_ink(x, y) == grid.is_ink(x, height - 1 - y) {
                score += 0.5;
            }
        }
    }

    score / (width as f64 * height as f64)
}

/// Count direction changes along the outline with a four-point sliding window.
///
/// The walk follows the outline's order as given. When nothing is found on a
/// long outline the count is estimated from its length, which is only a rough
/// approximation.
pub fn count_corners(points: &[Point]) -> u32 {
    let n = points.len();
    let mut corners = 0u32;
    let mut last_corner = 0usize;

    for i in 3..n.saturating_sub(1) {
        let (p0, p1, p2, p3) = (points[i - 3], points[i - 2], points[i - 1], points[i]);

        let heading1 = heading(&p0, &p1);
        let heading2 = heading(&p1, &p2);
        let heading3 = heading(&p2, &p3);

        let turn = normalize_angle(heading2 - heading1).abs()
            + normalize_angle(heading3 - heading2).abs();

        if turn > CORNER_ANGLE && i - last_corner > CORNER_COOLDOWN {
            corners += 1;
            last_corner = i;
        }
    }

    if corners == 0 && n > CORNER_FALLBACK_MIN_POINTS {
        corners = ((n as f64 / CORNER_FALLBACK_SPACING).round() as u32).max(1);
    }

    corners
}

/// Endpoints close together, or the three-quarter point back near the start
pub fn is_closed(points: &[Point]) -> bool {
    let (Some(start), Some(end)) = (points.first(), points.last()) else {
        return false;
    };

    let size = shape_size(points);
    if start.distance(end) < CLOSURE_MIN_DISTANCE.max(size * CLOSURE_SIZE_FRACTION) {
        return true;
    }

    if points.len() > LOOP_CHECK_MIN_POINTS {
        let index = (points.len() as f64 * LOOP_CHECK_POSITION).floor() as usize;
        return points[index].distance(start) < size * LOOP_CHECK_FRACTION;
    }

    false
}

/// Larger of the horizontal and vertical extents
pub fn shape_size(points: &[Point]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    (max_x - min_x).max(max_y - min_y)
}

fn heading(from: &Point, to: &Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}
