// THEORY:
// The `geometry` module is the small polygon toolkit the classifier measures
// outlines with. An `Outline` is the closed integer polygon handed over by the
// external contour extractor; everything here reads it and never mutates it.
//
// Conventions follow the raster-contour world the outlines come from:
// 1.  **Closed polygons**: the last point connects back to the first for the
//     perimeter, the area and the moments.
// 2.  **Inclusive bounding boxes**: a box spanning pixel columns 3..=7 is 5 wide,
//     matching how contour extractors report bounding rectangles of pixel chains.
// 3.  **Green's theorem moments**: `m00`, `m10`, `m01` are the polygon's true
//     area moments, normalized to a positive orientation, so the centroid is
//     independent of the point winding.

use crate::error::{InvalidInputError, Result};
use serde::{Deserialize, Serialize};

/// A 2D integer point in image coordinates (x to the right, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// Axis-aligned rectangle given by its top-left origin and its extent.
///
/// The extent is `i64`: an outline spanning the whole `i32` range is
/// `2^32` pixels wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i64,
    pub height: i64,
}

/// Raw spatial moments of a polygon up to first order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// A closed polygon outline, as produced by an external contour extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    pub points: Vec<Point>,
}

impl Outline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the closed polygon's edges, including last -> first.
    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .take(self.points.len())
    }

    /// Length of the closed polygon.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }

    /// Inclusive axis-aligned bounding box. Empty outlines yield a zero box.
    pub fn bounding_box(&self) -> BoundingBox {
        let Some(first) = self.points.first() else {
            return BoundingBox::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &self.points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        BoundingBox {
            x: min_x,
            y: min_y,
            width: i64::from(max_x) - i64::from(min_x) + 1,
            height: i64::from(max_y) - i64::from(min_y) + 1,
        }
    }

    /// Spatial moments via Green's theorem, sign-normalized so `m00 >= 0`.
    pub fn moments(&self) -> Moments {
        if self.points.len() < 3 {
            return Moments::default();
        }

        let mut moments = Moments::default();
        for (a, b) in self.edges() {
            let (xi, yi) = (a.x as f64, a.y as f64);
            let (xj, yj) = (b.x as f64, b.y as f64);
            let cross = xi * yj - xj * yi;
            moments.m00 += cross;
            moments.m10 += cross * (xi + xj);
            moments.m01 += cross * (yi + yj);
        }
        moments.m00 /= 2.0;
        moments.m10 /= 6.0;
        moments.m01 /= 6.0;

        if moments.m00 < 0.0 {
            moments.m00 = -moments.m00;
            moments.m10 = -moments.m10;
            moments.m01 = -moments.m01;
        }
        moments
    }

    /// Enclosed area by the shoelace formula, independent of winding.
    pub fn area(&self) -> f64 {
        self.moments().m00
    }

    /// Area-weighted center rounded to the nearest pixel.
    pub fn centroid(&self) -> Result<Point> {
        let moments = self.moments();
        if moments.m00 == 0.0 {
            return Err(InvalidInputError::DegenerateOutline);
        }
        let x = (moments.m10 / moments.m00 + 0.5).floor() as i32;
        let y = (moments.m01 / moments.m00 + 0.5).floor() as i32;
        Ok(Point::new(x, y))
    }

    /// Douglas-Peucker simplification of the closed polygon.
    ///
    /// The polygon is split at an approximately farthest pair of vertices and
    /// each half is simplified as an open chain. A vertex survives when it lies
    /// strictly farther than `tolerance` from the chord it would be dropped onto.
    pub fn simplify(&self, tolerance: f64) -> Vec<Point> {
        let n = self.points.len();
        if n < 3 {
            return self.points.clone();
        }

        // Seed the split: walk to the farthest vertex a few times so the pair
        // approximates the polygon's diameter.
        let mut start = 0;
        let mut end = 0;
        for _ in 0..3 {
            let farthest = farthest_from(&self.points, start);
            end = start;
            start = farthest;
        }
        let (start, end) = (end.min(start), end.max(start));

        if self.points[start].distance(&self.points[end]) <= tolerance {
            return vec![self.points[start]];
        }

        let first_half: Vec<Point> = self.points[start..=end].to_vec();
        let second_half: Vec<Point> = self.points[end..]
            .iter()
            .chain(self.points[..=start].iter())
            .copied()
            .collect();

        let mut simplified = simplify_chain(&first_half, tolerance);
        let tail = simplify_chain(&second_half, tolerance);
        // Both chains share their endpoints; keep each vertex once.
        simplified.pop();
        simplified.extend_from_slice(&tail[..tail.len() - 1]);
        simplified
    }
}

impl From<Vec<Point>> for Outline {
    fn from(points: Vec<Point>) -> Self {
        Outline::new(points)
    }
}

impl From<Vec<(i32, i32)>> for Outline {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Outline::new(points.into_iter().map(Point::from).collect())
    }
}

fn farthest_from(points: &[Point], index: usize) -> usize {
    let origin = points[index];
    let mut best = index;
    let mut best_distance = -1.0;
    for (i, point) in points.iter().enumerate() {
        let distance = origin.distance(point);
        if distance > best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

/// Distance from `point` to the line through `a` and `b` (or to `a` when they coincide).
fn distance_to_chord(point: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x as f64 - a.x as f64;
    let dy = b.y as f64 - a.y as f64;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return point.distance(a);
    }
    let cross = dx * (point.y as f64 - a.y as f64) - dy * (point.x as f64 - a.x as f64);
    cross.abs() / length
}

/// Open-chain Douglas-Peucker; always keeps both endpoints.
fn simplify_chain(chain: &[Point], tolerance: f64) -> Vec<Point> {
    if chain.len() < 3 {
        return chain.to_vec();
    }

    let mut keep = vec![false; chain.len()];
    keep[0] = true;
    keep[chain.len() - 1] = true;

    let mut stack = vec![(0, chain.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        let mut max_distance = 0.0;
        let mut max_index = first;
        for i in first + 1..last {
            let distance = distance_to_chord(&chain[i], &chain[first], &chain[last]);
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        if max_distance > tolerance {
            keep[max_index] = true;
            stack.push((first, max_index));
            stack.push((max_index, last));
        }
    }

    chain
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}
