// THEORY:
// The `light_bar` module holds the data containers that flow between the
// classification stages. Like the outlines they are derived from, they are "dumb"
// per-frame values: no memory of earlier frames, no behavior beyond accessors.
//
// A `LightBarCandidate` is what the shape classifier believes could be a light
// bar. A `LightBar` is a candidate that also survived the photometric check, and
// only `LightBar`s can be paired. Keeping them as distinct types makes "never
// pair an unvalidated bar" a property the compiler checks.

use crate::core_modules::geometry::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// A shape that passed the area, aspect-ratio and vertex-count heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightBarCandidate {
    /// Index of the outline this candidate was built from, within its frame.
    pub outline_index: usize,
    /// Enclosed polygon area in square pixels.
    pub area: f64,
    /// Moment centroid rounded to the nearest pixel.
    pub centroid: Point,
    pub bounding_box: BoundingBox,
    /// `height / width` of the bounding box.
    pub aspect_ratio: f64,
}

/// A candidate whose centroid pixel is markedly brighter and more saturated
/// than the frame average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightBar(LightBarCandidate);

impl LightBar {
    /// Only the brightness validator promotes candidates.
    pub(crate) fn validated(candidate: LightBarCandidate) -> Self {
        Self(candidate)
    }

    pub fn candidate(&self) -> &LightBarCandidate {
        &self.0
    }

    pub fn area(&self) -> f64 {
        self.0.area
    }

    pub fn centroid(&self) -> Point {
        self.0.centroid
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.0.bounding_box
    }
}

/// Two distinct light bars judged to belong to one target.
///
/// `first < second` always holds; both index into the light-bar list the pair
/// was matched from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairedMatch {
    pub first: usize,
    pub second: usize,
    /// `|area(first) - area(second)| / area(first)`. Reported, never gating.
    pub area_diff_ratio: f64,
    /// Absolute vertical offset between the two centroids.
    pub height_diff: f64,
    /// The offset the pair had to stay under.
    pub height_threshold: f64,
}

impl PairedMatch {
    /// Resolves both ends of the pair against the list it was matched from.
    pub fn resolve<'a>(&self, bars: &'a [LightBar]) -> Option<(&'a LightBar, &'a LightBar)> {
        Some((bars.get(self.first)?, bars.get(self.second)?))
    }

    /// The two centroids, for drawing the link between them.
    pub fn centroids(&self, bars: &[LightBar]) -> Option<(Point, Point)> {
        self.resolve(bars).map(|(a, b)| (a.centroid(), b.centroid()))
    }
}
