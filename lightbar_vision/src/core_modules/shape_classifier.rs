// THEORY:
// The `ShapeClassifier` is the first decision stage of the detector. It looks at
// each raw outline in isolation and decides, from shape alone, whether it could be
// a light bar.
//
// Algorithm steps, per outline:
// 1.  **Measurement**: perimeter, inclusive bounding box, aspect ratio
//     (`height / (width + epsilon)`), Douglas-Peucker vertex count at a tolerance
//     of 2% of the perimeter, and shoelace area. Bundled as `ShapeMetrics`.
// 2.  **Two-branch heuristic**: small bars (area strictly between 25 and 500)
//     only need a moderately tall aspect ratio; large bars (area 500 and up) need
//     a taller aspect ratio *and* a simple polygon of 3 to 8 vertices. The vertex
//     condition belongs to the large branch only.
// 3.  **Centroid**: accepted outlines must still enclose more than 20 square
//     pixels and a non-zero `m00` before their moment centroid is taken.
// 4.  **Stateless Utility**: no memory between calls; output order follows input
//     order and each outline yields at most one candidate.

use crate::config::ClassifierConfig;
use crate::core_modules::geometry::{BoundingBox, Outline};
use crate::core_modules::light_bar::LightBarCandidate;

pub mod shape_classifier {
    use super::*;
    use tracing::debug;

    /// Everything the heuristics look at for one outline.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ShapeMetrics {
        pub perimeter: f64,
        pub bounding_box: BoundingBox,
        pub aspect_ratio: f64,
        pub simplified_vertices: usize,
        pub area: f64,
    }

    impl ShapeMetrics {
        pub fn measure(outline: &Outline, config: &ClassifierConfig) -> Self {
            let perimeter = outline.perimeter();
            let bounding_box = outline.bounding_box();
            let aspect_ratio =
                bounding_box.height as f64 / (bounding_box.width as f64 + config.aspect_epsilon);
            let simplified_vertices = outline
                .simplify(config.simplify_tolerance_ratio * perimeter)
                .len();
            let area = outline.area();

            Self {
                perimeter,
                bounding_box,
                aspect_ratio,
                simplified_vertices,
                area,
            }
        }

        /// Small bars need only the aspect window; large bars also need a simple polygon.
        pub fn passes_heuristics(&self, config: &ClassifierConfig) -> bool {
            let small_bar = self.area > config.small_area_min
                && self.area < config.small_area_max
                && self.aspect_ratio >= config.small_aspect_min
                && self.aspect_ratio <= config.small_aspect_max;

            let large_bar = self.area >= config.large_area_min
                && self.aspect_ratio >= config.large_aspect_min
                && self.aspect_ratio <= config.large_aspect_max
                && self.simplified_vertices >= config.large_vertices_min
                && self.simplified_vertices <= config.large_vertices_max;

            small_bar || large_bar
        }
    }

    /// What happened to a single outline.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ClassificationOutcome {
        Accepted(LightBarCandidate),
        /// Failed the area / aspect-ratio / vertex-count heuristics.
        RejectedShape(ShapeMetrics),
        /// Passed the heuristics but encloses too little area for a centroid.
        RejectedArea(ShapeMetrics),
        /// `m00 == 0`: no centroid exists. Unreachable while the area floors
        /// are non-negative, since passing them already implies `m00 > 0`.
        RejectedDegenerate(ShapeMetrics),
    }

    impl ClassificationOutcome {
        pub fn candidate(&self) -> Option<&LightBarCandidate> {
            match self {
                ClassificationOutcome::Accepted(candidate) => Some(candidate),
                _ => None,
            }
        }
    }

    /// Classifies a single outline.
    pub fn classify_outline(
        outline_index: usize,
        outline: &Outline,
        config: &ClassifierConfig,
    ) -> ClassificationOutcome {
        let metrics = ShapeMetrics::measure(outline, config);
        if !metrics.passes_heuristics(config) {
            return ClassificationOutcome::RejectedShape(metrics);
        }

        if metrics.area <= config.min_centroid_area {
            debug!(outline_index, area = metrics.area, "outline too small for a centroid");
            return ClassificationOutcome::RejectedArea(metrics);
        }

        match outline.centroid() {
            Ok(centroid) => ClassificationOutcome::Accepted(LightBarCandidate {
                outline_index,
                area: metrics.area,
                centroid,
                bounding_box: metrics.bounding_box,
                aspect_ratio: metrics.aspect_ratio,
            }),
            Err(err) => {
                debug!(outline_index, %err, "skipping outline");
                ClassificationOutcome::RejectedDegenerate(metrics)
            }
        }
    }

    /// Per-outline outcomes, in input order.
    pub fn classify_with_outcomes(
        outlines: &[Outline],
        config: &ClassifierConfig,
    ) -> Vec<ClassificationOutcome> {
        outlines
            .iter()
            .enumerate()
            .map(|(index, outline)| classify_outline(index, outline, config))
            .collect()
    }

    /// Filters raw outlines down to light-bar candidates, preserving input order.
    pub fn classify(outlines: &[Outline], config: &ClassifierConfig) -> Vec<LightBarCandidate> {
        outlines
            .iter()
            .enumerate()
            .filter_map(|(index, outline)| {
                classify_outline(index, outline, config).candidate().copied()
            })
            .collect()
    }
}
