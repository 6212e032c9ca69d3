// THEORY:
// The `PairMatcher` groups validated light bars into candidate targets. A target
// carries two bars mounted side by side, so two bars belong together when their
// centroids sit at nearly the same height. The allowed vertical offset grows very
// slowly with bar size: `average_area ^ 0.1`.
//
// Key principles:
// 1.  **Comparative Analysis**: like pixel comparisons, a pairing decision is only
//     meaningful between two bars; every unordered pair `(i, j)` with `i < j` is
//     examined exactly once, so self-pairs and duplicates cannot occur.
// 2.  **Diagnostics without gating**: the area difference ratio is reported with
//     each pair (relative to the first bar's area), but only the vertical offset
//     decides acceptance.
// 3.  **Quadratic on purpose**: frames hold tens of bars, not thousands.

pub mod pair_matcher {
    use crate::config::PairingConfig;
    use crate::core_modules::light_bar::{LightBar, PairedMatch};
    use tracing::trace;

    /// Evaluates one ordered pair. `first` is the reference for the area ratio.
    pub fn compare(
        first_index: usize,
        first: &LightBar,
        second_index: usize,
        second: &LightBar,
        config: &PairingConfig,
    ) -> Option<PairedMatch> {
        if first_index == second_index {
            return None;
        }

        let area_diff_ratio = ((first.area() - second.area()) / first.area()).abs();
        let height_diff = (first.centroid().y as f64 - second.centroid().y as f64).abs();
        let average_area = (first.area() + second.area()) / 2.0;
        let height_threshold = average_area.powf(config.height_exponent);

        trace!(
            first_index,
            second_index,
            area_diff_ratio,
            height_diff,
            height_threshold,
            "compared light bars"
        );

        (height_diff < height_threshold).then_some(PairedMatch {
            first: first_index,
            second: second_index,
            area_diff_ratio,
            height_diff,
            height_threshold,
        })
    }

    /// All accepted pairs, ordered by `(first, second)`.
    pub fn match_pairs(bars: &[LightBar], config: &PairingConfig) -> Vec<PairedMatch> {
        let mut pairs = Vec::new();
        for i in 0..bars.len() {
            for j in i + 1..bars.len() {
                if let Some(pair) = compare(i, &bars[i], j, &bars[j], config) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::pair_matcher::*;
    use crate::config::PairingConfig;
    use crate::core_modules::geometry::{BoundingBox, Point};
    use crate::core_modules::light_bar::{LightBar, LightBarCandidate};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn bar(area: f64, x: i32, y: i32) -> LightBar {
        LightBar::validated(LightBarCandidate {
            outline_index: 0,
            area,
            centroid: Point::new(x, y),
            bounding_box: BoundingBox { x, y, width: 4, height: 8 },
            aspect_ratio: 2.0,
        })
    }

    #[test]
    fn two_pixel_offset_exceeds_threshold() {
        // threshold = 105^0.1 ~= 1.593
        let bars = [bar(100.0, 10, 50), bar(110.0, 60, 52)];
        assert!(match_pairs(&bars, &PairingConfig::default()).is_empty());
    }

    #[test]
    fn one_pixel_offset_is_paired() {
        let bars = [bar(100.0, 10, 50), bar(110.0, 60, 51)];
        let pairs = match_pairs(&bars, &PairingConfig::default());

        assert_eq!(pairs.len(), 1);
        let pair = pairs[0];
        assert_eq!((pair.first, pair.second), (0, 1));
        assert_eq!(pair.height_diff, 1.0);
        assert!((pair.height_threshold - 105f64.powf(0.1)).abs() < 1e-12);
        assert!((pair.area_diff_ratio - 0.1).abs() < 1e-12);
        assert_eq!(pair.centroids(&bars), Some((Point::new(10, 50), Point::new(60, 51))));
    }

    #[test]
    fn area_ratio_uses_the_first_bar_and_never_gates() {
        // Wildly different areas, same height: still paired.
        let bars = [bar(50.0, 0, 10), bar(400.0, 30, 10)];
        let pairs = match_pairs(&bars, &PairingConfig::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].area_diff_ratio, 7.0);

        let reversed = [bars[1], bars[0]];
        assert_eq!(match_pairs(&reversed, &PairingConfig::default())[0].area_diff_ratio, 0.875);
    }

    #[test]
    fn a_bar_never_pairs_with_itself() {
        let only = bar(100.0, 0, 0);
        assert_eq!(compare(0, &only, 0, &only, &PairingConfig::default()), None);
        assert!(match_pairs(&[only], &PairingConfig::default()).is_empty());
        assert!(match_pairs(&[], &PairingConfig::default()).is_empty());
    }

    #[test]
    fn every_level_pair_is_reported_once() {
        let bars = [bar(100.0, 0, 20), bar(120.0, 30, 20), bar(90.0, 60, 21), bar(100.0, 90, 80)];
        let pairs = match_pairs(&bars, &PairingConfig::default());
        let links: Vec<(usize, usize)> = pairs.iter().map(|p| (p.first, p.second)).collect();
        assert_eq!(links, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn height_diff_spans_the_full_coordinate_range() {
        let bars = [bar(100.0, 0, i32::MIN), bar(100.0, 0, i32::MAX)];
        let pair = compare(0, &bars[0], 1, &bars[1], &PairingConfig::default());
        assert_eq!(pair, None);

        let far_apart = [bar(100.0, i32::MIN, 7), bar(100.0, i32::MAX, 7)];
        let pairs = match_pairs(&far_apart, &PairingConfig::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].height_diff, 0.0);
    }

    proptest! {
        #[test]
        fn pairs_are_distinct_and_unique(
            specs in prop::collection::vec((21.0f64..5000.0, 0i32..640, 0i32..480), 0..24)
        ) {
            let bars: Vec<LightBar> = specs.iter().map(|&(a, x, y)| bar(a, x, y)).collect();
            let config = PairingConfig::default();
            let pairs = match_pairs(&bars, &config);

            let mut seen = HashSet::new();
            for pair in &pairs {
                prop_assert!(pair.first < pair.second);
                prop_assert!(pair.second < bars.len());
                prop_assert!(seen.insert((pair.first, pair.second)));
                prop_assert!(pair.height_diff < pair.height_threshold);
            }
            prop_assert_eq!(pairs, match_pairs(&bars, &config));
        }
    }
}
