// THEORY:
// The `pipeline` module is the top-level API of the detector. It runs the full
// per-frame stack behind one call:
//
//   outlines ──► ShapeClassifier ──► BrightnessValidator ──► PairMatcher ──► report
//   frame ────► PhotometricSummarizer ──┘
//
// The pipeline holds only its configuration. Every frame is analyzed from scratch,
// so the same pipeline can be shared across threads and frames can be processed
// in any order.

use crate::config::PipelineConfig;
use crate::core_modules::brightness_validator;
use crate::core_modules::extractor::GeometryExtractor;
use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::Outline;
use crate::core_modules::pair_matcher::pair_matcher;
use crate::core_modules::photometric::photometric;
use crate::core_modules::shape_classifier::shape_classifier::{self, ClassificationOutcome};
use crate::error::Result;
use serde::Serialize;
use tracing::{debug, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::light_bar::{LightBar, LightBarCandidate, PairedMatch};
pub use crate::core_modules::photometric::photometric::PhotometricBaseline;

/// Why outlines and candidates were dropped on the way to `light_bars`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    /// Failed the area / aspect-ratio / vertex-count heuristics.
    pub shape: usize,
    /// Passed the heuristics but fell under the centroid area floor.
    pub area: usize,
    /// Had no centroid (`m00 == 0`).
    pub degenerate: usize,
    /// Candidates whose centroid pixel failed the brightness check.
    pub photometric: usize,
}

impl RejectionCounts {
    fn tally(outcomes: &[ClassificationOutcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome {
                ClassificationOutcome::Accepted(_) => {}
                ClassificationOutcome::RejectedShape(_) => counts.shape += 1,
                ClassificationOutcome::RejectedArea(_) => counts.area += 1,
                ClassificationOutcome::RejectedDegenerate(_) => counts.degenerate += 1,
            }
        }
        counts
    }
}

/// Everything the detector found in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAnalysis {
    pub baseline: PhotometricBaseline,
    /// Number of outlines handed to the classifier.
    pub outlines_examined: usize,
    /// Outlines that passed the shape heuristics.
    pub candidates: Vec<LightBarCandidate>,
    /// Candidates that also passed the photometric check.
    pub light_bars: Vec<LightBar>,
    /// Pairs of `light_bars` entries, by index.
    pub pairs: Vec<PairedMatch>,
    pub rejected: RejectionCounts,
}

/// The primary output of the pipeline for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    NoLightBars,
    LightBars(FrameAnalysis),
}

/// The main, top-level struct for the light-bar detector.
#[derive(Debug, Clone, Default)]
pub struct LightBarPipeline {
    config: PipelineConfig,
}

impl LightBarPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage on one frame. Fails only when the frame itself is unusable.
    pub fn analyze(&self, frame: &Frame, outlines: &[Outline]) -> Result<FrameAnalysis> {
        // Stage 1: Photometric baseline
        let baseline = photometric::summarize(frame)?;

        // Stage 2: Shape classification
        let outcomes = shape_classifier::classify_with_outcomes(outlines, &self.config.classifier);
        let candidates: Vec<LightBarCandidate> = outcomes
            .iter()
            .filter_map(|outcome| outcome.candidate().copied())
            .collect();
        let mut rejected = RejectionCounts::tally(&outcomes);

        // Stage 3: Photometric validation
        let light_bars = brightness_validator::validate_all(
            frame,
            &candidates,
            &baseline,
            &self.config.validator,
        );

        rejected.photometric = candidates.len() - light_bars.len();

        // Stage 4: Pairing
        let pairs = pair_matcher::match_pairs(&light_bars, &self.config.pairing);

        debug!(
            outlines = outlines.len(),
            candidates = candidates.len(),
            light_bars = light_bars.len(),
            pairs = pairs.len(),
            "frame analyzed"
        );

        Ok(FrameAnalysis {
            baseline,
            outlines_examined: outlines.len(),
            candidates,
            light_bars,
            pairs,
            rejected,
        })
    }

    /// Like `analyze`, but an unusable frame is logged and reported as empty.
    pub fn generate_report(&self, frame: &Frame, outlines: &[Outline]) -> Report {
        match self.analyze(frame, outlines) {
            Ok(analysis) if analysis.light_bars.is_empty() => Report::NoLightBars,
            Ok(analysis) => Report::LightBars(analysis),
            Err(err) => {
                warn!(%err, "skipping frame");
                Report::NoLightBars
            }
        }
    }

    /// Extracts outlines with `extractor`, then reports on them.
    pub fn generate_report_with<E: GeometryExtractor>(
        &self,
        frame: &Frame,
        extractor: &mut E,
    ) -> std::result::Result<Report, E::Error> {
        let outlines = extractor.extract(frame)?;
        Ok(self.generate_report(frame, &outlines))
    }

    pub fn pairs_detected(&self, frame: &Frame, outlines: &[Outline]) -> bool {
        matches!(
            self.generate_report(frame, outlines),
            Report::LightBars(FrameAnalysis { ref pairs, .. }) if !pairs.is_empty()
        )
    }
}
