// THEORY:
// The `BrightnessValidator` is the photometric gate between shape candidates and
// real light bars. A lit marker is both brighter and more saturated than the scene
// around it, so a candidate is accepted only when its centroid pixel beats the
// frame's average saturation and brightness by a relative margin (30% each by
// default).
//
// The frame baseline comes in as an explicit argument; a zero baseline component
// would make the relative margin undefined and is reported as invalid input
// instead of dividing by zero.

use crate::config::ValidatorConfig;
use crate::core_modules::frame::FrameAccess;
use crate::core_modules::light_bar::{LightBar, LightBarCandidate};
use crate::core_modules::photometric::photometric::PhotometricBaseline;
use crate::error::{InvalidInputError, Result};
use tracing::debug;

/// Relative margin test on an already-sampled saturation / brightness pair.
pub fn is_brighter_and_more_saturated(
    saturation: f64,
    brightness: f64,
    baseline: &PhotometricBaseline,
    config: &ValidatorConfig,
) -> Result<bool> {
    if baseline.average_saturation == 0.0 || baseline.average_brightness == 0.0 {
        return Err(InvalidInputError::ZeroBaseline {
            average_saturation: baseline.average_saturation,
            average_brightness: baseline.average_brightness,
        });
    }

    let relative_saturation =
        (saturation - baseline.average_saturation) / baseline.average_saturation;
    let relative_brightness =
        (brightness - baseline.average_brightness) / baseline.average_brightness;

    Ok(relative_saturation > config.min_relative_saturation
        && relative_brightness > config.min_relative_brightness)
}

/// Samples the candidate's centroid pixel and applies the relative margin test.
pub fn validate<F: FrameAccess + ?Sized>(
    frame: &F,
    candidate: &LightBarCandidate,
    baseline: &PhotometricBaseline,
    config: &ValidatorConfig,
) -> Result<bool> {
    let pixel = frame.sample(candidate.centroid)?;
    is_brighter_and_more_saturated(
        pixel.saturation() as f64,
        pixel.value() as f64,
        baseline,
        config,
    )
}

/// Promotes every candidate that passes validation, in input order. Candidates
/// that cannot be validated (centroid off-frame, zero baseline) are skipped.
pub fn validate_all<F: FrameAccess + ?Sized>(
    frame: &F,
    candidates: &[LightBarCandidate],
    baseline: &PhotometricBaseline,
    config: &ValidatorConfig,
) -> Vec<LightBar> {
    candidates
        .iter()
        .filter_map(|candidate| match validate(frame, candidate, baseline, config) {
            Ok(true) => Some(LightBar::validated(*candidate)),
            Ok(false) => None,
            Err(err) => {
                debug!(outline_index = candidate.outline_index, %err, "skipping candidate");
                None
            }
        })
        .collect()
}
