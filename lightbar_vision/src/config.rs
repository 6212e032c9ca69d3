// THEORY:
// Every tunable threshold of the detector lives here, grouped by the stage that
// consumes it. The defaults are the constants the detector was calibrated with;
// a JSON file only needs to name the fields it overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape heuristics used by the `ShapeClassifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Added to the bounding-box width so zero-width boxes do not divide by zero.
    pub aspect_epsilon: f64,
    /// Douglas-Peucker tolerance as a fraction of the outline perimeter.
    pub simplify_tolerance_ratio: f64,
    /// Small-bar branch: `small_area_min < area < small_area_max`.
    pub small_area_min: f64,
    pub small_area_max: f64,
    pub small_aspect_min: f64,
    pub small_aspect_max: f64,
    /// Large-bar branch: `area >= large_area_min`, also gated on vertex count.
    pub large_area_min: f64,
    pub large_aspect_min: f64,
    pub large_aspect_max: f64,
    pub large_vertices_min: usize,
    pub large_vertices_max: usize,
    /// Secondary filter applied before the centroid is computed.
    pub min_centroid_area: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            aspect_epsilon: 1e-6,
            simplify_tolerance_ratio: 0.02,
            small_area_min: 25.0,
            small_area_max: 500.0,
            small_aspect_min: 1.2,
            small_aspect_max: 3.5,
            large_area_min: 500.0,
            large_aspect_min: 2.0,
            large_aspect_max: 6.0,
            large_vertices_min: 3,
            large_vertices_max: 8,
            min_centroid_area: 20.0,
        }
    }
}

/// Relative photometric margins used by the `BrightnessValidator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// `(s - avg_s) / avg_s` must exceed this.
    pub min_relative_saturation: f64,
    /// `(v - avg_v) / avg_v` must exceed this.
    pub min_relative_brightness: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_relative_saturation: 0.3,
            min_relative_brightness: 0.3,
        }
    }
}

/// Pairing rule used by the `PairMatcher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// The vertical tolerance is `average_area.powf(height_exponent)`.
    pub height_exponent: f64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self { height_exponent: 0.1 }
    }
}

/// Configuration for the `LightBarPipeline`, allowing for tunable behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub classifier: ClassifierConfig,
    pub validator: ValidatorConfig,
    pub pairing: PairingConfig,
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}
