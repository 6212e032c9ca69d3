use std::path::PathBuf;
use thiserror::Error;

/// Invalid input detected before a computation that would divide by zero or read
/// outside a frame. The pipeline skips the offending outline or frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("frame has no pixels")]
    EmptyFrame,

    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    FrameBufferSize { expected: usize, actual: usize },

    #[error("outline encloses no area (m00 == 0)")]
    DegenerateOutline,

    #[error(
        "photometric baseline has a zero component (saturation {average_saturation}, brightness {average_brightness})"
    )]
    ZeroBaseline {
        average_saturation: f64,
        average_brightness: f64,
    },

    #[error("pixel ({x}, {y}) lies outside the {width}x{height} frame")]
    PixelOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// Failure while loading a pipeline configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InvalidInputError>;

/// Failure of the parallel frame pipeline's worker plumbing.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("worker pool is shut down")]
    WorkerPoolClosed,

    #[error("worker dropped frame {frame_id} before replying")]
    WorkerDropped { frame_id: u64 },

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}
