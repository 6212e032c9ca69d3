// THEORY:
// This file is the main entry point for the `lightbar_vision` library crate.
// `LightBarPipeline` and its data structures (`PipelineConfig`, `Report`,
// `FrameAnalysis`) form the high-level interface; `ParallelPipeline` spreads
// independent frames over a tokio worker pool. The individual stages live in
// `core_modules` and stay usable on their own for callers that only need one of
// them.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use config::PipelineConfig;
pub use core_modules::frame::Frame;
pub use core_modules::geometry::{Outline, Point};
pub use error::{InvalidInputError, Result};
pub use pipeline::{FrameAnalysis, LightBarPipeline, Report};
