// THEORY:
// The `photometric` module summarizes a whole frame into the baseline the
// brightness validator normalizes against. It is the frame-wide counterpart of
// the single-pixel heuristics in `pixel`.
//
// Key architectural principles:
// 1.  **Explicit value object**: the baseline is returned as a plain
//     `PhotometricBaseline` and threaded into validation as an argument. Nothing
//     is cached between frames.
// 2.  **Overflow-free pooling**: channel samples are accumulated in `f64`, so the
//     mean is exact for any frame size the detector will see.
// 3.  **Guarded division**: a zero-pixel frame is rejected up front instead of
//     producing NaN averages.

pub mod photometric {
    use crate::core_modules::frame::FrameAccess;
    use crate::error::{InvalidInputError, Result};
    use serde::{Deserialize, Serialize};

    /// Frame-wide mean HSV saturation and value on the 0..=255 scale.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct PhotometricBaseline {
        pub average_saturation: f64,
        pub average_brightness: f64,
    }

    impl PhotometricBaseline {
        pub fn new(average_saturation: f64, average_brightness: f64) -> Self {
            Self {
                average_saturation,
                average_brightness,
            }
        }
    }

    /// Averages HSV saturation and value over every pixel of the frame.
    pub fn summarize<F: FrameAccess + ?Sized>(frame: &F) -> Result<PhotometricBaseline> {
        let pixel_count = frame.pixel_count();
        if pixel_count == 0 {
            return Err(InvalidInputError::EmptyFrame);
        }

        let (width, height) = frame.dimensions();
        let mut sum_saturation = 0.0f64;
        let mut sum_brightness = 0.0f64;
        for y in 0..height {
            for x in 0..width {
                if let Some(pixel) = frame.pixel_at(x, y) {
                    sum_saturation += pixel.saturation() as f64;
                    sum_brightness += pixel.value() as f64;
                }
            }
        }

        Ok(PhotometricBaseline {
            average_saturation: sum_saturation / pixel_count as f64,
            average_brightness: sum_brightness / pixel_count as f64,
        })
    }
}
