// THEORY:
// A `Frame` is the immutable pixel grid the detector reads from. It wraps an
// `image::RgbImage` so still images can be fed in directly, and it can be built
// from the raw RGBA buffers that video harnesses hand over.
//
// The `FrameAccess` trait is the narrow read-only seam the photometric and
// validation stages depend on: dimensions plus random access to one pixel.

use crate::core_modules::geometry::Point;
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{InvalidInputError, Result};
use image::RgbImage;

/// Read-only random access to a pixel grid.
pub trait FrameAccess {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// The pixel at `(x, y)`, or `None` outside the grid.
    fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel>;

    fn pixel_count(&self) -> usize {
        let (width, height) = self.dimensions();
        width as usize * height as usize
    }

    /// Looks up a pixel by signed image coordinates, as produced by centroids.
    fn sample(&self, point: Point) -> Result<Pixel> {
        let (width, height) = self.dimensions();
        let out_of_bounds = InvalidInputError::PixelOutOfBounds {
            x: point.x,
            y: point.y,
            width,
            height,
        };
        if point.x < 0 || point.y < 0 {
            return Err(out_of_bounds);
        }
        self.pixel_at(point.x as u32, point.y as u32).ok_or(out_of_bounds)
    }
}

/// A single video frame held as 8-bit RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn from_rgb_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// Builds a frame from a tightly packed RGB buffer.
    pub fn from_rgb_buffer(width: u32, height: u32, buffer: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if buffer.len() != expected {
            return Err(InvalidInputError::FrameBufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        let image = RgbImage::from_raw(width, height, buffer.to_vec()).ok_or(
            InvalidInputError::FrameBufferSize {
                expected,
                actual: buffer.len(),
            },
        )?;
        Ok(Self { image })
    }

    /// Builds a frame from a tightly packed RGBA buffer, dropping alpha.
    pub fn from_rgba_buffer(width: u32, height: u32, buffer: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            return Err(InvalidInputError::FrameBufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        let rgb: Vec<u8> = buffer
            .chunks_exact(4)
            .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
            .collect();
        Self::from_rgb_buffer(width, height, &rgb)
    }

    /// A frame filled with one color.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, pixel.into()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.image.get_pixel_checked(x, y).map(|rgb| Pixel::from(*rgb))
    }
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        Frame::from_rgb_image(image)
    }
}

impl FrameAccess for Frame {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        self.pixel(x, y)
    }
}

impl FrameAccess for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        self.get_pixel_checked(x, y).map(|rgb| Pixel::from(*rgb))
    }
}
