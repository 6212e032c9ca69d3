// THEORY:
// Contour extraction (blur, edge detection, border following) is owned by an image
// processing library outside this crate. `GeometryExtractor` is the seam it plugs
// into: give it a frame, get back closed outlines in a stable order.

use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::Outline;

/// Produces the closed outlines of shapes found in a frame.
pub trait GeometryExtractor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn extract(&mut self, frame: &Frame) -> Result<Vec<Outline>, Self::Error>;
}

/// Replays a fixed list of outlines for every frame. Handy when the outlines were
/// extracted ahead of time, e.g. loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedOutlines {
    outlines: Vec<Outline>,
}

impl PrecomputedOutlines {
    pub fn new(outlines: Vec<Outline>) -> Self {
        Self { outlines }
    }
}

impl GeometryExtractor for PrecomputedOutlines {
    type Error = std::convert::Infallible;

    fn extract(&mut self, _frame: &Frame) -> Result<Vec<Outline>, Self::Error> {
        Ok(self.outlines.clone())
    }
}
