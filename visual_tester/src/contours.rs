use lightbar_vision::core_modules::extractor::GeometryExtractor;
use lightbar_vision::{Frame, Outline, Point};
use opencv::{
    core::{self, Mat, Size, Vector},
    imgproc,
    prelude::*,
};

/// Gray -> Gaussian blur -> Canny -> border following, the classic edge-contour
/// front end for light-bar detection.
pub struct CannyContourExtractor {
    pub blur_kernel: i32,
    pub blur_sigma: f64,
    pub canny_low: f64,
    pub canny_high: f64,
    pub canny_aperture: i32,
}

impl Default for CannyContourExtractor {
    fn default() -> Self {
        Self {
            blur_kernel: 9,
            blur_sigma: 2.0,
            canny_low: 40.0,
            canny_high: 120.0,
            canny_aperture: 3,
        }
    }
}

impl CannyContourExtractor {
    /// Contours of the edge map of a BGR or RGB image (`color_to_gray` picks which).
    pub fn extract_from_mat(&self, color: &Mat, color_to_gray: i32) -> opencv::Result<Vec<Outline>> {
        let mut gray = Mat::default();
        imgproc::cvt_color(color, &mut gray, color_to_gray, 0)?;

        let mut blurred = Mat::default();
        imgproc::gaussian_blur(
            &gray,
            &mut blurred,
            Size::new(self.blur_kernel, self.blur_kernel),
            self.blur_sigma,
            0.0,
            core::BORDER_DEFAULT,
        )?;

        let mut edges = Mat::default();
        imgproc::canny(
            &blurred,
            &mut edges,
            self.canny_low,
            self.canny_high,
            self.canny_aperture,
            false,
        )?;

        let mut contours = Vector::<Vector<core::Point>>::new();
        imgproc::find_contours(
            &edges,
            &mut contours,
            imgproc::RETR_TREE,
            imgproc::CHAIN_APPROX_SIMPLE,
            core::Point::new(0, 0),
        )?;

        Ok(contours
            .iter()
            .map(|contour| Outline::new(contour.iter().map(|p| Point::new(p.x, p.y)).collect()))
            .collect())
    }
}

impl GeometryExtractor for CannyContourExtractor {
    type Error = opencv::Error;

    fn extract(&mut self, frame: &Frame) -> Result<Vec<Outline>, Self::Error> {
        let mut rgb = Mat::new_rows_cols_with_default(
            frame.height() as i32,
            frame.width() as i32,
            core::CV_8UC3,
            core::Scalar::all(0.0),
        )?;
        rgb.data_bytes_mut()?
            .copy_from_slice(frame.as_image().as_raw());
        self.extract_from_mat(&rgb, imgproc::COLOR_RGB2GRAY)
    }
}
