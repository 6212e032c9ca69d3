#![allow(dead_code)]

use image::{Rgb, RgbImage};
use lightbar_vision::{Frame, Outline};

pub const BACKGROUND: Rgb<u8> = Rgb([30, 30, 30]);
pub const LIT_RED: Rgb<u8> = Rgb([255, 40, 40]);

/// Corner outline of a `width` x `height` pixel block, as a contour extractor
/// following its border would report it.
pub fn bar_outline(x: i32, y: i32, width: i32, height: i32) -> Outline {
    Outline::from(vec![
        (x, y),
        (x + width - 1, y),
        (x + width - 1, y + height - 1),
        (x, y + height - 1),
    ])
}

pub fn paint_block(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for py in y..y + height {
        for px in x..x + width {
            image.put_pixel(px, py, color);
        }
    }
}

/// A dark 200x100 frame with lit 10x20 bars painted at each `(x, y)`.
pub fn frame_with_bars(bars: &[(u32, u32)]) -> Frame {
    let mut image = RgbImage::from_pixel(200, 100, BACKGROUND);
    for &(x, y) in bars {
        paint_block(&mut image, x, y, 10, 20, LIT_RED);
    }
    Frame::from_rgb_image(image)
}

pub fn outlines_for(bars: &[(u32, u32)]) -> Vec<Outline> {
    bars.iter()
        .map(|&(x, y)| bar_outline(x as i32, y as i32, 10, 20))
        .collect()
}
