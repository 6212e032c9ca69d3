// THEORY (single-pixel color model):
// The `Pixel` module is the most fundamental unit of the detector. It is a "dumb"
// data container for one RGB sample plus the single-pixel heuristics the light-bar
// stages need: HSV value (brightness) and HSV saturation, expressed in the 8-bit
// native channel range 0..=255 so that frame averages and per-pixel samples live on
// the same scale.
//
// Key principles:
// 1) Single-pixel scope: nothing here reads neighbors or other frames.
// 2) Integer-exact channels: value and saturation are computed the way 8-bit HSV
//    conversions do it (max channel, and chroma scaled by 255 / max, rounded).
// 3) Anything that needs more than one pixel (averages, thresholds) lives in the
//    photometric and validator modules.

pub mod pixel {
    pub type Channel = u8;
    pub type Saturation = Channel;
    pub type Value = Channel;

    /// A "dumb" data container representing a single RGB pixel.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        fn max_channel(&self) -> Channel {
            self.red.max(self.green.max(self.blue))
        }

        fn min_channel(&self) -> Channel {
            self.red.min(self.green.min(self.blue))
        }

        /// Chroma: max(R, G, B) - min(R, G, B).
        pub fn chroma(&self) -> Channel {
            self.max_channel() - self.min_channel()
        }

        /// HSV Value (V): brightness defined as max(R, G, B).
        pub fn value(&self) -> Value {
            self.max_channel()
        }

        /// HSV Saturation (S) on the 0..=255 scale: `round(255 * chroma / value)`.
        /// Black pixels have no defined saturation and report 0.
        pub fn saturation(&self) -> Saturation {
            let value = self.max_channel();
            if value == 0 {
                return 0;
            }
            let scaled = 255.0 * self.chroma() as f64 / value as f64;
            scaled.round().clamp(0.0, 255.0) as Saturation
        }
    }

    impl From<image::Rgb<u8>> for Pixel {
        fn from(rgb: image::Rgb<u8>) -> Self {
            let [red, green, blue] = rgb.0;
            Pixel::new(red, green, blue)
        }
    }

    impl From<Pixel> for image::Rgb<u8> {
        fn from(pixel: Pixel) -> Self {
            image::Rgb([pixel.red, pixel.green, pixel.blue])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::Pixel;

    #[test]
    fn value_is_the_brightest_channel() {
        assert_eq!(Pixel::new(10, 200, 30).value(), 200);
        assert_eq!(Pixel::new(0, 0, 0).value(), 0);
    }

    #[test]
    fn saturation_follows_8bit_hsv_rounding() {
        // chroma 74 over value 135 -> 139.78 -> 140
        let pixel = Pixel::new(135, 61, 61);
        assert_eq!(pixel.value(), 135);
        assert_eq!(pixel.saturation(), 140);
    }

    #[test]
    fn gray_and_black_pixels_have_no_saturation() {
        assert_eq!(Pixel::new(0, 0, 0).saturation(), 0);
        assert_eq!(Pixel::new(128, 128, 128).saturation(), 0);
        assert_eq!(Pixel::new(255, 0, 0).saturation(), 255);
    }
}
