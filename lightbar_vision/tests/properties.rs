use image::RgbImage;
use lightbar_vision::config::ClassifierConfig;
use lightbar_vision::core_modules::photometric::photometric::summarize;
use lightbar_vision::core_modules::shape_classifier::shape_classifier::classify;
use lightbar_vision::{Frame, Outline, Point};
use proptest::prelude::*;

fn arb_outline(max_points: usize) -> impl Strategy<Value = Outline> {
    prop::collection::vec((-50i32..300, -50i32..300), 0..max_points)
        .prop_map(Outline::from)
}

/// Points spread along one straight line: zero enclosed area.
fn arb_collinear_outline() -> impl Strategy<Value = Outline> {
    (-100i32..100, -100i32..100, -5i32..5, -5i32..5, 0usize..40).prop_map(
        |(x0, y0, dx, dy, n)| {
            Outline::new((0..n as i32).map(|k| Point::new(x0 + k * dx, y0 + k * dy)).collect())
        },
    )
}

fn arb_frame() -> impl Strategy<Value = Frame> {
    (1u32..16, 1u32..16).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<u8>(), (width * height * 3) as usize).prop_map(move |bytes| {
            let image = RgbImage::from_raw(width, height, bytes).expect("buffer matches dimensions");
            Frame::from_rgb_image(image)
        })
    })
}

proptest! {
    #[test]
    fn zero_area_outlines_never_become_candidates(outline in arb_collinear_outline()) {
        prop_assert_eq!(outline.area(), 0.0);
        prop_assert!(classify(&[outline], &ClassifierConfig::default()).is_empty());
    }

    #[test]
    fn candidates_follow_input_order_and_clear_the_area_floor(
        outlines in prop::collection::vec(arb_outline(12), 0..20)
    ) {
        let config = ClassifierConfig::default();
        let candidates = classify(&outlines, &config);

        prop_assert!(candidates.len() <= outlines.len());
        for window in candidates.windows(2) {
            prop_assert!(window[0].outline_index < window[1].outline_index);
        }
        for candidate in &candidates {
            prop_assert!(candidate.area > config.min_centroid_area);
            prop_assert_eq!(candidate.area, outlines[candidate.outline_index].area());
        }
        prop_assert_eq!(candidates, classify(&outlines, &config));
    }

    #[test]
    fn baseline_stays_in_channel_range(frame in arb_frame()) {
        let baseline = summarize(&frame).expect("frame has pixels");
        prop_assert!((0.0..=255.0).contains(&baseline.average_saturation));
        prop_assert!((0.0..=255.0).contains(&baseline.average_brightness));
        prop_assert_eq!(Ok(baseline), summarize(&frame));
    }
}
