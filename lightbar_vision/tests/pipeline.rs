use lightbar_vision::core_modules::extractor::PrecomputedOutlines;
use lightbar_vision::core_modules::frame::Frame;
use lightbar_vision::core_modules::pixel::pixel::Pixel;
use lightbar_vision::{InvalidInputError, LightBarPipeline, Outline, PipelineConfig, Point, Report};

mod common;

#[test]
fn level_bars_are_validated_and_paired() {
    let lit = [(40, 30), (120, 31)];
    let frame = common::frame_with_bars(&lit);
    let mut outlines = common::outlines_for(&lit);
    // Bar-shaped outline over unlit background, and a square.
    outlines.push(common::bar_outline(160, 30, 10, 20));
    outlines.push(common::bar_outline(10, 60, 20, 20));

    let analysis = LightBarPipeline::default().analyze(&frame, &outlines).unwrap();

    assert_eq!(analysis.outlines_examined, 4);
    assert_eq!(analysis.candidates.len(), 3);
    assert_eq!(analysis.light_bars.len(), 2);
    assert_eq!(analysis.light_bars[0].centroid(), Point::new(45, 40));
    assert_eq!(analysis.light_bars[1].centroid(), Point::new(125, 41));
    assert_eq!(analysis.rejected.shape, 1);
    assert_eq!(analysis.rejected.photometric, 1);
    assert_eq!(analysis.rejected.area + analysis.rejected.degenerate, 0);

    assert_eq!(analysis.pairs.len(), 1);
    let pair = analysis.pairs[0];
    assert_eq!((pair.first, pair.second), (0, 1));
    assert_eq!(
        pair.centroids(&analysis.light_bars),
        Some((Point::new(45, 40), Point::new(125, 41)))
    );

    // 400 lit pixels (s = 215, v = 255) on 19600 dark ones (s = 0, v = 30).
    assert!((analysis.baseline.average_saturation - 4.3).abs() < 1e-9);
    assert!((analysis.baseline.average_brightness - 34.5).abs() < 1e-9);
}

#[test]
fn offset_bars_are_reported_but_not_paired() {
    let lit = [(40, 30), (120, 40)];
    let frame = common::frame_with_bars(&lit);
    let outlines = common::outlines_for(&lit);
    let pipeline = LightBarPipeline::new(PipelineConfig::default());

    match pipeline.generate_report(&frame, &outlines) {
        Report::LightBars(analysis) => {
            assert_eq!(analysis.light_bars.len(), 2);
            assert!(analysis.pairs.is_empty());
        }
        Report::NoLightBars => panic!("expected two light bars"),
    }
    assert!(!pipeline.pairs_detected(&frame, &outlines));
}

#[test]
fn pairs_detected_on_level_bars() {
    let lit = [(20, 10), (70, 10), (150, 70)];
    let frame = common::frame_with_bars(&lit);
    let pipeline = LightBarPipeline::default();
    assert!(pipeline.pairs_detected(&frame, &common::outlines_for(&lit)));
}

#[test]
fn empty_frame_is_skipped() {
    let frame = Frame::filled(0, 0, Pixel::default());
    let pipeline = LightBarPipeline::default();
    let outlines = common::outlines_for(&[(0, 0)]);

    assert_eq!(pipeline.analyze(&frame, &outlines), Err(InvalidInputError::EmptyFrame));
    assert_eq!(pipeline.generate_report(&frame, &outlines), Report::NoLightBars);
}

#[test]
fn rejections_are_counted_per_stage() {
    let lit = [(40, 30)];
    let frame = common::frame_with_bars(&lit);
    let mut config = PipelineConfig::default();
    config.classifier.small_area_min = 0.0;

    let mut outlines = common::outlines_for(&lit);
    // 3x6 span encloses 18 px: bar-shaped, but under the centroid floor.
    outlines.push(common::bar_outline(100, 60, 4, 7));
    outlines.push(common::bar_outline(10, 60, 20, 20));
    outlines.push(Outline::from(vec![(0, 0), (0, 30)]));

    let analysis = LightBarPipeline::new(config).analyze(&frame, &outlines).unwrap();

    assert_eq!(analysis.outlines_examined, 4);
    assert_eq!(analysis.light_bars.len(), 1);
    assert_eq!(analysis.rejected.shape, 2);
    assert_eq!(analysis.rejected.area, 1);
    assert_eq!(analysis.rejected.degenerate, 0);
    assert_eq!(analysis.rejected.photometric, 0);
}

#[test]
fn black_frame_has_a_zero_baseline_and_no_bars() {
    let frame = Frame::filled(50, 50, Pixel::new(0, 0, 0));
    let outlines = common::outlines_for(&[(5, 5), (30, 5)]);
    let analysis = LightBarPipeline::default().analyze(&frame, &outlines).unwrap();

    assert_eq!(analysis.candidates.len(), 2);
    assert!(analysis.light_bars.is_empty());
    assert!(analysis.pairs.is_empty());
    assert_eq!(analysis.rejected.photometric, 2);
}

#[test]
fn report_through_an_extractor() {
    let lit = [(40, 30), (120, 30)];
    let frame = common::frame_with_bars(&lit);
    let mut extractor = PrecomputedOutlines::new(common::outlines_for(&lit));

    let report = LightBarPipeline::default()
        .generate_report_with(&frame, &mut extractor)
        .unwrap();
    assert!(matches!(report, Report::LightBars(ref analysis) if analysis.pairs.len() == 1));
}

#[test]
fn analysis_is_stable_across_calls() {
    let lit = [(40, 30), (120, 31), (60, 70)];
    let frame = common::frame_with_bars(&lit);
    let outlines = common::outlines_for(&lit);
    let pipeline = LightBarPipeline::default();
    assert_eq!(pipeline.analyze(&frame, &outlines), pipeline.analyze(&frame, &outlines));
}

#[test]
fn analysis_serializes_to_json() {
    let lit = [(40, 30), (120, 31)];
    let frame = common::frame_with_bars(&lit);
    let analysis = LightBarPipeline::default()
        .analyze(&frame, &common::outlines_for(&lit))
        .unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["light_bars"][0]["centroid"], serde_json::json!([45, 40]));
    assert_eq!(json["pairs"][0]["second"], 1);
    assert_eq!(json["rejected"]["photometric"], 0);
}
