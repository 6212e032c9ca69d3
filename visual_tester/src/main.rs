mod contours;

use anyhow::{Context, bail};
use clap::Parser;
use contours::CannyContourExtractor;
use lightbar_vision::{Frame, FrameAnalysis, LightBarPipeline, PipelineConfig, Point, Report};
use opencv::{
    core::{self, Mat, Rect, Scalar},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter},
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "visual_tester", about = "Annotate light bars and pairs in a video")]
struct Cli {
    input_video: PathBuf,
    output_video: PathBuf,

    /// Optional JSON file overriding pipeline thresholds.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also show each annotated frame in a window.
    #[arg(long)]
    show: bool,
}

const WINDOW_NAME: &str = "light bars";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    // --- 2. Video I/O Initialization ---
    let input_path = cli.input_video.to_string_lossy();
    let mut cap = VideoCapture::from_file(&input_path, videoio::CAP_ANY)?;
    if !cap.is_opened()? {
        bail!("could not open video file {input_path}");
    }

    let frame_width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
    let frame_height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
    let fps = cap.get(videoio::CAP_PROP_FPS)?;

    let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
    let mut writer = VideoWriter::new(
        &cli.output_video.to_string_lossy(),
        fourcc,
        fps,
        core::Size::new(frame_width as i32, frame_height as i32),
        true,
    )?;

    // --- 3. Pipeline Initialization ---
    let pipeline = LightBarPipeline::new(config);
    let mut extractor = CannyContourExtractor::default();
    if cli.show {
        highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;
    }

    // --- 4. Main Processing Loop ---
    let mut frame = Mat::default();
    let mut frame_index = 0u64;
    let mut paired_frames = 0u64;
    loop {
        if !cap.read(&mut frame)? || frame.empty() {
            break;
        }

        // --- 5. Frame Conversion & Pipeline Processing ---
        // Convert the OpenCV Mat (BGR) to an RGBA buffer for the pipeline.
        let mut rgba_frame = Mat::default();
        imgproc::cvt_color(&frame, &mut rgba_frame, imgproc::COLOR_BGR2RGBA, 0)?;
        let detector_frame = Frame::from_rgba_buffer(
            frame.cols() as u32,
            frame.rows() as u32,
            rgba_frame.data_bytes()?,
        )
        .context("converting frame")?;

        let report = pipeline.generate_report_with(&detector_frame, &mut extractor)?;

        // --- 6. Visualization ---
        let mut output_frame = frame.clone();
        match &report {
            Report::LightBars(analysis) => {
                if !analysis.pairs.is_empty() {
                    paired_frames += 1;
                }
                draw_analysis(&mut output_frame, analysis)?;
            }
            Report::NoLightBars => {}
        }

        // --- 7. Write Output Frame ---
        writer.write(&output_frame)?;
        if cli.show {
            highgui::imshow(WINDOW_NAME, &output_frame)?;
            if highgui::wait_key(30)? >= 0 {
                warn!(frame_index, "stopped by key press");
                break;
            }
        }
        frame_index += 1;
    }

    info!(
        frames = frame_index,
        paired_frames,
        output = %cli.output_video.display(),
        "processing complete"
    );
    Ok(())
}

fn to_cv_point(point: Point) -> core::Point {
    core::Point::new(point.x, point.y)
}

/// OpenCV rectangles are `i32`; anything wider is off-frame anyway.
fn clamp_extent(extent: i64) -> i32 {
    extent.clamp(0, i64::from(i32::MAX)) as i32
}

/// Green centroid dots, red bounding boxes, and a red link between paired bars.
fn draw_analysis(image: &mut Mat, analysis: &FrameAnalysis) -> opencv::Result<()> {
    let red = Scalar::new(0.0, 0.0, 255.0, 0.0);
    let green = Scalar::new(0.0, 255.0, 0.0, 0.0);

    for bar in &analysis.light_bars {
        imgproc::circle(image, to_cv_point(bar.centroid()), 3, green, -1, imgproc::LINE_8, 0)?;
        let bbox = bar.bounding_box();
        let rect = Rect::new(bbox.x, bbox.y, clamp_extent(bbox.width), clamp_extent(bbox.height));
        imgproc::rectangle(image, rect, red, 2, imgproc::LINE_8, 0)?;
    }

    for pair in &analysis.pairs {
        if let Some((a, b)) = pair.centroids(&analysis.light_bars) {
            imgproc::line(image, to_cv_point(a), to_cv_point(b), red, 2, imgproc::LINE_8, 0)?;
        }
    }
    Ok(())
}
