// Runs the detector on a still image and a set of pre-extracted outlines, and
// prints the frame analysis as JSON.

use anyhow::Context;
use clap::Parser;
use lightbar_vision::{LightBarPipeline, Outline, PipelineConfig};
use lightbar_vision::core_modules::frame::Frame;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lightbar_vision", version, about = "Classify and pair light bars in one frame")]
struct Cli {
    /// Frame to analyze (any format the `image` crate can decode).
    #[arg(long)]
    image: PathBuf,

    /// JSON list of outlines, each a list of `[x, y]` points.
    #[arg(long)]
    outlines: PathBuf,

    /// Optional JSON file overriding pipeline thresholds.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let image = image::open(&cli.image)
        .with_context(|| format!("failed to open {}", cli.image.display()))?
        .to_rgb8();
    let frame = Frame::from_rgb_image(image);

    let outlines_json = std::fs::read_to_string(&cli.outlines)
        .with_context(|| format!("failed to read {}", cli.outlines.display()))?;
    let outlines: Vec<Outline> = serde_json::from_str(&outlines_json)
        .with_context(|| format!("failed to parse {}", cli.outlines.display()))?;

    let pipeline = LightBarPipeline::new(config);
    let analysis = pipeline.analyze(&frame, &outlines)?;
    info!(
        light_bars = analysis.light_bars.len(),
        pairs = analysis.pairs.len(),
        "analysis complete"
    );

    let output = if cli.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{output}");
    Ok(())
}
