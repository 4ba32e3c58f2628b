use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use roadwatch::{
    CentroidTracker, ConsoleDisplay, DisplaySurface, FrameSink, Line, LineCounter, MotionConfig,
    MotionDetector, Pipeline, PipelineConfig, TrackerConfig, create_sink, open_source,
};

/// RoadWatch: traffic analytics on a video source
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Video source: image directory, image file, animated GIF or camera index
    #[arg(long, default_value = "0")]
    src: String,

    /// Save annotated frames (`.gif` for an animation, otherwise a PNG directory)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Limit frames for quick tests
    #[arg(long)]
    max_frames: Option<u64>,

    /// Counting line coordinates
    #[arg(
        long,
        num_args = 4,
        value_names = ["X1", "Y1", "X2", "Y2"],
        default_values_t = [400, 100, 400, 600],
        allow_negative_numbers = true
    )]
    line: Vec<i32>,

    /// Minimum blob area for the motion detector
    #[arg(long, default_value_t = 800)]
    min_area: u32,

    /// Dilation iterations for the motion mask
    #[arg(long, default_value_t = 2)]
    dilate: u8,

    /// Largest center distance, in pixels, still matched to a track
    #[arg(long, default_value_t = 60.0)]
    max_dist: f32,

    /// Frames a track survives without a match
    #[arg(long, default_value_t = 25)]
    max_age: u32,

    /// Disable the interactive display
    #[arg(long)]
    no_display: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let [x1, y1, x2, y2] = <[i32; 4]>::try_from(args.line.as_slice())
        .context("--line takes exactly four integers")?;

    let source = open_source(&args.src)?;
    let mut sink = match &args.output {
        Some(path) => Some(create_sink(path)?),
        None => None,
    };
    let mut display = (!args.no_display).then(ConsoleDisplay::new);

    let detector = MotionDetector::new(MotionConfig {
        min_area: args.min_area,
        dilate_iter: args.dilate,
        ..MotionConfig::default()
    });
    let tracker = CentroidTracker::new(TrackerConfig {
        max_dist: args.max_dist,
        max_age: args.max_age,
    });
    let counter = LineCounter::new(Line::from_coords(x1, y1, x2, y2));

    let mut pipeline = Pipeline::new(
        detector,
        tracker,
        counter,
        PipelineConfig {
            max_frames: args.max_frames,
        },
    );

    info!("Counting crossings of ({x1}, {y1}) -> ({x2}, {y2})");
    let metrics = pipeline.run(
        source,
        sink.as_mut().map(|s| s as &mut dyn FrameSink),
        display.as_mut().map(|d| d as &mut dyn DisplaySurface),
    )?;

    println!("Final metrics: {}", serde_json::to_string(&metrics)?);
    Ok(())
}
