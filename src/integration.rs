//! Integration module for connecting detectors, video I/O and displays
//! with the tracker and counter.
//!
//! The core only sees the traits defined here; concrete collaborators are
//! chosen when the [`Pipeline`] is composed.

mod builder;
mod detector;
mod display;
mod font;
mod motion;
mod pipeline;
mod video;
mod visualizer;

pub use builder::DetectionBuilder;
pub use detector::Detector;
pub use display::{ConsoleDisplay, DisplayEvent, DisplaySurface};
pub use motion::{MOTION_LABEL, MotionConfig, MotionDetector};
pub use pipeline::{FrameOutput, Pipeline, PipelineConfig, StopReason};
pub use video::{
    DEFAULT_FPS, FrameSink, FrameSource, GifFrames, GifSink, ImageSequence, ImageSequenceSink,
    VideoSink, VideoSource, create_sink, open_source,
};
pub use visualizer::{SimpleVisualizer, Visualizer};
