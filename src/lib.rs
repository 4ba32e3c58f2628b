//! Object tracking and line-crossing counting for traffic video.
//!
//! Per-frame detections are associated into persistent tracks by a greedy
//! nearest-centroid [`CentroidTracker`]; a [`LineCounter`] counts tracks
//! whose centers change side of an oriented line. The [`Pipeline`] ties a
//! [`Detector`], tracker, counter and [`Visualizer`] together and fixes the
//! per-frame processing order.
//!
//! ```
//! use roadwatch::{CentroidTracker, DetectionBuilder, Line, LineCounter, PostProcessor, Tracker};
//!
//! let mut tracker = CentroidTracker::default();
//! let mut counter = LineCounter::new(Line::from_coords(400, 100, 400, 600));
//!
//! for frame_idx in 0..40u64 {
//!     let cx = 100 + 10 * frame_idx as i32;
//!     let det = DetectionBuilder::new().xywh(cx, 300, 40, 20).build();
//!     let tracks = tracker.update(&[det]);
//!     counter.process(frame_idx, &tracks);
//! }
//! assert_eq!(counter.count(), 1);
//! ```

pub mod counting;
pub mod error;
pub mod integration;
pub mod metrics;
pub mod tracker;

/// Video frame as seen by every pipeline stage.
pub type Frame = image::RgbImage;

pub use counting::{Line, LineCounter, PostProcessor};
pub use error::{Error, Result};
pub use integration::{
    ConsoleDisplay, DetectionBuilder, Detector, DisplayEvent, DisplaySurface, FrameSink,
    FrameSource, MotionConfig, MotionDetector, Pipeline, PipelineConfig, SimpleVisualizer,
    StopReason, Visualizer, create_sink, open_source,
};
pub use metrics::Metrics;
pub use tracker::{CentroidTracker, Detection, Rect, Track, TrackId, Tracker, TrackerConfig};
