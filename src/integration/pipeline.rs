//! Pipeline combining detection, tracking, counting and annotation.

use log::{debug, error, info, warn};

use super::{
    Detector, DisplayEvent, DisplaySurface, FrameSink, FrameSource, SimpleVisualizer, Visualizer,
};
use crate::Frame;
use crate::counting::PostProcessor;
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::tracker::{Detection, Track, Tracker};

/// Configuration for the Pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

/// Why a run stopped. Every variant is a normal termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    FrameLimit,
    Quit,
}

/// Everything computed for one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub detections: Vec<Detection>,
    pub tracks: Vec<Track>,
    pub annotated: Frame,
}

/// Runs detect → track → count → annotate for every frame of a source.
///
/// Frames are processed strictly in order; tracking for a frame finishes
/// before counting for it starts, and both finish before the next frame is
/// read.
pub struct Pipeline<D, T, P, V = SimpleVisualizer>
where
    D: Detector,
    T: Tracker,
    P: PostProcessor,
    V: Visualizer,
{
    detector: D,
    tracker: T,
    post: P,
    visualizer: V,
    config: PipelineConfig,
    metrics: Metrics,
    frames_processed: u64,
    stop_reason: Option<StopReason>,
}

impl<D, T, P> Pipeline<D, T, P, SimpleVisualizer>
where
    D: Detector,
    T: Tracker,
    P: PostProcessor,
{
    /// Create a new pipeline with the default visualizer.
    pub fn new(detector: D, tracker: T, post: P, config: PipelineConfig) -> Self {
        Self::with_visualizer(detector, tracker, post, SimpleVisualizer::default(), config)
    }
}

impl<D, T, P, V> Pipeline<D, T, P, V>
where
    D: Detector,
    T: Tracker,
    P: PostProcessor,
    V: Visualizer,
{
    pub fn with_visualizer(
        detector: D,
        tracker: T,
        post: P,
        visualizer: V,
        config: PipelineConfig,
    ) -> Self {
        Self {
            detector,
            tracker,
            post,
            visualizer,
            config,
            metrics: Metrics::new(),
            frames_processed: 0,
            stop_reason: None,
        }
    }

    /// Process a single frame and fold its metrics into the accumulator.
    ///
    /// A detector failure is logged and the frame is treated as having no
    /// detections.
    pub fn process_frame(&mut self, frame_idx: u64, mut frame: Frame) -> FrameOutput {
        let detections = match self.detector.detect(&frame) {
            Ok(detections) => detections,
            Err(err) => {
                warn!("frame {}: detector failed: {}", frame_idx, err);
                Vec::new()
            }
        };

        let tracks = self.tracker.update(&detections);
        let update = self.post.process(frame_idx, &tracks);
        self.metrics.merge(update);
        self.post.forget(self.tracker.removed());

        debug!(
            "frame {}: {} detections, {} tracks, {}",
            frame_idx,
            detections.len(),
            tracks.len(),
            self.metrics
        );

        self.post.draw(&mut frame);
        let annotated = self
            .visualizer
            .annotate(&frame, &detections, &tracks, &self.metrics);

        FrameOutput {
            detections,
            tracks,
            annotated,
        }
    }

    /// Run until the source is exhausted, the frame limit is reached or the
    /// operator quits, and return the accumulated metrics.
    ///
    /// Only detector warmup can fail; it does so before any frame is read.
    /// The sink is finished, the display closed and the source dropped on
    /// every return path, including a failed warmup.
    pub fn run<S: FrameSource>(
        &mut self,
        mut source: S,
        mut sink: Option<&mut dyn FrameSink>,
        mut display: Option<&mut dyn DisplaySurface>,
    ) -> Result<Metrics> {
        if let Err(err) = self.detector.warmup() {
            let err = Error::Warmup(err.to_string());
            error!("{}", err);
            release(source, sink, display);
            return Err(err);
        }

        self.metrics = Metrics::new();
        self.frames_processed = 0;
        self.stop_reason = None;

        let reason = self.frame_loop(&mut source, &mut sink, &mut display);
        info!(
            "Stopped after {} frames ({:?})",
            self.frames_processed, reason
        );
        self.stop_reason = Some(reason);

        release(source, sink, display);
        Ok(self.metrics.clone())
    }

    fn frame_loop<S: FrameSource>(
        &mut self,
        source: &mut S,
        sink: &mut Option<&mut dyn FrameSink>,
        display: &mut Option<&mut dyn DisplaySurface>,
    ) -> StopReason {
        if self.limit_reached() {
            return StopReason::FrameLimit;
        }

        loop {
            let Some(frame) = source.read() else {
                return StopReason::EndOfStream;
            };

            let frame_idx = self.frames_processed;
            let output = self.process_frame(frame_idx, frame);

            let mut quit = false;
            if let Some(display) = display.as_deref_mut() {
                quit = display.show(frame_idx, &output.annotated, &self.metrics)
                    == DisplayEvent::Quit;
            }
            if let Some(sink) = sink.as_deref_mut() {
                if let Err(err) = sink.write(&output.annotated) {
                    warn!("frame {}: failed to write output: {}", frame_idx, err);
                }
            }

            self.frames_processed += 1;
            if self.limit_reached() {
                return StopReason::FrameLimit;
            }
            if quit {
                return StopReason::Quit;
            }
        }
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_frames
            .is_some_and(|max| self.frames_processed >= max)
    }

    /// Accumulated metrics of the current or most recent run.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    /// Get a reference to the post-processor.
    pub fn post(&self) -> &P {
        &self.post
    }
}

/// Finish the sink, close the display and drop the source.
fn release<S: FrameSource>(
    source: S,
    sink: Option<&mut dyn FrameSink>,
    display: Option<&mut dyn DisplaySurface>,
) {
    if let Some(sink) = sink {
        if let Err(err) = sink.finish() {
            warn!("Failed to finish output: {}", err);
        }
    }
    if let Some(display) = display {
        display.close();
    }
    drop(source);
}
