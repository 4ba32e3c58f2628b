//! Per-frame analytics computed from live tracks.

mod line;
mod line_counter;

pub use line::Line;
pub use line_counter::{COUNT, COUNT_NEGATIVE, COUNT_POSITIVE, LineCounter, MIN_HITS};

use crate::Frame;
use crate::metrics::Metrics;
use crate::tracker::{Track, TrackId};

/// Consumes live tracks every frame and reports metrics.
pub trait PostProcessor {
    /// Update internal state from this frame's tracks and return the
    /// metrics to merge into the running accumulator.
    fn process(&mut self, frame_idx: u64, tracks: &[Track]) -> Metrics;

    /// Paint this processor's overlay onto `frame`.
    fn draw(&self, frame: &mut Frame);

    /// Drop any per-identity state for tracks the tracker has removed.
    fn forget(&mut self, _ids: &[TrackId]) {}
}
