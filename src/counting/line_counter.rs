//! Counting tracks whose centers cross an oriented line.

use std::collections::HashMap;

use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use log::debug;

use crate::Frame;
use crate::counting::PostProcessor;
use crate::counting::line::Line;
use crate::metrics::Metrics;
use crate::tracker::{Track, TrackId};

pub const COUNT: &str = "count";
pub const COUNT_POSITIVE: &str = "count_positive";
pub const COUNT_NEGATIVE: &str = "count_negative";

const LINE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Tracks need strictly more hits than this before a side change counts.
pub const MIN_HITS: u32 = 2;

/// Counts side changes of track centers relative to a [`Line`].
///
/// The first sighting of an identity only records its side, so an object
/// that appears already past the line is not counted.
#[derive(Debug, Clone)]
pub struct LineCounter {
    line: Line,
    side_by_id: HashMap<TrackId, bool>,
    count: u64,
    count_positive: u64,
    count_negative: u64,
}

impl LineCounter {
    pub fn new(line: Line) -> Self {
        Self {
            line,
            side_by_id: HashMap::new(),
            count: 0,
            count_positive: 0,
            count_negative: 0,
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Last recorded side of `id`, if it has been seen.
    pub fn side_of(&self, id: TrackId) -> Option<bool> {
        self.side_by_id.get(&id).copied()
    }

    /// Number of identities with a recorded side.
    pub fn tracked_sides(&self) -> usize {
        self.side_by_id.len()
    }

    fn metrics(&self) -> Metrics {
        let mut metrics = Metrics::new();
        metrics.insert(COUNT, self.count as f64);
        metrics.insert(COUNT_POSITIVE, self.count_positive as f64);
        metrics.insert(COUNT_NEGATIVE, self.count_negative as f64);
        metrics
    }
}

impl PostProcessor for LineCounter {
    fn process(&mut self, frame_idx: u64, tracks: &[Track]) -> Metrics {
        for track in tracks {
            let now_side = self.line.side(&track.bbox.center());
            let Some(prev_side) = self.side_by_id.insert(track.track_id, now_side) else {
                continue;
            };
            if prev_side != now_side && track.hits > MIN_HITS {
                self.count += 1;
                if now_side {
                    self.count_positive += 1;
                } else {
                    self.count_negative += 1;
                }
                debug!(
                    "frame {}: track {} crossed the line (count {})",
                    frame_idx, track.track_id, self.count
                );
            }
        }
        self.metrics()
    }

    fn draw(&self, frame: &mut Frame) {
        let (a, b) = (self.line.a, self.line.b);
        for offset in [-0.5f32, 0.5] {
            draw_line_segment_mut(
                frame,
                (a.x as f32 + offset, a.y as f32 + offset),
                (b.x as f32 + offset, b.y as f32 + offset),
                LINE_COLOR,
            );
        }
        draw_filled_circle_mut(frame, (a.x, a.y), 4, LINE_COLOR);
        draw_filled_circle_mut(frame, (b.x, b.y), 4, LINE_COLOR);
    }

    fn forget(&mut self, ids: &[TrackId]) {
        for id in ids {
            self.side_by_id.remove(id);
        }
    }
}
