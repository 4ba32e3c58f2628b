//! Single object track for centroid tracking.

use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;

/// Persistent track identity.
pub type TrackId = u64;

/// Single object track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier, never reused within a run
    pub track_id: TrackId,
    /// Most recently matched bounding box
    pub bbox: Rect,
    /// Number of frames since the track was last matched
    pub age: u32,
    /// Number of successful matches, including the spawning detection
    pub hits: u32,
    /// Label of the most recently matched detection
    pub label: String,
}

impl Track {
    /// Spawn a track from an unclaimed detection.
    pub fn spawn(track_id: TrackId, det: &Detection) -> Self {
        Self {
            track_id,
            bbox: det.bbox,
            age: 0,
            hits: 1,
            label: det.label.clone(),
        }
    }

    pub fn mark_missed(&mut self) {
        self.age += 1;
    }

    pub fn update(&mut self, det: &Detection) {
        self.bbox = det.bbox;
        self.label.clone_from(&det.label);
        self.hits += 1;
        self.age = 0;
    }

    #[inline]
    pub fn is_stale(&self, max_age: u32) -> bool {
        self.age > max_age
    }
}
