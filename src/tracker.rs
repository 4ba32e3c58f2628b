mod arena;
mod centroid_tracker;
mod matching;
mod rect;
mod track;

pub use arena::TrackArena;
pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use matching::{
    AssignmentResult, DEFAULT_LABEL, Detection, center_distance, greedy_assignment, point_distance,
};
pub use rect::Rect;
pub use track::{Track, TrackId};

/// Frame-to-frame association of detections into persistent tracks.
///
/// Implementations must never fail: an empty detection list is a normal
/// frame in which every track simply ages.
pub trait Tracker {
    /// Consume this frame's detections and return the live tracks.
    fn update(&mut self, detections: &[Detection]) -> Vec<Track>;

    /// Forget every track.
    fn reset(&mut self);

    /// Identities removed by the most recent `update`.
    fn removed(&self) -> &[TrackId] {
        &[]
    }
}
