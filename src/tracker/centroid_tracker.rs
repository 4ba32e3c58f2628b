//! Greedy nearest-centroid tracker.

use log::{debug, trace};

use crate::tracker::Tracker;
use crate::tracker::arena::TrackArena;
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::track::{Track, TrackId};

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Largest center-to-center distance, in pixels, accepted as a match
    pub max_dist: f32,
    /// Frames a track may go unmatched before it is removed
    pub max_age: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_dist: 50.0,
            max_age: 30,
        }
    }
}

pub struct CentroidTracker {
    arena: TrackArena,
    config: TrackerConfig,
    removed: Vec<TrackId>,
    frame_id: u64,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            arena: TrackArena::new(),
            config,
            removed: Vec::new(),
            frame_id: 0,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Live tracks in ascending identity order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.arena.iter()
    }
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl Tracker for CentroidTracker {
    fn update(&mut self, detections: &[Detection]) -> Vec<Track> {
        self.frame_id += 1;

        // Step 1: Age every track; the arena yields them in ascending id order
        let mut next: Vec<Track> = self
            .arena
            .iter()
            .cloned()
            .map(|mut track| {
                track.mark_missed();
                track
            })
            .collect();

        // Step 2: Greedy association on centers
        let track_centers: Vec<_> = next.iter().map(|t| t.bbox.center()).collect();
        let det_centers: Vec<_> = detections.iter().map(Detection::center).collect();
        let dists = matching::center_distance(&track_centers, &det_centers);

        let AssignmentResult {
            matches,
            unmatched_detections,
            ..
        } = matching::greedy_assignment(&dists, self.config.max_dist as f64);

        for (itracked, idet) in matches {
            trace!(
                "frame {}: track {} matched detection {}",
                self.frame_id, next[itracked].track_id, idet
            );
            next[itracked].update(&detections[idet]);
        }

        // Step 3: Init new tracks
        for idet in unmatched_detections {
            let id = self.arena.allocate();
            trace!("frame {}: spawned track {}", self.frame_id, id);
            next.push(Track::spawn(id, &detections[idet]));
        }

        // Step 4: Commit the generation and drop stale tracks
        self.removed = self.arena.commit(next, self.config.max_age);
        if !self.removed.is_empty() {
            debug!(
                "frame {}: removed stale tracks {:?}",
                self.frame_id, self.removed
            );
        }

        self.arena.iter().cloned().collect()
    }

    fn reset(&mut self) {
        self.arena.clear();
        self.removed.clear();
        self.frame_id = 0;
    }

    fn removed(&self) -> &[TrackId] {
        &self.removed
    }
}
