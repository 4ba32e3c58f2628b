//! Identity-keyed track storage.

use std::collections::BTreeMap;

use crate::tracker::track::{Track, TrackId};

/// Owns every live track, keyed by identity.
///
/// Identities come from a monotonically increasing counter starting at 1.
/// `commit` is the only place tracks leave the store.
#[derive(Debug, Clone)]
pub struct TrackArena {
    tracks: BTreeMap<TrackId, Track>,
    next_id: TrackId,
}

impl Default for TrackArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackArena {
    pub fn new() -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Reserve the next identity.
    pub fn allocate(&mut self) -> TrackId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Live tracks in ascending identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Replace the stored generation with `next`, dropping tracks older than
    /// `max_age`. Returns the identities that were dropped, ascending.
    pub fn commit(&mut self, next: Vec<Track>, max_age: u32) -> Vec<TrackId> {
        let mut removed = Vec::new();
        let mut tracks = BTreeMap::new();
        for track in next {
            debug_assert!(track.track_id < self.next_id);
            if track.is_stale(max_age) {
                removed.push(track.track_id);
            } else {
                tracks.insert(track.track_id, track);
            }
        }
        removed.sort_unstable();
        self.tracks = tracks;
        removed
    }

    /// Drop every track and restart identity allocation.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.next_id = 1;
    }
}
