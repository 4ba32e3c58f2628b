use std::collections::HashSet;

use roadwatch::counting::COUNT;
use roadwatch::{
    CentroidTracker, Detection, DetectionBuilder, Line, LineCounter, PostProcessor, Rect, Track,
    TrackId, Tracker, TrackerConfig,
};

fn det(cx: i32, cy: i32) -> Detection {
    DetectionBuilder::new().xywh(cx, cy, 40, 20).build()
}

fn track_at(id: TrackId, cx: i32, cy: i32, hits: u32) -> Track {
    Track {
        track_id: id,
        bbox: Rect::from_center(cx, cy, 40, 20),
        age: 0,
        hits,
        label: "object".to_string(),
    }
}

fn count(counter: &mut LineCounter, frame_idx: u64, tracks: &[Track]) -> f64 {
    counter.process(frame_idx, tracks).get(COUNT).unwrap()
}

#[test]
fn test_basic_tracking() {
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_dist: 60.0,
        max_age: 2,
    });

    // Frame 1: One detection
    let tracks1 = tracker.update(&[det(100, 100)]);
    assert_eq!(tracks1.len(), 1);
    let id1 = tracks1[0].track_id;

    // Frame 2: Same object moved slightly
    let tracks2 = tracker.update(&[det(105, 105)]);
    assert_eq!(tracks2.len(), 1);
    assert_eq!(tracks2[0].track_id, id1);
    assert_eq!(tracks2[0].hits, 2);

    // Frame 3: Object missing; the track is kept while young enough
    let tracks3 = tracker.update(&[]);
    assert_eq!(tracks3.len(), 1);
    assert_eq!(tracks3[0].age, 1);

    // Frame 4: Object reappears nearby and is picked up again
    let tracks4 = tracker.update(&[det(115, 110)]);
    assert_eq!(tracks4.len(), 1);
    assert_eq!(tracks4[0].track_id, id1);
    assert_eq!(tracks4[0].hits, 3);
    assert_eq!(tracks4[0].age, 0);
}

#[test]
fn test_ids_unique_and_strictly_increasing() {
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_dist: 30.0,
        max_age: 1,
    });

    // Objects pop in and out at scattered positions.
    let batches: Vec<Vec<Detection>> = (0..40)
        .map(|frame| {
            (0..(frame % 4))
                .map(|k| det(50 + 137 * ((frame * 7 + k * 3) % 11), 40 + 90 * k))
                .collect()
        })
        .collect();

    let mut last_issued = 0;
    let mut removed_ever = HashSet::new();
    let mut seen_ever = HashSet::new();

    for batch in &batches {
        let tracks = tracker.update(batch);

        let ids: Vec<_> = tracks.iter().map(|t| t.track_id).collect();
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        for &id in &ids {
            assert!(!removed_ever.contains(&id), "track {id} resurrected");
            if seen_ever.insert(id) {
                assert!(id > last_issued, "id {id} issued after {last_issued}");
                last_issued = id;
            }
        }
        removed_ever.extend(tracker.removed().iter().copied());
    }
    assert!(!removed_ever.is_empty());
}

#[test]
fn test_unmatched_track_never_returns() {
    let max_age = 4;
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_dist: 60.0,
        max_age,
    });
    let id = tracker.update(&[det(200, 200)])[0].track_id;

    for _ in 0..=max_age {
        tracker.update(&[det(600, 600)]);
    }
    assert!(tracker.removed().contains(&id));

    for _ in 0..10 {
        let tracks = tracker.update(&[det(200, 200), det(600, 600)]);
        assert!(tracks.iter().all(|t| t.track_id != id));
    }
}

#[test]
fn test_stationary_detection_keeps_single_track() {
    let max_age = 5;
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_dist: 60.0,
        max_age,
    });

    for frame in 1..=(max_age + 2) {
        let tracks = tracker.update(&[det(320, 240)]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].track_id, 1);
        assert_eq!(tracks[0].hits, frame);
        assert_eq!(tracks[0].age, 0);
    }
}

#[test]
fn test_hits_never_decrease() {
    let mut tracker = CentroidTracker::default();
    let mut last_hits = 0;
    for frame in 0..20 {
        let batch = if frame % 3 == 0 { vec![] } else { vec![det(100 + frame, 100)] };
        let tracks = tracker.update(&batch);
        if let Some(track) = tracks.first() {
            assert!(track.hits >= last_hits);
            last_hits = track.hits;
        }
    }
    assert!(last_hits > 1);
}

#[test]
fn test_first_observation_never_counts() {
    let mut counter = LineCounter::new(Line::from_coords(400, 100, 400, 600));
    // Start on either side, already past the hit threshold.
    assert_eq!(count(&mut counter, 0, &[track_at(1, 100, 300, 50)]), 0.0);
    assert_eq!(count(&mut counter, 1, &[track_at(2, 700, 300, 50)]), 0.0);
}

#[test]
fn test_hit_threshold_for_crossings() {
    let mut counter = LineCounter::new(Line::from_coords(400, 100, 400, 600));

    count(&mut counter, 0, &[track_at(1, 390, 300, 1), track_at(2, 390, 400, 2)]);
    let after = count(
        &mut counter,
        1,
        &[track_at(1, 410, 300, 2), track_at(2, 410, 400, 3)],
    );
    // Track 1 flips with hits == 2 and is ignored; track 2 has 3 hits.
    assert_eq!(after, 1.0);
}

#[test]
fn test_same_sides_twice_is_idempotent() {
    let mut counter = LineCounter::new(Line::from_coords(400, 100, 400, 600));
    let tracks = vec![track_at(1, 100, 300, 5), track_at(2, 700, 300, 5)];

    count(&mut counter, 0, &tracks);
    let first = count(&mut counter, 1, &tracks);
    let second = count(&mut counter, 2, &tracks);
    assert_eq!(first, second);
}

#[test]
fn test_scenario_single_track_crossing() {
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_dist: 60.0,
        max_age: 25,
    });
    let mut counter = LineCounter::new(Line::from_coords(400, 100, 400, 600));

    let mut counted_at = None;
    for frame in 0..=60u64 {
        let cx = 100 + 10 * frame as i32;
        let tracks = tracker.update(&[det(cx, 300)]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].hits as u64, frame + 1);

        let value = count(&mut counter, frame, &tracks);
        if counted_at.is_none() && value == 1.0 {
            counted_at = Some(frame);
        }
        if let Some(first) = counted_at {
            assert_eq!(value, 1.0, "count changed after frame {first}");
        } else {
            assert_eq!(value, 0.0);
        }
    }

    // The center reaches the line at x = 400, which already classifies as
    // the far side.
    assert_eq!(counted_at, Some(30));
}

#[test]
fn test_scenario_two_tracks_cross_same_frame() {
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_dist: 60.0,
        max_age: 25,
    });
    let mut counter = LineCounter::new(Line::from_coords(400, 100, 400, 600));

    let mut previous = 0.0;
    for frame in 0..10u64 {
        let cx = 350 + 10 * frame as i32;
        let tracks = tracker.update(&[det(cx, 200), det(cx, 450)]);
        assert_eq!(tracks.len(), 2);

        let value = count(&mut counter, frame, &tracks);
        if cx == 400 {
            assert_eq!(value - previous, 2.0);
        } else {
            assert_eq!(value, previous);
        }
        previous = value;
    }
    assert_eq!(previous, 2.0);
}
