//! Matching utilities for centroid tracking.

use nalgebra::Point2;
use ndarray::Array2;

use crate::tracker::rect::Rect;

/// Label given to detections that do not carry one.
pub const DEFAULT_LABEL: &str = "object";

/// Detection input for the tracker.
///
/// Detections live for exactly one frame: the tracker copies what it needs
/// and never keeps a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in TLWH format
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Class label reported by the detector
    pub label: String,
}

impl Detection {
    pub fn new(bbox: Rect, score: f32) -> Self {
        Self {
            bbox,
            score,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn with_label(bbox: Rect, score: f32, label: impl Into<String>) -> Self {
        Self {
            bbox,
            score,
            label: label.into(),
        }
    }

    #[inline]
    pub fn center(&self) -> Point2<i32> {
        self.bbox.center()
    }
}

/// Euclidean distance between two integer points.
#[inline]
pub fn point_distance(a: &Point2<i32>, b: &Point2<i32>) -> f64 {
    nalgebra::distance(&a.cast::<f64>(), &b.cast::<f64>())
}

/// Compute the center-to-center distance matrix between tracks and detections.
///
/// Row `i` belongs to `track_centers[i]`, column `j` to `det_centers[j]`.
pub fn center_distance(track_centers: &[Point2<i32>], det_centers: &[Point2<i32>]) -> Array2<f64> {
    let mut dists = Array2::zeros((track_centers.len(), det_centers.len()));
    for (i, t) in track_centers.iter().enumerate() {
        for (j, d) in det_centers.iter().enumerate() {
            dists[[i, j]] = point_distance(t, d);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedy nearest-neighbour assignment.
///
/// Rows are visited in order. Each row takes the unclaimed column with the
/// smallest cost; on equal cost the lowest column index wins. The pair is
/// accepted when that cost is `<= thresh`, otherwise the row stays unmatched
/// and the column remains free for later rows.
pub fn greedy_assignment(cost_matrix: &Array2<f64>, thresh: f64) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    let mut claimed = vec![false; num_cols];
    let mut matches = Vec::new();
    let mut unmatched_tracks = Vec::new();

    for row in 0..num_rows {
        let mut best: Option<(usize, f64)> = None;
        for col in 0..num_cols {
            if claimed[col] {
                continue;
            }
            let cost = cost_matrix[[row, col]];
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((col, cost)),
            }
        }

        match best {
            Some((col, cost)) if cost <= thresh => {
                claimed[col] = true;
                matches.push((row, col));
            }
            _ => unmatched_tracks.push(row),
        }
    }

    let unmatched_detections = claimed
        .iter()
        .enumerate()
        .filter_map(|(j, &c)| if c { None } else { Some(j) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}
