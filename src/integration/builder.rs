//! Builder for creating Detection objects from various box formats.

use crate::tracker::{DEFAULT_LABEL, Detection, Rect};

/// Builder for creating `Detection` objects from various box formats.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    bbox: Rect,
    score: f32,
    label: String,
}

impl Default for DetectionBuilder {
    fn default() -> Self {
        Self {
            bbox: Rect::default(),
            score: 1.0,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.bbox = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set bounding box by center and size (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: i32, cy: i32, w: i32, h: i32) -> Self {
        self.bbox = Rect::from_center(cx, cy, w, h);
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.bbox = Rect::new(x, y, w, h);
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Set the class label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection::with_label(self.bbox, self.score, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_builder() {
        let det = DetectionBuilder::new()
            .tlbr(10, 20, 50, 80)
            .score(0.95)
            .label("car")
            .build();

        assert_eq!(det.score, 0.95);
        assert_eq!(det.label, "car");
        assert_eq!(det.bbox.to_tlwh(), [10, 20, 40, 60]);
    }

    #[test]
    fn test_builder_defaults() {
        let det = DetectionBuilder::new().xywh(100, 100, 20, 10).build();
        assert_eq!(det.score, 1.0);
        assert_eq!(det.label, DEFAULT_LABEL);
        assert_eq!(det.center().x, 100);
        assert_eq!(det.center().y, 100);
    }
}
