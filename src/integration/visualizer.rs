//! Frame annotation.

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as PixelRect;

use super::font;
use crate::Frame;
use crate::metrics::Metrics;
use crate::tracker::{Detection, Rect, Track};

const DETECTION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const TRACK_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const HUD_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const HUD_SHADOW: Rgb<u8> = Rgb([0, 0, 0]);
const HUD_SCALE: i32 = 2;
const HUD_LINE_HEIGHT: i32 = 22;

/// Draws detections, tracks and metrics onto a copy of a frame.
pub trait Visualizer {
    fn annotate(
        &self,
        frame: &Frame,
        detections: &[Detection],
        tracks: &[Track],
        metrics: &Metrics,
    ) -> Frame;
}

/// Thin boxes for detections, thick boxes for tracks, a metrics HUD in the
/// top-left corner.
#[derive(Debug, Clone)]
pub struct SimpleVisualizer {
    pub show_ids: bool,
}

impl Default for SimpleVisualizer {
    fn default() -> Self {
        Self { show_ids: true }
    }
}

impl SimpleVisualizer {
    pub fn new(show_ids: bool) -> Self {
        Self { show_ids }
    }
}

/// Draw `rect` with a border growing outwards `thickness` pixels.
fn draw_rect(frame: &mut Frame, rect: &Rect, color: Rgb<u8>, thickness: i32) {
    for offset in 0..thickness {
        let width = (rect.width + 2 * offset).max(1) as u32;
        let height = (rect.height + 2 * offset).max(1) as u32;
        let outline = PixelRect::at(rect.x - offset, rect.y - offset).of_size(width, height);
        draw_hollow_rect_mut(frame, outline, color);
    }
}

impl Visualizer for SimpleVisualizer {
    fn annotate(
        &self,
        frame: &Frame,
        detections: &[Detection],
        tracks: &[Track],
        metrics: &Metrics,
    ) -> Frame {
        let mut out = frame.clone();

        for det in detections {
            draw_rect(&mut out, &det.bbox, DETECTION_COLOR, 1);
        }

        for track in tracks {
            draw_rect(&mut out, &track.bbox, TRACK_COLOR, 2);
            if self.show_ids {
                let label = format!("ID {}", track.track_id);
                // Keep the label on screen for tracks at the right edge.
                let max_x = (out.width() as i32 - font::text_width(&label, 1)).max(0);
                let x = track.bbox.x.clamp(0, max_x);
                let y = (track.bbox.y - 6 - font::GLYPH_HEIGHT).max(2);
                font::draw_text(&mut out, &label, x, y, 1, TRACK_COLOR);
            }
        }

        let mut y = 10;
        for (key, value) in metrics.iter() {
            let line = format!("{key}: {value:.0}");
            font::draw_text(&mut out, &line, 11, y + 1, HUD_SCALE, HUD_SHADOW);
            font::draw_text(&mut out, &line, 10, y, HUD_SCALE, HUD_COLOR);
            y += HUD_LINE_HEIGHT;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_leaves_input_untouched() {
        let frame = Frame::new(200, 120);
        let det = Detection::new(Rect::new(20, 30, 40, 20), 1.0);
        let track = Track {
            track_id: 7,
            bbox: Rect::new(100, 40, 30, 30),
            age: 0,
            hits: 3,
            label: "object".to_string(),
        };
        let metrics: Metrics = [("count", 4.0)].into_iter().collect();

        let out = SimpleVisualizer::default().annotate(&frame, &[det], &[track], &metrics);

        assert!(frame.pixels().all(|p| *p == Rgb([0, 0, 0])));
        assert_eq!(*out.get_pixel(20, 30), DETECTION_COLOR);
        assert_eq!(*out.get_pixel(100, 40), TRACK_COLOR);
        // Outer ring of the thick track border.
        assert_eq!(*out.get_pixel(99, 39), TRACK_COLOR);
        assert!(out.pixels().any(|p| *p == HUD_COLOR));
    }

    #[test]
    fn test_id_label_stays_inside_frame() {
        let frame = Frame::new(120, 60);
        let track = Track {
            track_id: 42,
            bbox: Rect::new(110, 30, 30, 20),
            age: 0,
            hits: 1,
            label: "object".to_string(),
        };
        let out = SimpleVisualizer::default().annotate(&frame, &[], &[track], &Metrics::new());

        // "ID 42" is 30 px wide, so it is shifted to start at x = 90 and its
        // last glyph is fully drawn. Label rows span y = 17..24.
        let label_width = font::text_width("ID 42", 1);
        let start = 120 - label_width;
        let last_glyph = start + 4 * (font::GLYPH_WIDTH + 1);
        let drawn = |x0: i32, x1: i32| {
            (x0..x1).any(|x| (17..24).any(|y| *out.get_pixel(x as u32, y) == TRACK_COLOR))
        };
        assert!(drawn(last_glyph, last_glyph + font::GLYPH_WIDTH));
        assert!(!drawn(0, start));
    }

    #[test]
    fn test_boxes_outside_frame_are_clipped() {
        let frame = Frame::new(50, 50);
        let det = Detection::new(Rect::new(-20, -20, 200, 10), 1.0);
        let out = SimpleVisualizer::new(false).annotate(&frame, &[det], &[], &Metrics::new());
        assert_eq!(out.dimensions(), (50, 50));
    }
}
