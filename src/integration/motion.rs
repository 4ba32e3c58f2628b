//! Background-subtraction motion detector.

use std::convert::Infallible;

use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use log::debug;

use super::{DetectionBuilder, Detector};
use crate::Frame;
use crate::tracker::Detection;

pub const MOTION_LABEL: &str = "moving";

/// Configuration for the MotionDetector.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Blobs with a smaller bounding-box area are discarded
    pub min_area: u32,
    /// Radius of the square dilation applied to the foreground mask
    pub dilate_iter: u8,
    /// Number of frames the background model averages over
    pub history: u32,
    /// Absolute gray-level difference that marks a pixel as foreground
    pub diff_threshold: u8,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_area: 500,
            dilate_iter: 2,
            history: 500,
            diff_threshold: 25,
        }
    }
}

/// Detects moving blobs against a running-average background.
///
/// The first frame (and any frame whose size differs from the model) only
/// seeds the background and yields no detections.
pub struct MotionDetector {
    config: MotionConfig,
    background: Vec<f32>,
    dims: (u32, u32),
    frames_seen: u32,
}

impl MotionDetector {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            background: Vec::new(),
            dims: (0, 0),
            frames_seen: 0,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    fn seed(&mut self, gray: &GrayImage) {
        self.dims = gray.dimensions();
        self.background = gray.as_raw().iter().map(|&p| p as f32).collect();
        self.frames_seen = 1;
    }

    /// Binary foreground mask for `gray`, updating the background model.
    fn foreground(&mut self, gray: &GrayImage) -> Option<GrayImage> {
        if self.dims != gray.dimensions() || self.background.is_empty() {
            debug!("seeding background model at {:?}", gray.dimensions());
            self.seed(gray);
            return None;
        }

        self.frames_seen = self.frames_seen.saturating_add(1);
        let rate = 1.0 / self.frames_seen.min(self.config.history.max(1)) as f32;
        let threshold = self.config.diff_threshold as f32;

        let (width, height) = self.dims;
        let mut mask = GrayImage::new(width, height);
        for ((mask_px, &p), bg) in mask
            .pixels_mut()
            .zip(gray.as_raw().iter())
            .zip(self.background.iter_mut())
        {
            let p = p as f32;
            if (p - *bg).abs() > threshold {
                *mask_px = Luma([255]);
            }
            *bg += rate * (p - *bg);
        }
        Some(mask)
    }
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl Detector for MotionDetector {
    type Error = Infallible;

    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Self::Error> {
        let gray = image::imageops::grayscale(frame);
        let Some(mut mask) = self.foreground(&gray) else {
            return Ok(Vec::new());
        };
        if self.config.dilate_iter > 0 {
            mask = dilate(&mask, Norm::LInf, self.config.dilate_iter);
        }

        let mut detections = Vec::new();
        for contour in find_contours::<i32>(&mask) {
            if contour.border_type != BorderType::Outer || contour.parent.is_some() {
                continue;
            }
            let Some((x1, y1, x2, y2)) = contour.points.iter().fold(None, |acc, p| match acc {
                None => Some((p.x, p.y, p.x, p.y)),
                Some((x1, y1, x2, y2)) => Some((x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y))),
            }) else {
                continue;
            };

            let det = DetectionBuilder::new()
                .tlbr(x1, y1, x2 + 1, y2 + 1)
                .score(1.0)
                .label(MOTION_LABEL)
                .build();
            if det.bbox.area() < self.config.min_area as i64 {
                continue;
            }
            detections.push(det);
        }
        Ok(detections)
    }
}
