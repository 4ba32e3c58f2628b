//! Trait for object detection backends.

use crate::Frame;
use crate::tracker::Detection;

/// Trait for object detection backends.
///
/// Implement this trait to feed any detector into the pipeline.
///
/// # Example
///
/// ```
/// use roadwatch::{Detection, Detector, Frame, Rect};
///
/// struct FixedDetector;
///
/// impl Detector for FixedDetector {
///     type Error = std::convert::Infallible;
///
///     fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Self::Error> {
///         Ok(vec![Detection::new(Rect::new(10, 10, 40, 20), 1.0)])
///     }
/// }
/// ```
pub trait Detector {
    /// Error type for detection failures.
    type Error: std::fmt::Display;

    /// One-time preparation before the first frame. Calling it again must
    /// have no further effect.
    fn warmup(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Run detection on one frame and return one consistent snapshot of
    /// detections.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Self::Error>;
}
