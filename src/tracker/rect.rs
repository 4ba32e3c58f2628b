use nalgebra::Point2;

/// Integer bounding box in pixel coordinates.
///
/// Stored as TLWH (top-left x, top-left y, width, height). The corner pair
/// and the center point are derived on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Create a Rect centered on `(cx, cy)`.
    ///
    /// The top-left corner is placed so that [`Rect::center`] returns
    /// `(cx, cy)` again.
    #[inline]
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self {
            x: cx - width.div_euclid(2),
            y: cy - height.div_euclid(2),
            width,
            height,
        }
    }

    /// Convert to corner format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_xyxy(&self) -> [i32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Center point, rounded down to the pixel grid.
    #[inline]
    pub fn center(&self) -> Point2<i32> {
        Point2::new(
            self.x + self.width.div_euclid(2),
            self.y + self.height.div_euclid(2),
        )
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10, 20, 30, 40);

        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);
        assert_eq!(rect.to_xyxy(), [10, 20, 40, 60]);
        assert_eq!(rect.area(), 1200);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10, 20, 40, 60);
        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_center_rounds_down() {
        let rect = Rect::new(0, 0, 5, 7);
        assert_eq!(rect.center(), Point2::new(2, 3));

        let rect = Rect::new(-10, -10, 3, 3);
        assert_eq!(rect.center(), Point2::new(-9, -9));
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center(100, 50, 40, 20);
        assert_eq!(rect.to_tlwh(), [80, 40, 40, 20]);
        assert_eq!(rect.center(), Point2::new(100, 50));

        let odd = Rect::from_center(100, 50, 41, 21);
        assert_eq!(odd.center(), Point2::new(100, 50));
    }
}
