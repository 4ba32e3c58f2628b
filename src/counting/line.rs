use nalgebra::Point2;

/// Oriented counting line from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub a: Point2<i32>,
    pub b: Point2<i32>,
}

impl Line {
    pub fn new(a: Point2<i32>, b: Point2<i32>) -> Self {
        Self { a, b }
    }

    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Twice the signed area of the triangle (a, b, p).
    #[inline]
    pub fn cross(&self, p: &Point2<i32>) -> i64 {
        let (ax, ay) = (self.a.x as i64, self.a.y as i64);
        let (bx, by) = (self.b.x as i64, self.b.y as i64);
        let (px, py) = (p.x as i64, p.y as i64);
        (bx - ax) * (py - ay) - (by - ay) * (px - ax)
    }

    /// `true` when `p` lies strictly on the positive side of the line.
    ///
    /// Points exactly on the line report `false`.
    #[inline]
    pub fn side(&self, p: &Point2<i32>) -> bool {
        self.cross(p) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_line_sides() {
        // Pointing down in image coordinates: the right half-plane is negative.
        let line = Line::from_coords(400, 100, 400, 600);
        assert!(line.side(&Point2::new(100, 300)));
        assert!(!line.side(&Point2::new(700, 300)));
    }

    #[test]
    fn test_on_line_is_false() {
        let line = Line::from_coords(400, 100, 400, 600);
        assert_eq!(line.cross(&Point2::new(400, 350)), 0);
        assert!(!line.side(&Point2::new(400, 350)));
        // Collinear beyond the segment end is still on the line.
        assert!(!line.side(&Point2::new(400, 1000)));
    }

    #[test]
    fn test_orientation_flips_side() {
        let forward = Line::from_coords(0, 0, 10, 0);
        let backward = Line::from_coords(10, 0, 0, 0);
        let p = Point2::new(5, 5);
        assert!(forward.side(&p));
        assert!(!backward.side(&p));
    }

    #[test]
    fn test_large_coordinates_do_not_overflow() {
        let line = Line::from_coords(-2_000_000_000, 0, 2_000_000_000, 1);
        assert!(line.side(&Point2::new(0, 2_000_000_000)));
    }
}
