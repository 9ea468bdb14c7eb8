/// A 2D image-space coordinate in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise average rounded down to whole pixels.
    ///
    /// Landmark coordinates are pixel positions, so the midpoint stays on
    /// the integer grid even when the exact average falls between pixels.
    pub fn pixel_midpoint(&self, other: &Point2D) -> Point2D {
        Point2D {
            x: ((self.x + other.x) / 2.0).floor(),
            y: ((self.y + other.y) / 2.0).floor(),
        }
    }

    /// Vector from `origin` to `self`.
    pub fn minus(&self, origin: &Point2D) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
