/// A detected face's bounding box in frame pixel coordinates.
///
/// Produced by a [`FaceDetector`](crate::detection::domain::face_detector::FaceDetector)
/// and only used to ask the landmark predictor where to look.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32, confidence: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Builds a region from `[x1, y1, x2, y2]` float corners, rounding outward
    /// so the box never shrinks below the detector's estimate.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> Self {
        let left = x1.floor() as i32;
        let top = y1.floor() as i32;
        let right = x2.ceil() as i32;
        let bottom = y2.ceil() as i32;
        Self {
            x: left,
            y: top,
            width: (right - left).max(0),
            height: (bottom - top).max(0),
            confidence,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Square crop centred on this region with side `max(width, height)`,
    /// shifted (and if necessary shrunk) to lie fully inside the frame.
    ///
    /// Returns `None` for empty regions or empty frames.
    pub fn square_crop(&self, frame_width: u32, frame_height: u32) -> Option<Region> {
        if self.is_empty() || frame_width == 0 || frame_height == 0 {
            return None;
        }
        let fw = frame_width as i32;
        let fh = frame_height as i32;
        let side = self.width.max(self.height).min(fw).min(fh);

        let (cx, cy) = self.center();
        let half = side as f64 / 2.0;
        let x = ((cx - half).round() as i32).clamp(0, fw - side);
        let y = ((cy - half).round() as i32).clamp(0, fh - side);

        Some(Region {
            x,
            y,
            width: side,
            height: side,
            confidence: self.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region::new(x, y, w, h, 0.9)
    }

    #[test]
    fn test_from_corners_rounds_outward() {
        let r = Region::from_corners(10.4, 20.6, 50.2, 80.1, 0.8);
        assert_eq!(r, Region::new(10, 20, 41, 61, 0.8));
    }

    #[test]
    fn test_from_corners_inverted_is_empty() {
        let r = Region::from_corners(50.0, 50.0, 10.0, 10.0, 0.5);
        assert!(r.is_empty());
    }

    #[test]
    fn test_center() {
        let (cx, cy) = region(100, 50, 40, 20).center();
        assert_relative_eq!(cx, 120.0);
        assert_relative_eq!(cy, 60.0);
    }

    #[test]
    fn test_square_crop_interior_uses_longer_side() {
        // Centre (120, 100), side 80 → top-left (80, 60).
        let crop = region(100, 60, 40, 80).square_crop(640, 480).unwrap();
        assert_eq!((crop.x, crop.y, crop.width, crop.height), (80, 60, 80, 80));
    }

    #[test]
    fn test_square_crop_shifts_inside_left_top_edges() {
        let crop = region(-20, -10, 60, 100).square_crop(640, 480).unwrap();
        assert_eq!((crop.x, crop.y, crop.width, crop.height), (0, 0, 100, 100));
    }

    #[test]
    fn test_square_crop_shifts_inside_right_bottom_edges() {
        let crop = region(600, 450, 80, 60).square_crop(640, 480).unwrap();
        assert_eq!((crop.x, crop.y, crop.width, crop.height), (560, 400, 80, 80));
    }

    #[test]
    fn test_square_crop_shrinks_to_frame() {
        let crop = region(0, 0, 300, 300).square_crop(200, 100).unwrap();
        assert_eq!((crop.x, crop.y, crop.width, crop.height), (100, 0, 100, 100));
    }

    #[rstest]
    #[case::zero_width(region(10, 10, 0, 20), 640, 480)]
    #[case::zero_height(region(10, 10, 20, 0), 640, 480)]
    #[case::empty_frame(region(10, 10, 20, 20), 0, 480)]
    fn test_square_crop_degenerate(#[case] r: Region, #[case] fw: u32, #[case] fh: u32) {
        assert!(r.square_crop(fw, fh).is_none());
    }

    #[test]
    fn test_square_crop_keeps_confidence() {
        let crop = region(10, 10, 20, 30).square_crop(100, 100).unwrap();
        assert_relative_eq!(crop.confidence, 0.9);
    }
}
