//! 68-point facial landmarks in the iBUG 300-W numbering.
//!
//! Indices 36..=41 outline the subject's right eye as seen in the image's
//! left half and 42..=47 the other eye; 36 and 45 are the outer corners.

use crate::shared::point::Point2D;

pub const NUM_LANDMARKS: usize = 68;

/// Outer corner of the eye on the image's left side.
pub const LEFT_EYE_OUTER: usize = 36;

/// Outer corner of the eye on the image's right side.
pub const RIGHT_EYE_OUTER: usize = 45;

#[derive(Clone, Debug, PartialEq)]
pub struct FaceShape {
    points: [Point2D; NUM_LANDMARKS],
}

impl FaceShape {
    pub fn new(points: [Point2D; NUM_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Builds a shape from interleaved `[x0, y0, x1, y1, ...]` coordinates.
    ///
    /// Returns `None` unless exactly 68 pairs are supplied.
    pub fn from_interleaved(coords: &[f64]) -> Option<Self> {
        if coords.len() != NUM_LANDMARKS * 2 {
            return None;
        }
        let mut points = [Point2D::default(); NUM_LANDMARKS];
        for (point, pair) in points.iter_mut().zip(coords.chunks_exact(2)) {
            *point = Point2D::new(pair[0], pair[1]);
        }
        Some(Self { points })
    }

    /// Landmark by index. Panics if `index >= 68`.
    pub fn part(&self, index: usize) -> Point2D {
        self.points[index]
    }
}
