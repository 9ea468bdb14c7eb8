use crate::detection::domain::face_shape::{FaceShape, LEFT_EYE_OUTER, RIGHT_EYE_OUTER};
use crate::gaze::domain::gaze_estimator::{facing_angle, is_facing_camera, GazeThreshold};
use crate::shared::point::Point2D;

/// Outer eye corners of one face in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeLandmarks {
    pub left: Point2D,
    pub right: Point2D,
}

impl EyeLandmarks {
    pub fn new(left: Point2D, right: Point2D) -> Self {
        Self { left, right }
    }

    pub fn from_shape(shape: &FaceShape) -> Self {
        Self::new(shape.part(LEFT_EYE_OUTER), shape.part(RIGHT_EYE_OUTER))
    }

    pub fn facing_angle(&self) -> f64 {
        facing_angle(&self.left, &self.right)
    }

    pub fn is_facing_camera(&self, threshold: GazeThreshold) -> bool {
        is_facing_camera(&self.left, &self.right, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_shape::NUM_LANDMARKS;
    use approx::assert_relative_eq;

    fn shape_with_eyes(left: (f64, f64), right: (f64, f64)) -> FaceShape {
        let mut pts = [Point2D::new(1.0, 1.0); NUM_LANDMARKS];
        pts[LEFT_EYE_OUTER] = left.into();
        pts[RIGHT_EYE_OUTER] = right.into();
        FaceShape::new(pts)
    }

    #[test]
    fn test_from_shape_takes_outer_corners() {
        let eyes = EyeLandmarks::from_shape(&shape_with_eyes((210.0, 300.0), (330.0, 302.0)));
        assert_eq!(eyes.left, Point2D::new(210.0, 300.0));
        assert_eq!(eyes.right, Point2D::new(330.0, 302.0));
        assert_eq!(
            eyes,
            EyeLandmarks::new(Point2D::new(210.0, 300.0), Point2D::new(330.0, 302.0))
        );
    }

    #[test]
    fn test_level_eyes_face_camera() {
        let eyes = EyeLandmarks::from_shape(&shape_with_eyes((200.0, 300.0), (320.0, 300.0)));
        assert_relative_eq!(eyes.facing_angle(), 0.0, epsilon = 1e-9);
        assert!(eyes.is_facing_camera(GazeThreshold::default()));
    }

    #[test]
    fn test_other_landmarks_are_ignored() {
        let mut pts = [Point2D::new(999.0, -999.0); NUM_LANDMARKS];
        pts[LEFT_EYE_OUTER] = Point2D::new(0.0, 0.0);
        pts[RIGHT_EYE_OUTER] = Point2D::new(1.0, 2.0);
        let eyes = EyeLandmarks::from_shape(&FaceShape::new(pts));
        assert!(!eyes.is_facing_camera(GazeThreshold::default()));
    }
}
