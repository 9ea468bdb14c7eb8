use crate::detection::domain::face_shape::FaceShape;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for 68-point landmark prediction.
///
/// Given the luminance frame and one detected region, returns the face's
/// landmarks in frame pixel coordinates.
pub trait LandmarkPredictor: Send {
    fn predict(
        &mut self,
        frame: &Frame,
        region: &Region,
    ) -> Result<FaceShape, Box<dyn std::error::Error>>;
}
