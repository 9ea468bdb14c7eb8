use crate::display::domain::gaze_label::GazeLabel;
use crate::shared::frame::Frame;

/// Where annotated frames go.
///
/// Implementations own the rendering of labels onto the frame, so the
/// monitor loop never touches pixels.
pub trait DisplaySurface {
    /// Presents the colour frame with its labels, drawn in order.
    fn show(&mut self, frame: &Frame, labels: &[GazeLabel])
        -> Result<(), Box<dyn std::error::Error>>;

    /// Waits briefly for a key press. `None` when no key was pressed.
    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>>;

    /// Closes every window this surface opened.
    fn close(&mut self);
}
