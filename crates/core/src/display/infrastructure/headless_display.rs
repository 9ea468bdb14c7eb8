use crate::display::domain::display_surface::DisplaySurface;
use crate::display::domain::gaze_label::GazeLabel;
use crate::shared::frame::Frame;

/// Display that logs each frame's labels instead of opening a window.
///
/// Never reports a key press; the loop ends with the stream.
#[derive(Default)]
pub struct HeadlessDisplay {
    frames_shown: usize,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_shown(&self) -> usize {
        self.frames_shown
    }
}

impl DisplaySurface for HeadlessDisplay {
    fn show(
        &mut self,
        frame: &Frame,
        labels: &[GazeLabel],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.frames_shown += 1;
        if labels.is_empty() {
            log::debug!("Frame {}: no faces", frame.index());
        }
        for label in labels {
            log::info!("Frame {}: {}", frame.index(), label.text);
        }
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>> {
        Ok(None)
    }

    fn close(&mut self) {
        log::debug!("Headless display closed after {} frames", self.frames_shown());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_frames_and_never_reports_keys() {
        let mut display = HeadlessDisplay::new();
        let frame = Frame::new(vec![0; 3], 1, 1, 3, 0);

        display.show(&frame, &[]).unwrap();
        display
            .show(&frame, &[GazeLabel::for_decision(true)])
            .unwrap();

        assert_eq!(display.frames_shown(), 2);
        assert_eq!(display.poll_key().unwrap(), None);
        display.close();
    }
}
