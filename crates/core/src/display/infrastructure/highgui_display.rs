use opencv::core::{Mat, Point, Scalar, CV_8UC3};
use opencv::highgui;
use opencv::imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8};
use opencv::prelude::*;

use crate::display::domain::display_surface::DisplaySurface;
use crate::display::domain::gaze_label::GazeLabel;
use crate::shared::constants::{KEY_POLL_MS, WINDOW_TITLE};
use crate::shared::frame::Frame;

const FONT_SCALE: f64 = 1.0;
const FONT_THICKNESS: i32 = 2;

/// OpenCV HighGUI window.
pub struct HighguiDisplay {
    title: String,
    open: bool,
}

impl HighguiDisplay {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        highgui::named_window(WINDOW_TITLE, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            title: WINDOW_TITLE.to_string(),
            open: true,
        })
    }
}

impl DisplaySurface for HighguiDisplay {
    fn show(
        &mut self,
        frame: &Frame,
        labels: &[GazeLabel],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut mat = Mat::new_rows_cols_with_default(
            frame.height() as i32,
            frame.width() as i32,
            CV_8UC3,
            Scalar::all(0.0),
        )?;
        mat.data_bytes_mut()?.copy_from_slice(&to_bgr(frame));

        for label in labels {
            let [r, g, b] = label.color;
            imgproc::put_text(
                &mut mat,
                label.text,
                Point::new(label.position.0, label.position.1),
                FONT_HERSHEY_SIMPLEX,
                FONT_SCALE,
                Scalar::new(b as f64, g as f64, r as f64, 0.0),
                FONT_THICKNESS,
                LINE_8,
                false,
            )?;
        }

        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>> {
        Ok(key_from_code(highgui::wait_key(KEY_POLL_MS)?))
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close display windows: {e}");
        }
    }
}

/// Packs a frame as BGR, expanding luminance frames to three channels.
fn to_bgr(frame: &Frame) -> Vec<u8> {
    match frame.channels() {
        1 => frame.data().iter().flat_map(|&v| [v, v, v]).collect(),
        _ => frame
            .data()
            .chunks_exact(frame.channels() as usize)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect(),
    }
}

/// Maps a `wait_key` result to a character. Negative codes mean no key.
fn key_from_code(code: i32) -> Option<char> {
    if code < 0 {
        return None;
    }
    Some(char::from((code & 0xFF) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_to_bgr_swaps_rgb() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 2, 1, 3, 0);
        assert_eq!(to_bgr(&frame), vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_to_bgr_expands_luma() {
        let frame = Frame::new(vec![7, 9], 2, 1, 1, 0);
        assert_eq!(to_bgr(&frame), vec![7, 7, 7, 9, 9, 9]);
    }

    #[rstest]
    #[case::no_key(-1, None)]
    #[case::q(113, Some('q'))]
    #[case::escape(27, Some('\u{1b}'))]
    #[case::modifier_bits(0x10_0071, Some('q'))]
    fn test_key_from_code(#[case] code: i32, #[case] expected: Option<char>) {
        assert_eq!(key_from_code(code), expected);
    }
}
