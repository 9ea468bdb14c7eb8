use opencv::core::{Mat, CV_8UC3};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH};
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not open capture device {0}")]
    DeviceUnavailable(i32),
    #[error("unsupported capture format: expected 8-bit BGR, got type {0}")]
    UnsupportedFormat(i32),
}

/// Webcam source backed by OpenCV's `VideoCapture`.
pub struct OpenCvCamera {
    capture: VideoCapture,
    index: i32,
    frame_index: usize,
}

impl OpenCvCamera {
    pub fn open(index: i32) -> Result<Self, Box<dyn std::error::Error>> {
        log::info!("Opening camera {index}");
        let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CaptureError::DeviceUnavailable(index).into());
        }
        Ok(Self {
            capture,
            index,
            frame_index: 0,
        })
    }
}

impl FrameSource for OpenCvCamera {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        let width_ok = self.capture.set(CAP_PROP_FRAME_WIDTH, width as f64)?;
        let height_ok = self.capture.set(CAP_PROP_FRAME_HEIGHT, height as f64)?;
        if !(width_ok && height_ok) {
            return Err(format!("camera {} rejected resolution {width}x{height}", self.index).into());
        }
        Ok(())
    }

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let mut mat = Mat::default();
        if !self.capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        if mat.typ() != CV_8UC3 {
            return Err(CaptureError::UnsupportedFormat(mat.typ()).into());
        }
        // Camera frames are usually continuous; clone to compact when not.
        let mat = if mat.is_continuous() { mat } else { mat.try_clone()? };

        let frame = Frame::new(
            bgr_to_rgb(mat.data_bytes()?),
            mat.cols() as u32,
            mat.rows() as u32,
            3,
            self.frame_index,
        );
        self.frame_index += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera {}: {e}", self.index);
        }
    }
}

/// Swaps the first and third byte of every 3-byte pixel.
///
/// The swap is its own inverse, so it converts BGR to RGB and back.
pub(crate) fn bgr_to_rgb(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    out
}
