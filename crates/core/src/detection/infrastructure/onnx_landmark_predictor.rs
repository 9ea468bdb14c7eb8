//! 68-point facial landmark predictor using ONNX Runtime via `ort`.
//!
//! Crops a square around the detected face, resizes it to the model's input
//! resolution and maps the model's crop-normalised `[0, 1]` coordinates back
//! into frame pixels. Pixel values are fed unnormalised (0–255), the
//! convention of the common 68-point landmark exports.

use std::path::Path;

use thiserror::Error;

use crate::detection::domain::face_shape::{FaceShape, NUM_LANDMARKS};
use crate::detection::domain::landmark_predictor::LandmarkPredictor;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::execution_provider::load_session;

/// Fallback input resolution when the model's shape is dynamic.
const DEFAULT_INPUT_SIZE: u32 = 128;

#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("face region {0:?} does not overlap the frame")]
    EmptyRegion(Region),
    #[error("landmark model returned {0} values, expected {expected}", expected = NUM_LANDMARKS * 2)]
    UnexpectedOutput(usize),
}

/// Memory layout of the model's image input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputLayout {
    /// `[1, 3, H, W]`
    Nchw,
    /// `[1, H, W, 3]`
    Nhwc,
}

pub struct OnnxLandmarkPredictor {
    session: ort::session::Session,
    input_size: u32,
    layout: InputLayout,
}

impl OnnxLandmarkPredictor {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;

        let dims: Option<Vec<i64>> = session.inputs().first().and_then(|input| {
            if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                Some(shape.iter().copied().collect())
            } else {
                None
            }
        });
        let (layout, input_size) = dims
            .as_deref()
            .map(infer_layout)
            .unwrap_or((InputLayout::Nhwc, DEFAULT_INPUT_SIZE));

        log::debug!(
            "Loaded landmark model {} ({layout:?}, input {input_size}x{input_size})",
            model_path.display()
        );

        Ok(Self {
            session,
            input_size,
            layout,
        })
    }
}

impl LandmarkPredictor for OnnxLandmarkPredictor {
    fn predict(
        &mut self,
        frame: &Frame,
        region: &Region,
    ) -> Result<FaceShape, Box<dyn std::error::Error>> {
        let crop = region
            .square_crop(frame.width(), frame.height())
            .ok_or_else(|| LandmarkError::EmptyRegion(region.clone()))?;

        let input_tensor = crop_tensor(frame, &crop, self.input_size, self.layout);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err(LandmarkError::UnexpectedOutput(0).into());
        }
        let marks = outputs[0].try_extract_array::<f32>()?;
        let values = marks.as_slice().ok_or("Cannot get landmark slice")?;

        Ok(to_frame_coordinates(values, &crop)?)
    }
}

/// Reads layout and square input size from a model input shape.
///
/// A dimension equal to 3 directly after the batch axis marks NCHW.
fn infer_layout(dims: &[i64]) -> (InputLayout, u32) {
    let size_at = |i: usize| {
        dims.get(i)
            .copied()
            .filter(|d| *d > 0)
            .map(|d| d as u32)
            .unwrap_or(DEFAULT_INPUT_SIZE)
    };
    if dims.len() == 4 && dims[1] == 3 {
        (InputLayout::Nchw, size_at(2))
    } else {
        (InputLayout::Nhwc, size_at(1))
    }
}

/// Nearest-neighbour resample of `crop` into a `size` × `size` float tensor.
///
/// Single-channel frames are replicated into all three input channels.
fn crop_tensor(frame: &Frame, crop: &Region, size: u32, layout: InputLayout) -> ndarray::Array4<f32> {
    let size = size as usize;
    let mut tensor = match layout {
        InputLayout::Nchw => ndarray::Array4::<f32>::zeros((1, 3, size, size)),
        InputLayout::Nhwc => ndarray::Array4::<f32>::zeros((1, size, size, 3)),
    };

    let src = frame.as_ndarray();
    let last_channel = frame.channels() as usize - 1;
    let step = crop.width as f64 / size as f64;

    for y in 0..size {
        let src_y = crop.y as usize + ((y as f64 * step) as usize).min(crop.height as usize - 1);
        for x in 0..size {
            let src_x = crop.x as usize + ((x as f64 * step) as usize).min(crop.width as usize - 1);
            for c in 0..3 {
                let value = src[[src_y, src_x, c.min(last_channel)]] as f32;
                match layout {
                    InputLayout::Nchw => tensor[[0, c, y, x]] = value,
                    InputLayout::Nhwc => tensor[[0, y, x, c]] = value,
                }
            }
        }
    }
    tensor
}

/// Maps crop-normalised interleaved marks to whole frame pixels.
fn to_frame_coordinates(values: &[f32], crop: &Region) -> Result<FaceShape, LandmarkError> {
    if values.len() != NUM_LANDMARKS * 2 {
        return Err(LandmarkError::UnexpectedOutput(values.len()));
    }
    let coords: Vec<f64> = values
        .chunks_exact(2)
        .flat_map(|m| {
            [
                (crop.x as f64 + m[0] as f64 * crop.width as f64).round(),
                (crop.y as f64 + m[1] as f64 * crop.height as f64).round(),
            ]
        })
        .collect();
    FaceShape::from_interleaved(&coords).ok_or(LandmarkError::UnexpectedOutput(values.len()))
}
