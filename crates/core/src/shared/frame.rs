use ndarray::ArrayView3;

/// ITU-R BT.601 luma weights for R, G, B.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// One captured frame: contiguous bytes in row-major order.
///
/// Colour frames are RGB (3 channels); luminance frames have 1 channel.
/// Adapters convert from their native layout (e.g. OpenCV's BGR) on the way
/// in and back on the way out.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Single-channel luminance copy of this frame.
    ///
    /// Already-single-channel frames are cloned unchanged.
    pub fn to_luma(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let stride = self.channels as usize;
        let luma = self
            .data
            .chunks_exact(stride)
            .map(|px| {
                let y = LUMA_WEIGHTS[0] * px[0] as f32
                    + LUMA_WEIGHTS[1] * px[1] as f32
                    + LUMA_WEIGHTS[2] * px[2] as f32;
                y.round().min(255.0) as u8
            })
            .collect();
        Frame::new(luma, self.width, self.height, 1, self.index)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
