use crate::ImageError;
use lane_base::Tensor;

/// 8-bit RGB or RGBA image stored as an HWC tensor `[height, width, channels]`.
///
/// The shape is fixed at construction and always matches the data length.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    tensor: Tensor<u8>,
}

impl PixelGrid {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        Self::from_tensor(Tensor::new(vec![height, width, channels], data)?)
    }

    /// Wraps an HWC tensor. Only 3 (RGB) and 4 (RGBA) channels are accepted.
    pub fn from_tensor(tensor: Tensor<u8>) -> Result<Self, ImageError> {
        if tensor.ndim() != 3 {
            return Err(ImageError::Tensor(lane_base::TensorError::DimsMismatch {
                expected: vec![0, 0, 3],
                got: tensor.shape.clone(),
            }));
        }
        let channels = tensor.shape[2];
        if channels != 3 && channels != 4 {
            return Err(ImageError::UnsupportedChannels(channels));
        }
        Ok(Self { tensor })
    }

    /// Every pixel set to `pixel`, whose length selects RGB or RGBA.
    pub fn filled(width: usize, height: usize, pixel: &[u8]) -> Result<Self, ImageError> {
        let data = pixel.repeat(width * height);
        Self::new(width, height, pixel.len(), data)
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[0]
    }

    pub fn channels(&self) -> usize {
        self.tensor.shape[2]
    }

    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.tensor.data
    }

    pub fn tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }

    /// Samples of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let channels = self.channels();
        let start = (y * self.width() + x) * channels;
        &self.tensor.data[start..start + channels]
    }

    /// Copy without the alpha channel. RGB grids are cloned as is.
    pub fn to_rgb(&self) -> PixelGrid {
        if !self.has_alpha() {
            return self.clone();
        }
        let data = self
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        PixelGrid {
            tensor: Tensor {
                shape: vec![self.height(), self.width(), 3],
                data,
            },
        }
    }
}
