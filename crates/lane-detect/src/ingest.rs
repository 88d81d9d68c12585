use crate::LaneError;
use lane_base::Tensor;
use lane_image::{PixelGrid, resize_bilinear};

/// Model input width in pixels.
pub const INPUT_WIDTH: usize = 320;
/// Model input height in pixels.
pub const INPUT_HEIGHT: usize = 256;

/// Stretches an upright RGB(A) frame to exactly `width` x `height` RGB.
///
/// Uses bilinear filtering and never crops, so the aspect ratio follows the
/// target. A frame already at the target size comes back unchanged.
pub fn ingest(source: &PixelGrid, width: usize, height: usize) -> Result<PixelGrid, LaneError> {
    if source.is_empty() {
        return Err(LaneError::InvalidInput(format!(
            "source frame is empty ({}x{})",
            source.width(),
            source.height()
        )));
    }
    if width == 0 || height == 0 {
        return Err(LaneError::InvalidInput(format!(
            "target size is empty ({width}x{height})"
        )));
    }
    Ok(resize_bilinear(&source.to_rgb(), width, height)?)
}

/// Marshals an RGB grid into the `[1, H, W, 3]` model tensor.
///
/// Samples stay raw 0-255 magnitudes; the model was trained on unnormalized input.
pub fn to_tensor(grid: &PixelGrid) -> Result<Tensor<f32>, LaneError> {
    if grid.channels() != 3 {
        return Err(LaneError::InvalidInput(format!(
            "model input needs 3 channels, got {}",
            grid.channels()
        )));
    }
    let data = grid.data().iter().map(|&v| v as f32).collect();
    Ok(Tensor::new(vec![1, grid.height(), grid.width(), 3], data)?)
}
