use crate::{ImageError, PixelGrid};
use crates_image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};

/// Decodes a JPEG or PNG frame into an RGB grid. Alpha is discarded.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_image(data: &[u8]) -> Result<PixelGrid, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelGrid::new(width as usize, height as usize, 3, rgb.into_raw())
}

/// Encodes a grid as PNG, keeping the alpha channel of RGBA overlays.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>, ImageError> {
    if grid.is_empty() {
        return Err(ImageError::InvalidDimensions {
            width: grid.width(),
            height: grid.height(),
        });
    }
    let color_type = if grid.has_alpha() {
        ExtendedColorType::Rgba8
    } else {
        ExtendedColorType::Rgb8
    };
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            grid.data(),
            grid.width() as u32,
            grid.height() as u32,
            color_type,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}
