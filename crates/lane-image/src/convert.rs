//! Camera-native pixel layouts to packed RGB.

use crate::{ImageError, PixelGrid};

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b]
}

fn check_len(format: &str, data: &[u8], expected: usize) -> Result<(), ImageError> {
    if data.len() < expected {
        return Err(ImageError::Decode(format!(
            "{format} buffer too short: expected {expected} bytes, got {}",
            data.len()
        )));
    }
    Ok(())
}

/// Converts an NV21 frame (Android camera default) to RGB.
///
/// Layout: a full-resolution Y plane followed by one interleaved `V, U` plane
/// at half resolution in both directions (rounded up for odd sizes).
pub fn nv21_to_rgb(data: &[u8], width: usize, height: usize) -> Result<PixelGrid, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    let y_len = width * height;
    let chroma_w = width.div_ceil(2);
    let chroma_h = height.div_ceil(2);
    check_len("NV21", data, y_len + chroma_w * chroma_h * 2)?;

    let (y_plane, vu_plane) = data.split_at(y_len);
    let mut rgb = Vec::with_capacity(y_len * 3);
    for row in 0..height {
        let vu_row = (row / 2) * chroma_w * 2;
        for col in 0..width {
            let vu = vu_row + (col / 2) * 2;
            let luma = y_plane[row * width + col];
            rgb.extend_from_slice(&yuv_to_rgb(luma, vu_plane[vu + 1], vu_plane[vu]));
        }
    }
    PixelGrid::new(width, height, 3, rgb)
}

/// Converts packed YUYV 4:2:2 (`Y0 U Y1 V`) to RGB. Width must be even.
pub fn yuyv_to_rgb(data: &[u8], width: usize, height: usize) -> Result<PixelGrid, ImageError> {
    if width == 0 || height == 0 || width % 2 != 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    let expected = width * height * 2;
    check_len("YUYV", data, expected)?;

    let mut rgb = Vec::with_capacity(width * height * 3);
    for chunk in data[..expected].chunks_exact(4) {
        rgb.extend_from_slice(&yuv_to_rgb(chunk[0], chunk[1], chunk[3]));
        rgb.extend_from_slice(&yuv_to_rgb(chunk[2], chunk[1], chunk[3]));
    }
    PixelGrid::new(width, height, 3, rgb)
}
