use crate::{ImageError, PixelGrid};
use crates_image::{ImageBuffer, Pixel, Rgb, Rgba, imageops};

/// Clockwise rotation that turns a sensor frame upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, negative values included.
    pub fn from_degrees(degrees: i32) -> Result<Self, ImageError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ImageError::UnsupportedRotation(degrees)),
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True when the rotation swaps width and height.
    pub fn is_transposing(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

fn rotate_buffer<P>(
    width: usize,
    height: usize,
    data: Vec<u8>,
    rotation: Rotation,
) -> Result<PixelGrid, ImageError>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let buffer = ImageBuffer::<P, Vec<u8>>::from_raw(width as u32, height as u32, data)
        .ok_or(ImageError::InvalidDimensions { width, height })?;
    let rotated = match rotation {
        Rotation::Deg0 => buffer,
        Rotation::Deg90 => imageops::rotate90(&buffer),
        Rotation::Deg180 => imageops::rotate180(&buffer),
        Rotation::Deg270 => imageops::rotate270(&buffer),
    };
    let (w, h) = rotated.dimensions();
    PixelGrid::new(
        w as usize,
        h as usize,
        P::CHANNEL_COUNT as usize,
        rotated.into_raw(),
    )
}

/// Rotates a grid clockwise by `rotation`.
pub fn rotate(grid: &PixelGrid, rotation: Rotation) -> Result<PixelGrid, ImageError> {
    if rotation == Rotation::Deg0 {
        return Ok(grid.clone());
    }
    let (width, height) = (grid.width(), grid.height());
    let data = grid.data().to_vec();
    match grid.channels() {
        3 => rotate_buffer::<Rgb<u8>>(width, height, data, rotation),
        4 => rotate_buffer::<Rgba<u8>>(width, height, data, rotation),
        other => Err(ImageError::UnsupportedChannels(other)),
    }
}

/// A frame as delivered by a camera, with the rotation the device reported.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFrame {
    pub pixels: PixelGrid,
    pub rotation: Rotation,
}

impl CameraFrame {
    pub fn new(pixels: PixelGrid, rotation: Rotation) -> Self {
        Self { pixels, rotation }
    }

    /// Pixels with the rotation applied.
    pub fn upright(&self) -> Result<PixelGrid, ImageError> {
        rotate(&self.pixels, self.rotation)
    }
}
