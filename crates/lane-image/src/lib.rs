//! Pixel buffers for the lane pipeline.
//!
//! Every image is a [`PixelGrid`]: an 8-bit HWC tensor `[height, width, channels]`
//! with 3 (RGB) or 4 (RGBA) channels. This crate converts camera-native layouts
//! into grids, rotates them upright, resizes them, and decodes or encodes them
//! through the `image` crate.

pub mod codec;
pub mod convert;
pub mod error;
pub mod frame;
pub mod pixelgrid;
pub mod resize;

pub use codec::{decode_image, encode_png};
pub use convert::{nv21_to_rgb, yuyv_to_rgb};
pub use error::ImageError;
pub use frame::{CameraFrame, Rotation, rotate};
pub use pixelgrid::PixelGrid;
pub use resize::resize_bilinear;
