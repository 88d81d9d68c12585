use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    InvalidDimensions { width: usize, height: usize },
    UnsupportedChannels(usize),
    UnsupportedRotation(i32),
    Decode(String),
    Encode(String),
    Tensor(lane_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            ImageError::UnsupportedChannels(channels) => {
                write!(f, "unsupported channel count: {channels}")
            }
            ImageError::UnsupportedRotation(degrees) => {
                write!(f, "unsupported rotation: {degrees} degrees")
            }
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<lane_base::TensorError> for ImageError {
    fn from(err: lane_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
