use lane_base::TensorError;
use lane_image::ImageError;
use lane_infer::InferError;
use std::fmt;

#[derive(Debug)]
pub enum LaneError {
    /// Malformed source frame. Fatal to that frame only.
    InvalidInput(String),
    /// Model contract violated. Fatal to that frame only.
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    /// Model could not be loaded. No frames can be processed.
    ModelLoad(String),
    Inference(InferError),
    Config(String),
    Worker(String),
}

impl fmt::Display for LaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            LaneError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected:?}, got {got:?}")
            }
            LaneError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            LaneError::Inference(err) => write!(f, "inference error: {err}"),
            LaneError::Config(msg) => write!(f, "config error: {msg}"),
            LaneError::Worker(msg) => write!(f, "worker error: {msg}"),
        }
    }
}

impl std::error::Error for LaneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaneError::Inference(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ImageError> for LaneError {
    fn from(err: ImageError) -> Self {
        LaneError::InvalidInput(err.to_string())
    }
}

impl From<TensorError> for LaneError {
    fn from(err: TensorError) -> Self {
        match err {
            TensorError::DimsMismatch { expected, got } => {
                LaneError::ShapeMismatch { expected, got }
            }
            TensorError::ShapeMismatch { expected, got } => LaneError::ShapeMismatch {
                expected: vec![expected],
                got: vec![got],
            },
            TensorError::ShapeOverflow => LaneError::InvalidInput(err.to_string()),
        }
    }
}

impl From<InferError> for LaneError {
    fn from(err: InferError) -> Self {
        match err {
            InferError::ModelLoad(msg) => LaneError::ModelLoad(msg),
            other => LaneError::Inference(other),
        }
    }
}
