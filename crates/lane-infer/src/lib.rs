//! Inference seam for the lane pipeline.
//!
//! Model runtimes hide behind the [`Backend`] and [`Session`] traits so the
//! numeric pipeline can be driven by a canned session in tests. The ONNX
//! Runtime backend is available with the `onnx` feature.

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod session;

pub use backend::Backend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::{DeclaredShape, Session, shape_matches};

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
