//! Shared building blocks for the lane pipeline crates.

pub mod logging;
pub mod tensor;

pub use logging::{LaneLogger, init_file_logger, init_stdout_logger};
pub use tensor::{Tensor, TensorError, element_count};

// Re-export log crate so downstream crates can use lane_base::log::*
pub use log;
