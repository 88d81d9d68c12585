//! Lane detection for a forward-facing camera.
//!
//! Each frame is stretched to the model input size, scored by a segmentation
//! model, thresholded into a lane mask and painted as a green overlay. The
//! mask rows just ahead of the vehicle give a weighted lane center; its offset
//! from the frame center decides whether the vehicle is centered or drifting.
//!
//! ```no_run
//! use lane_detect::{Direction, DisplaySink, LaneConfig, LanePipeline};
//! use lane_image::PixelGrid;
//!
//! struct Console;
//!
//! impl DisplaySink for Console {
//!     fn show_overlay(&mut self, _overlay: &PixelGrid) {}
//!     fn show_direction(&mut self, direction: Direction) {
//!         println!("{}", direction.label());
//!     }
//! }
//!
//! # #[cfg(feature = "onnx")]
//! # fn main() -> Result<(), lane_detect::LaneError> {
//! let backend = lane_infer::OnnxBackend::cpu();
//! let config = LaneConfig::default().with_model_path("models/lane.onnx");
//! let mut pipeline = LanePipeline::from_config(&backend, config)?;
//! let frame = PixelGrid::filled(640, 480, &[0, 0, 0])?;
//! pipeline.process_frame(&frame, &mut Console);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "onnx"))]
//! # fn main() {}
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod offset;
pub mod pipeline;
pub mod render;
pub mod segment;
pub mod throttle;
pub mod types;
pub mod worker;

pub use config::LaneConfig;
pub use error::LaneError;
pub use ingest::{INPUT_HEIGHT, INPUT_WIDTH, ingest, to_tensor};
pub use offset::{
    DEADBAND, OVERLAY_GREEN_THRESHOLD, classify, estimate, estimate_with_deadband,
    mask_from_overlay, scan_band,
};
pub use pipeline::{DisplaySink, FrameReport, LanePipeline};
pub use render::{CLEAR_RGBA, DEFAULT_THRESHOLD, LANE_RGBA, overlay, render, threshold_mask};
pub use segment::{Segmentation, SessionSegmenter, input_shape, output_shape};
pub use throttle::LabelThrottle;
pub use types::{BinaryMask, Direction, OffsetResult, ProbabilityGrid};
pub use worker::LaneWorker;
