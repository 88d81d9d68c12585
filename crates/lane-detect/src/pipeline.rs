use crate::{
    BinaryMask, Direction, LabelThrottle, LaneConfig, LaneError, OffsetResult, Segmentation,
    SessionSegmenter, estimate_with_deadband, ingest, render, to_tensor,
};
use lane_image::{PixelGrid, resize_bilinear};
use lane_infer::{Backend, ModelSource};
use std::time::Instant;

/// Where the pipeline publishes its results.
///
/// A sink is only called for frames that succeeded, so a failed frame leaves
/// whatever it showed last in place.
pub trait DisplaySink {
    /// RGBA overlay at source resolution. Called for every successful frame.
    fn show_overlay(&mut self, overlay: &PixelGrid);
    /// Called at most once per label interval.
    fn show_direction(&mut self, direction: Direction);
}

/// Everything one frame produced.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Overlay upscaled to the source resolution.
    pub overlay: PixelGrid,
    /// Mask at model resolution.
    pub mask: BinaryMask,
    pub result: OffsetResult,
    pub source_width: usize,
    pub source_height: usize,
}

/// Frame in, overlay and drift direction out.
pub struct LanePipeline {
    segmenter: Box<dyn Segmentation>,
    config: LaneConfig,
    throttle: LabelThrottle,
}

impl LanePipeline {
    pub fn new(segmenter: Box<dyn Segmentation>, config: LaneConfig) -> Result<Self, LaneError> {
        config.validate()?;
        let throttle = LabelThrottle::new(config.label_interval());
        Ok(Self {
            segmenter,
            config,
            throttle,
        })
    }

    /// Loads the model through `backend` and wraps it in a [`SessionSegmenter`].
    pub fn from_model(
        backend: &dyn Backend,
        source: ModelSource,
        config: LaneConfig,
    ) -> Result<Self, LaneError> {
        config.validate()?;
        let segmenter = SessionSegmenter::load(
            backend,
            source,
            config.input_width(),
            config.input_height(),
        )?;
        Self::new(Box::new(segmenter), config)
    }

    /// Like [`LanePipeline::from_model`] with the model path from `config`.
    pub fn from_config(backend: &dyn Backend, config: LaneConfig) -> Result<Self, LaneError> {
        let path = config
            .model_path()
            .ok_or_else(|| LaneError::ModelLoad("no model_path configured".to_string()))?
            .to_path_buf();
        Self::from_model(backend, ModelSource::File(path), config)
    }

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    pub fn throttle(&self) -> &LabelThrottle {
        &self.throttle
    }

    /// Runs one upright frame through ingest, inference, rendering and offset
    /// estimation. Does not touch the label throttle.
    pub fn run_frame(&mut self, source: &PixelGrid) -> Result<FrameReport, LaneError> {
        let (width, height) = (self.config.input_width(), self.config.input_height());

        let resized = ingest(source, width, height)?;
        let tensor = to_tensor(&resized)?;
        let probabilities = self.segmenter.infer(&tensor)?;
        if probabilities.width() != width || probabilities.height() != height {
            return Err(LaneError::ShapeMismatch {
                expected: vec![height, width],
                got: vec![probabilities.height(), probabilities.width()],
            });
        }

        let (mask, overlay) = render(&probabilities, self.config.threshold())?;
        let result = estimate_with_deadband(&mask, self.config.deadband());
        let overlay = resize_bilinear(&overlay, source.width(), source.height())?;

        Ok(FrameReport {
            overlay,
            mask,
            result,
            source_width: source.width(),
            source_height: source.height(),
        })
    }

    pub fn process_frame<S>(&mut self, source: &PixelGrid, sink: &mut S) -> bool
    where
        S: DisplaySink + ?Sized,
    {
        self.process_frame_at(source, Instant::now(), sink)
    }

    /// Runs a frame and publishes it to `sink` as if it arrived at `now`.
    ///
    /// Returns false when the frame failed. The error is logged and the sink
    /// is left untouched.
    pub fn process_frame_at<S>(&mut self, source: &PixelGrid, now: Instant, sink: &mut S) -> bool
    where
        S: DisplaySink + ?Sized,
    {
        let report = match self.run_frame(source) {
            Ok(report) => report,
            Err(e) => {
                log::warn!(
                    "lane frame {}x{} dropped: {e}",
                    source.width(),
                    source.height()
                );
                return false;
            }
        };

        sink.show_overlay(&report.overlay);
        if self.throttle.is_due(now) {
            let direction = report.result.direction;
            log::debug!("direction {direction} (offset {})", report.result.offset);
            sink.show_direction(direction);
            self.throttle.record(now);
        }
        true
    }
}
