use lane_base::Tensor;
use lane_detect::{
    Direction, DisplaySink, LaneConfig, LaneError, LanePipeline, ProbabilityGrid, Segmentation,
};
use lane_image::PixelGrid;
use lane_infer::{Backend, InferError, ModelSource, Session};
use std::time::{Duration, Instant};

/// Lane probability 1.0 in `columns` on every row, 0.0 elsewhere.
struct ColumnSegmenter {
    columns: std::ops::Range<usize>,
}

impl Segmentation for ColumnSegmenter {
    fn infer(&mut self, tensor: &Tensor<f32>) -> Result<ProbabilityGrid, LaneError> {
        assert_eq!(tensor.shape, vec![1, 256, 320, 3]);
        ProbabilityGrid::from_fn(320, 256, |x, _| {
            if self.columns.contains(&x) { 1.0 } else { 0.0 }
        })
    }
}

/// Answers with a grid of the wrong size.
struct WrongSizeSegmenter;

impl Segmentation for WrongSizeSegmenter {
    fn infer(&mut self, _tensor: &Tensor<f32>) -> Result<ProbabilityGrid, LaneError> {
        ProbabilityGrid::new(10, 10, vec![1.0; 100])
    }
}

#[derive(Default)]
struct RecordingSink {
    overlays: Vec<PixelGrid>,
    directions: Vec<Direction>,
}

impl DisplaySink for RecordingSink {
    fn show_overlay(&mut self, overlay: &PixelGrid) {
        self.overlays.push(overlay.clone());
    }

    fn show_direction(&mut self, direction: Direction) {
        self.directions.push(direction);
    }
}

struct NoModelBackend;

impl Backend for NoModelBackend {
    fn name(&self) -> &str {
        "none"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        Err(InferError::ModelLoad(format!("cannot open {}", model.describe())))
    }
}

fn pipeline(columns: std::ops::Range<usize>) -> LanePipeline {
    LanePipeline::new(
        Box::new(ColumnSegmenter { columns }),
        LaneConfig::default(),
    )
    .unwrap()
}

fn frame(width: usize, height: usize) -> PixelGrid {
    PixelGrid::filled(width, height, &[90, 90, 90]).unwrap()
}

#[test]
fn test_run_frame_reports_offset() {
    let mut pipeline = pipeline(100..120);
    let report = pipeline.run_frame(&frame(320, 256)).unwrap();

    // weighted center 109.5 truncates to 109
    assert_eq!(report.result.offset, -51.0);
    assert_eq!(report.result.direction, Direction::DriftLeft);
    assert_eq!((report.source_width, report.source_height), (320, 256));
    assert_eq!(report.mask.count(), 20 * 256);
}

#[test]
fn test_overlay_at_model_size_is_exact() {
    let mut pipeline = pipeline(100..120);
    let report = pipeline.run_frame(&frame(320, 256)).unwrap();

    assert_eq!(report.overlay.pixel(99, 0), &[0, 0, 0, 0]);
    assert_eq!(report.overlay.pixel(100, 0), &[0, 255, 0, 255]);
    assert_eq!(report.overlay.pixel(119, 255), &[0, 255, 0, 255]);
    assert_eq!(report.overlay.pixel(120, 255), &[0, 0, 0, 0]);
}

#[test]
fn test_overlay_scales_back_proportionally() {
    let mut pipeline = pipeline(100..120);
    let report = pipeline.run_frame(&frame(640, 512)).unwrap();

    let overlay = &report.overlay;
    assert_eq!((overlay.width(), overlay.height(), overlay.channels()), (640, 512, 4));
    for y in [0, 255, 511] {
        assert_eq!(overlay.pixel(100, y), &[0, 0, 0, 0]);
        assert_eq!(overlay.pixel(202, y), &[0, 255, 0, 255]);
        assert_eq!(overlay.pixel(220, y), &[0, 255, 0, 255]);
        assert_eq!(overlay.pixel(238, y), &[0, 255, 0, 255]);
        assert_eq!(overlay.pixel(300, y), &[0, 0, 0, 0]);
    }
    // offset is measured at model resolution whatever the source size
    assert_eq!(report.result.offset, -51.0);
}

#[test]
fn test_wrong_probability_size_is_rejected() {
    let mut pipeline =
        LanePipeline::new(Box::new(WrongSizeSegmenter), LaneConfig::default()).unwrap();
    let err = pipeline.run_frame(&frame(320, 256)).unwrap_err();
    match err {
        LaneError::ShapeMismatch { expected, got } => {
            assert_eq!(expected, vec![256, 320]);
            assert_eq!(got, vec![10, 10]);
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_failed_frame_leaves_sink_untouched() {
    let mut pipeline =
        LanePipeline::new(Box::new(WrongSizeSegmenter), LaneConfig::default()).unwrap();
    let mut sink = RecordingSink::default();

    assert!(!pipeline.process_frame(&frame(320, 256), &mut sink));
    assert!(sink.overlays.is_empty());
    assert!(sink.directions.is_empty());
    assert!(pipeline.throttle().last_update().is_none());
}

#[test]
fn test_empty_frame_is_dropped() {
    let mut pipeline = pipeline(0..320);
    let mut sink = RecordingSink::default();
    let empty = PixelGrid::new(0, 0, 3, vec![]).unwrap();

    assert!(!pipeline.process_frame(&empty, &mut sink));
    assert!(sink.overlays.is_empty());
}

#[test]
fn test_label_throttle() {
    let mut pipeline = pipeline(150..170);
    let mut sink = RecordingSink::default();
    let start = Instant::now();
    let input = frame(320, 256);

    assert!(pipeline.process_frame_at(&input, start, &mut sink));
    assert_eq!(sink.directions, vec![Direction::Centered]);

    pipeline.process_frame_at(&input, start + Duration::from_millis(499), &mut sink);
    assert_eq!(sink.directions.len(), 1);
    assert_eq!(sink.overlays.len(), 2);

    pipeline.process_frame_at(&input, start + Duration::from_millis(500), &mut sink);
    assert_eq!(sink.directions.len(), 2);
    assert_eq!(sink.overlays.len(), 3);

    pipeline.process_frame_at(&input, start + Duration::from_millis(900), &mut sink);
    assert_eq!(sink.directions.len(), 2);
    assert_eq!(sink.overlays.len(), 4);
}

#[test]
fn test_failed_frame_does_not_reset_throttle() {
    let mut pipeline = pipeline(0..10);
    let mut sink = RecordingSink::default();
    let start = Instant::now();

    pipeline.process_frame_at(&frame(320, 256), start, &mut sink);
    let empty = PixelGrid::new(0, 0, 3, vec![]).unwrap();
    pipeline.process_frame_at(&empty, start + Duration::from_millis(600), &mut sink);
    assert_eq!(pipeline.throttle().last_update(), Some(start));
    assert_eq!(sink.directions, vec![Direction::DriftLeft]);
}

#[test]
fn test_config_drives_pipeline() {
    let config = LaneConfig::default()
        .with_deadband(60.0)
        .with_label_interval(Duration::ZERO);
    let mut pipeline =
        LanePipeline::new(Box::new(ColumnSegmenter { columns: 100..120 }), config).unwrap();
    let mut sink = RecordingSink::default();
    let start = Instant::now();

    pipeline.process_frame_at(&frame(320, 256), start, &mut sink);
    pipeline.process_frame_at(&frame(320, 256), start, &mut sink);
    assert_eq!(sink.directions, vec![Direction::Centered, Direction::Centered]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = LaneConfig::default().with_input_width(0);
    let result = LanePipeline::new(Box::new(WrongSizeSegmenter), config);
    assert!(matches!(result, Err(LaneError::Config(_))));
}

#[test]
fn test_model_load_failure() {
    let result = LanePipeline::from_model(
        &NoModelBackend,
        ModelSource::Memory(vec![1, 2, 3]),
        LaneConfig::default(),
    );
    assert!(matches!(result, Err(LaneError::ModelLoad(_))));
}

#[test]
fn test_from_config_needs_model_path() {
    let result = LanePipeline::from_config(&NoModelBackend, LaneConfig::default());
    assert!(matches!(result, Err(LaneError::ModelLoad(_))));

    let config = LaneConfig::default().with_model_path("models/lane.onnx");
    match LanePipeline::from_config(&NoModelBackend, config) {
        Err(LaneError::ModelLoad(msg)) => assert!(msg.contains("lane.onnx")),
        _ => panic!("expected ModelLoad"),
    }
}
