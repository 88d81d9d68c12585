use crate::{LaneError, ProbabilityGrid};
use lane_base::Tensor;
use lane_infer::{Backend, DeclaredShape, ModelSource, Session, shape_matches};

/// NHWC shape of the model input.
pub fn input_shape(width: usize, height: usize) -> [usize; 4] {
    [1, height, width, 3]
}

/// NHWC shape of the model output: one probability per pixel.
pub fn output_shape(width: usize, height: usize) -> [usize; 4] {
    [1, height, width, 1]
}

/// Anything that scores a `[1, H, W, 3]` frame tensor into lane probabilities.
pub trait Segmentation: Send {
    fn infer(&mut self, tensor: &Tensor<f32>) -> Result<ProbabilityGrid, LaneError>;
}

/// Segmentation backed by an inference [`Session`].
///
/// Feeds the session's first input and reads its first output, checking both
/// against the fixed model shapes: the declared ones when the session is
/// bound, the actual tensors on every frame.
pub struct SessionSegmenter {
    session: Box<dyn Session>,
    width: usize,
    height: usize,
}

impl SessionSegmenter {
    /// Fails with `ShapeMismatch` when the model declares a first input or
    /// output that cannot hold the `[1, H, W, 3]` / `[1, H, W, 1]` tensors.
    pub fn new(session: Box<dyn Session>, width: usize, height: usize) -> Result<Self, LaneError> {
        check_declared(
            session.input_shapes().first(),
            &input_shape(width, height),
        )?;
        check_declared(
            session.output_shapes().first(),
            &output_shape(width, height),
        )?;
        Ok(Self {
            session,
            width,
            height,
        })
    }

    /// Loads the model once.
    ///
    /// A model that does not load is `ModelLoad`; one declaring incompatible
    /// shapes is `ShapeMismatch`.
    pub fn load(
        backend: &dyn Backend,
        source: ModelSource,
        width: usize,
        height: usize,
    ) -> Result<Self, LaneError> {
        let description = source.describe();
        let session = backend
            .load_model(source)
            .map_err(|e| LaneError::ModelLoad(format!("{description}: {e}")))?;
        log::info!(
            "lane model {} loaded with {} (inputs {:?}, outputs {:?})",
            description,
            backend.name(),
            session.input_names(),
            session.output_names()
        );
        Self::new(session, width, height)
    }
}

// dynamic axes show up as 0 in the error
fn check_declared(declared: Option<&DeclaredShape>, expected: &[usize]) -> Result<(), LaneError> {
    match declared {
        Some(dims) if !shape_matches(dims, expected) => Err(LaneError::ShapeMismatch {
            expected: expected.to_vec(),
            got: dims.iter().map(|d| d.unwrap_or(0)).collect(),
        }),
        _ => Ok(()),
    }
}

impl Segmentation for SessionSegmenter {
    fn infer(&mut self, tensor: &Tensor<f32>) -> Result<ProbabilityGrid, LaneError> {
        tensor.expect_shape(&input_shape(self.width, self.height))?;
        let expected_output = output_shape(self.width, self.height);

        let input_name = self.session.input_names().first().cloned().ok_or_else(|| {
            LaneError::ShapeMismatch {
                expected: input_shape(self.width, self.height).to_vec(),
                got: vec![],
            }
        })?;

        let outputs = self.session.run(&[(input_name.as_str(), tensor)])?;
        let (_, output) = outputs
            .into_iter()
            .next()
            .ok_or_else(|| LaneError::ShapeMismatch {
                expected: expected_output.to_vec(),
                got: vec![],
            })?;
        output.expect_shape(&expected_output)?;

        let (_, data) = output.into_parts();
        ProbabilityGrid::new(self.width, self.height, data)
    }
}
