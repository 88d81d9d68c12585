use crate::InferError;
use lane_base::Tensor;

/// Dimensions a model declares for one tensor. `None` marks a dynamic axis.
pub type DeclaredShape = Vec<Option<usize>>;

/// A loaded model ready to run.
///
/// Outputs come back in the model's declared output order.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<Vec<(String, Tensor<f32>)>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];

    /// Declared input shapes in input order. Empty when the runtime reports none.
    fn input_shapes(&self) -> &[DeclaredShape] {
        &[]
    }

    /// Declared output shapes in output order. Empty when the runtime reports none.
    fn output_shapes(&self) -> &[DeclaredShape] {
        &[]
    }
}

/// True when `actual` fits `declared`: same rank, fixed axes equal.
///
/// An empty declaration carries no information and matches anything.
pub fn shape_matches(declared: &[Option<usize>], actual: &[usize]) -> bool {
    if declared.is_empty() {
        return true;
    }
    declared.len() == actual.len()
        && declared
            .iter()
            .zip(actual)
            .all(|(d, &a)| d.is_none_or(|d| d == a))
}
