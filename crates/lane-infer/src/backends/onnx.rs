use crate::{Backend, DeclaredShape, Device, InferError, ModelSource, Session};
use lane_base::Tensor;
use ndarray::ArrayD;
use ort::session::{Session as OrtSession, SessionInputValue};
use ort::value::{TensorRef, ValueType};
use std::borrow::Cow;

/// ONNX Runtime backend.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn cpu() -> Self {
        Self::new(Device::Cpu)
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let builder = OrtSession::builder().map_err(|e| {
            InferError::BackendError(format!("failed to create session builder: {e}"))
        })?;

        let builder = match &self.device {
            Device::Cpu => {
                log::info!("onnx: CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::info!("onnx: CUDA execution provider (device_id={device_id})");
                builder
                    .with_execution_providers([CUDAExecutionProvider::default()
                        .with_device_id(*device_id)
                        .build()])
                    .map_err(|_| InferError::UnsupportedDevice(self.device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(self.device.clone()));
            }
        };

        let description = model.describe();
        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path),
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes),
        }
        .map_err(|e| InferError::ModelLoad(format!("{description}: {e}")))?;

        let input_names = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names = session.outputs.iter().map(|o| o.name.clone()).collect();
        let input_shapes = session
            .inputs
            .iter()
            .map(|i| declared_shape(&i.input_type))
            .collect();
        let output_shapes = session
            .outputs
            .iter()
            .map(|o| declared_shape(&o.output_type))
            .collect();

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
            input_shapes,
            output_shapes,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
    input_shapes: Vec<DeclaredShape>,
    output_shapes: Vec<DeclaredShape>,
}

// ONNX marks dynamic axes with -1; non-tensor values declare nothing.
fn declared_shape(value_type: &ValueType) -> DeclaredShape {
    value_type
        .tensor_shape()
        .map(|shape| shape.iter().map(|&d| usize::try_from(d).ok()).collect())
        .unwrap_or_default()
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<Vec<(String, Tensor<f32>)>, InferError> {
        for (name, _) in inputs {
            if !self.input_names.iter().any(|n| n == name) {
                return Err(InferError::InvalidInput {
                    name: name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
        }

        // arrays must outlive the tensor views handed to ort
        let arrays = inputs
            .iter()
            .map(|(_, tensor)| tensor_to_ndarray(tensor))
            .collect::<Result<Vec<_>, _>>()?;
        let mut feed: Vec<(Cow<'_, str>, SessionInputValue<'_>)> = Vec::with_capacity(arrays.len());
        for ((name, _), array) in inputs.iter().zip(&arrays) {
            let view = TensorRef::from_array_view(array.view()).map_err(|e| {
                InferError::BackendError(format!("failed to create tensor ref for '{name}': {e}"))
            })?;
            feed.push((Cow::Borrowed(*name), view.into()));
        }

        let outputs = self
            .session
            .run(feed)
            .map_err(|e| InferError::BackendError(format!("inference failed: {e}")))?;

        let mut result = Vec::with_capacity(self.output_names.len());
        for name in &self.output_names {
            let array = outputs[name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| InferError::UnsupportedDtype(format!("output '{name}': {e}")))?;
            result.push((name.clone(), ndarray_to_tensor(array)?));
        }
        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn input_shapes(&self) -> &[DeclaredShape] {
        &self.input_shapes
    }

    fn output_shapes(&self) -> &[DeclaredShape] {
        &self.output_shapes
    }
}

pub fn tensor_to_ndarray(tensor: &Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape.clone(), tensor.data.clone())
        .map_err(|e| InferError::BackendError(format!("failed to create ndarray: {e}")))
}

pub fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    // iter() walks logical order, so non-contiguous outputs come out row-major
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
