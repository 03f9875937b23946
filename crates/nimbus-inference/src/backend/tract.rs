//! Tract backend for WASM/browser ONNX inference.

use std::path::Path;

use ndarray::ArrayD;
use tract_onnx::prelude::*;
use tracing::debug;

use crate::error::InferenceError;
use crate::options::SessionOptions;
use crate::tensor::{InputTensor, OutputTensor};
use crate::{InferenceBackend, Result};

/// Backend using Tract for cross-platform ONNX inference.
pub struct TractBackend {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl TractBackend {
    /// Load a model from a file path, pinning each declared input to a
    /// concrete f32 shape (tract cannot optimize dynamic dimensions away).
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        input_shapes: &[Vec<usize>],
        options: &SessionOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading ONNX model with Tract from: {}", path.display());

        let bytes = std::fs::read(path).map_err(InferenceError::Io)?;
        Self::from_bytes(&bytes, input_shapes, options)
    }

    /// Load a model from bytes, pinning each declared input to a concrete
    /// f32 shape.
    pub fn from_bytes(
        bytes: &[u8],
        input_shapes: &[Vec<usize>],
        options: &SessionOptions,
    ) -> Result<Self> {
        debug!("Loading ONNX model with Tract from {} bytes", bytes.len());
        debug!(
            "Tract has no execution providers or thread pool; ignoring {:?}",
            options
        );

        let mut model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(bytes))
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to load model: {}", e)))?;

        // Names must be captured before typing; optimization rewrites nodes.
        let input_names = outlet_names(&model, model.input_outlets().map_err(to_load_err)?);
        let output_names = outlet_names(&model, model.output_outlets().map_err(to_load_err)?);

        for (idx, shape) in input_shapes.iter().enumerate() {
            model
                .set_input_fact(
                    idx,
                    InferenceFact::dt_shape(f32::datum_type(), shape.as_slice()),
                )
                .map_err(|e| {
                    InferenceError::ModelLoad(format!("Failed to set input shape: {}", e))
                })?;
        }

        let model = model
            .into_typed()
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to type model: {}", e)))?
            .into_optimized()
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to optimize: {}", e)))?
            .into_runnable()
            .map_err(|e| InferenceError::SessionCreate(e.to_string()))?;

        debug!("Model inputs: {:?}", input_names);
        debug!("Model outputs: {:?}", output_names);

        Ok(Self {
            model,
            input_names,
            output_names,
        })
    }

    fn convert_input(&self, tensor: &InputTensor) -> Result<TValue> {
        let arr = tensor.as_array();
        let shape: TVec<usize> = arr.shape().iter().cloned().collect();
        let data: Vec<f32> = arr.iter().cloned().collect();
        let tract_tensor =
            tract_ndarray::ArrayD::from_shape_vec(tract_ndarray::IxDyn(shape.as_slice()), data)
                .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;
        Ok(tract_tensor.into_tvalue())
    }
}

fn outlet_names(
    model: &InferenceModel,
    outlets: &[OutletId],
) -> Vec<String> {
    outlets
        .iter()
        .map(|o| model.node(o.node).name.clone())
        .collect()
}

fn to_load_err(e: TractError) -> InferenceError {
    InferenceError::ModelLoad(e.to_string())
}

impl InferenceBackend for TractBackend {
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>> {
        // Tract addresses inputs positionally; the caller's binding order is
        // trusted here.
        let tract_inputs: TVec<TValue> = inputs
            .iter()
            .map(|(_, tensor)| self.convert_input(tensor))
            .collect::<Result<TVec<_>>>()?;

        let outputs = self
            .model
            .run(tract_inputs)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let mut results = Vec::with_capacity(outputs.len());

        for (idx, output) in outputs.iter().enumerate() {
            let name = self
                .output_names
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("output_{}", idx));

            let tensor = if let Ok(arr) = output.to_array_view::<f32>() {
                let shape: Vec<usize> = arr.shape().to_vec();
                let data: Vec<f32> = arr.iter().cloned().collect();
                let arr = ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data)
                    .map_err(|e| InferenceError::OutputExtraction(e.to_string()))?;
                OutputTensor::Float32(arr)
            } else if let Ok(arr) = output.to_array_view::<i64>() {
                let shape: Vec<usize> = arr.shape().to_vec();
                let data: Vec<i64> = arr.iter().cloned().collect();
                let arr = ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data)
                    .map_err(|e| InferenceError::OutputExtraction(e.to_string()))?;
                OutputTensor::Int64(arr)
            } else {
                return Err(InferenceError::OutputExtraction(format!(
                    "unsupported output type for '{}'",
                    name
                )));
            };

            results.push((name, tensor));
        }

        Ok(results)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
