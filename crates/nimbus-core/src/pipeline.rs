//! The demo pipeline: fetch, decode, bind, infer.
//!
//! Each step is synchronous and pure over in-memory buffers; the first
//! failure aborts the run and nothing downstream executes. Nothing is
//! mutated in place across steps, so an aborted run leaves no partial state.

use nimbus_inference::{InferenceBackend, InputTensor, OutputTensor};
use serde::Serialize;
use tracing::info;

use crate::binding;
use crate::error::Result;
use crate::npy::{self, NpyArray};
use crate::source::ByteSource;

/// Logical name of the surface-variables input file.
pub const SURFACE_INPUT: &str = "surface";

/// Logical name of the upper-air-variables input file.
pub const UPPER_INPUT: &str = "upper";

/// Name, shape, and dtype facts for one tensor, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TensorSummary {
    pub name: String,
    pub shape: Vec<usize>,
    pub element_count: usize,
    pub dtype: String,
}

/// What a completed run looked like: bound inputs and produced outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastReport {
    pub inputs: Vec<TensorSummary>,
    pub outputs: Vec<TensorSummary>,
}

/// Fetch both input files, decode them, and run the model.
///
/// The surface buffer is always bound first, the upper buffer second, per
/// the model's input declaration order.
pub fn run_forecast(
    backend: &dyn InferenceBackend,
    source: &dyn ByteSource,
) -> Result<ForecastReport> {
    let surface = npy::decode(&source.fetch(SURFACE_INPUT)?)?;
    let upper = npy::decode(&source.fetch(UPPER_INPUT)?)?;

    info!(
        "Decoded inputs: surface {:?}, upper {:?}",
        surface.shape(),
        upper.shape()
    );

    infer(backend, vec![surface, upper])
}

/// Bind already-decoded arrays to the backend's declared inputs and run.
pub fn infer(
    backend: &dyn InferenceBackend,
    arrays: Vec<NpyArray>,
) -> Result<ForecastReport> {
    let bound = binding::bind(backend.input_names(), arrays)?;

    let mut inputs = Vec::with_capacity(bound.len());
    let mut tensors: Vec<InputTensor> = Vec::with_capacity(bound.len());
    for (name, array) in bound {
        let (data, shape) = array.into_parts();
        let tensor = InputTensor::from_parts(data, shape)?;
        inputs.push(TensorSummary {
            name,
            shape: tensor.shape().to_vec(),
            element_count: tensor.as_array().len(),
            dtype: tensor.dtype().as_str().to_string(),
        });
        tensors.push(tensor);
    }

    let named: Vec<(&str, InputTensor)> = inputs
        .iter()
        .map(|summary| summary.name.as_str())
        .zip(tensors)
        .collect();

    let outputs = backend.run(&named)?;

    info!("Inference produced {} output(s)", outputs.len());

    Ok(ForecastReport {
        inputs,
        outputs: outputs
            .iter()
            .map(|(name, tensor)| summarize(name, tensor))
            .collect(),
    })
}

fn summarize(name: &str, tensor: &OutputTensor) -> TensorSummary {
    TensorSummary {
        name: name.to_string(),
        shape: tensor.shape().to_vec(),
        element_count: tensor.element_count(),
        dtype: tensor.dtype().as_str().to_string(),
    }
}
