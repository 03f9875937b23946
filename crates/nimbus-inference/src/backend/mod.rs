//! Inference backend implementations.

#[cfg(feature = "native")]
pub mod ort;

#[cfg(feature = "wasm")]
pub mod tract;

use crate::{InputTensor, OutputTensor, Result};

/// Trait for ONNX inference backends.
///
/// This trait abstracts over different ONNX runtime implementations,
/// allowing the same code to run on native platforms (via ort) and
/// in the browser (via tract).
pub trait InferenceBackend: Send + Sync {
    /// Run inference with the given named inputs.
    ///
    /// Input order must match the order in which names were bound; backends
    /// that address inputs positionally rely on it.
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>>;

    /// Input names declared by the model, in declaration order.
    fn input_names(&self) -> &[String];

    /// Output names produced by the model, in declaration order.
    fn output_names(&self) -> &[String];
}
