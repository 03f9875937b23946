//! ONNX inference abstraction layer for nimbus.
//!
//! This crate provides a unified interface for running ONNX models across
//! different backends:
//! - `ort` for native platforms
//! - `tract` for WASM/browser environments
//!
//! Backend selection, graph optimization level, and threading are carried in
//! an explicit [`SessionOptions`] value passed into session creation; there
//! is no ambient global configuration.

mod backend;
mod error;
mod options;
mod tensor;

pub use backend::InferenceBackend;
pub use error::InferenceError;
pub use options::{ExecutionProvider, OptimizationLevel, SessionOptions};
pub use tensor::{InputTensor, OutputTensor, TensorType};

#[cfg(feature = "native")]
pub use backend::ort::OrtBackend;

#[cfg(feature = "wasm")]
pub use backend::tract::TractBackend;

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
