//! Core library for the nimbus weather-model demo.
//!
//! This crate provides:
//! - NPY array-file decoding (version 1 and 2, f32 payload)
//! - Positional binding of decoded arrays to a model's declared inputs
//! - Byte sources supplying the raw input files by logical name
//! - The fetch → decode → bind → infer pipeline

pub mod binding;
pub mod config;
pub mod error;
pub mod npy;
pub mod pipeline;
pub mod source;

pub use config::{DemoConfig, ProviderSetting, SessionSettings};
pub use error::{BindingError, FormatError, NimbusError, Result};
pub use npy::{NpyArray, NpyInfo};
pub use pipeline::{ForecastReport, TensorSummary};
pub use source::{ByteSource, FsByteSource};

/// Re-export inference types.
pub use nimbus_inference::{
    InferenceBackend, InputTensor, OutputTensor, SessionOptions,
};

#[cfg(feature = "native")]
pub use nimbus_inference::OrtBackend;

#[cfg(feature = "wasm")]
pub use nimbus_inference::TractBackend;
