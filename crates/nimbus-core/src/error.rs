//! Error types for the nimbus-core library.

use thiserror::Error;

/// Main error type for the nimbus library.
#[derive(Error, Debug)]
pub enum NimbusError {
    /// Malformed array file.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Input binding failure.
    #[error("binding error: {0}")]
    Binding(#[from] BindingError),

    /// A byte source could not supply a requested buffer.
    #[error("fetch error for '{name}': {reason}")]
    Fetch { name: String, reason: String },

    /// Inference error from the inference layer, propagated unchanged.
    #[error("inference error: {0}")]
    Inference(#[from] nimbus_inference::InferenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while decoding an array file.
///
/// None of these are retried; a malformed buffer is terminal for that decode.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The buffer does not start with the NPY magic signature.
    #[error("bad magic")]
    BadMagic,

    /// Major version other than 1 or 2.
    #[error("unsupported version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// The buffer ends before the declared header (or the fixed prelude).
    #[error("truncated header: need {needed} bytes, have {available}")]
    TruncatedHeader { needed: usize, available: usize },

    /// No `'shape': (...)` entry in the header text.
    #[error("missing shape")]
    MissingShape,

    /// A shape dimension token did not parse as a non-negative integer.
    #[error("invalid shape value: '{token}'")]
    InvalidShapeValue { token: String },

    /// Payload byte count disagrees with the declared shape.
    #[error("payload length mismatch: shape implies {expected} bytes, found {actual}")]
    PayloadLength { expected: usize, actual: usize },

    /// The dimension product (or its byte count) overflows addressable size.
    #[error("shape too large: {shape:?}")]
    ShapeTooLarge { shape: Vec<usize> },
}

/// Errors raised while binding buffers to model inputs.
#[derive(Error, Debug)]
pub enum BindingError {
    /// The model declares no inputs at all.
    #[error("model has no declared inputs")]
    NoDeclaredInputs,
}

/// Result type for the nimbus library.
pub type Result<T> = std::result::Result<T, NimbusError>;
