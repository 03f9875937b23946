//! Tensor types for inference input/output.

use ndarray::{ArrayD, IxDyn};

use crate::error::InferenceError;
use crate::Result;

/// Tensor element types seen at the model boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorType {
    Float32,
    Int64,
}

impl TensorType {
    /// Lowercase name as reported to callers ("float32", "int64").
    pub fn as_str(&self) -> &'static str {
        match self {
            TensorType::Float32 => "float32",
            TensorType::Int64 => "int64",
        }
    }
}

/// Input tensor for inference.
///
/// Inputs are always 32-bit floats; the decoders feeding this layer do not
/// produce any other element type.
#[derive(Debug, Clone)]
pub struct InputTensor(ArrayD<f32>);

impl InputTensor {
    /// Build a tensor from a flat row-major buffer and a shape.
    ///
    /// An empty shape denotes a scalar and requires exactly one element.
    pub fn from_parts(data: Vec<f32>, shape: Vec<usize>) -> Result<Self> {
        let arr = ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|e| InferenceError::InvalidInput(e.to_string()))?;
        Ok(InputTensor(arr))
    }

    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Get the data type of the tensor.
    pub fn dtype(&self) -> TensorType {
        TensorType::Float32
    }

    /// Borrow the inner array.
    pub fn as_array(&self) -> &ArrayD<f32> {
        &self.0
    }
}

/// Output tensor from inference.
#[derive(Debug, Clone)]
pub enum OutputTensor {
    Float32(ArrayD<f32>),
    Int64(ArrayD<i64>),
}

impl OutputTensor {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        match self {
            OutputTensor::Float32(arr) => arr.shape(),
            OutputTensor::Int64(arr) => arr.shape(),
        }
    }

    /// Get the data type of the tensor.
    pub fn dtype(&self) -> TensorType {
        match self {
            OutputTensor::Float32(_) => TensorType::Float32,
            OutputTensor::Int64(_) => TensorType::Int64,
        }
    }

    /// Number of elements in the tensor.
    pub fn element_count(&self) -> usize {
        match self {
            OutputTensor::Float32(arr) => arr.len(),
            OutputTensor::Int64(arr) => arr.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_parts_shape() {
        let t = InputTensor::from_parts(vec![0.0; 6], vec![2, 3]).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.dtype(), TensorType::Float32);
    }

    #[test]
    fn test_from_parts_scalar() {
        let t = InputTensor::from_parts(vec![1.5], vec![]).unwrap();
        assert_eq!(t.shape(), &[] as &[usize]);
        assert_eq!(t.as_array().iter().count(), 1);
    }

    #[test]
    fn test_from_parts_mismatch() {
        let err = InputTensor::from_parts(vec![0.0; 5], vec![2, 3]);
        assert!(err.is_err());
    }

    #[test]
    fn test_output_element_count() {
        let arr = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0f32; 4]).unwrap();
        let out = OutputTensor::Float32(arr);
        assert_eq!(out.element_count(), 4);
        assert_eq!(out.dtype().as_str(), "float32");
    }
}
