//! Minimal NPY array-file decoder.
//!
//! Reads version 1 and 2 NPY buffers containing a single rectangular f32
//! array. The element type and order flags in the header are not consulted:
//! little-endian f32 in C order is assumed throughout, which is exactly what
//! the weather-model input files contain. This is not a general-purpose
//! decoder for the format family.

mod header;

use tracing::debug;

use crate::error::FormatError;
use header::{decode_latin1, parse_shape};

/// The fixed 6-byte signature at the start of every NPY file.
const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Bytes per element; the payload is always f32.
const ELEMENT_SIZE: usize = 4;

/// A decoded flat numeric array plus its dimension list.
///
/// Data is held row-major (C order), exactly as stored in the file; an empty
/// shape denotes a scalar with a single element. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct NpyArray {
    data: Vec<f32>,
    shape: Vec<usize>,
}

impl NpyArray {
    /// The flat row-major element buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// The dimension extents, outermost first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements (1 for a scalar).
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Consume the array, yielding its buffer and shape.
    pub fn into_parts(self) -> (Vec<f32>, Vec<usize>) {
        (self.data, self.shape)
    }
}

/// Header facts surfaced for inspection without materializing the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyInfo {
    pub major: u8,
    pub minor: u8,
    pub shape: Vec<usize>,
    pub element_count: usize,
    pub payload_bytes: usize,
}

/// Decode one NPY buffer into an [`NpyArray`].
///
/// Pure function of the input bytes: no side effects, deterministic, and the
/// returned array owns a copy of the payload. Either fully succeeds or fails
/// with a [`FormatError`]; no partial array is ever returned.
pub fn decode(bytes: &[u8]) -> Result<NpyArray, FormatError> {
    let (shape, payload_offset) = parse_header(bytes)?;

    let payload = &bytes[payload_offset..];
    let (_, expected) = checked_counts(&shape)?;
    if payload.len() != expected {
        return Err(FormatError::PayloadLength {
            expected,
            actual: payload.len(),
        });
    }

    let data: Vec<f32> = payload
        .chunks_exact(ELEMENT_SIZE)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    debug!("Decoded NPY array: shape {:?}, {} elements", shape, data.len());

    Ok(NpyArray { data, shape })
}

/// Read header facts from an NPY buffer without decoding the payload.
pub fn inspect(bytes: &[u8]) -> Result<NpyInfo, FormatError> {
    let (major, minor, _, _) = parse_prelude(bytes)?;
    let (shape, payload_offset) = parse_header(bytes)?;
    let (element_count, _) = checked_counts(&shape)?;
    Ok(NpyInfo {
        major,
        minor,
        shape,
        element_count,
        payload_bytes: bytes.len() - payload_offset,
    })
}

/// Element and byte counts implied by a shape, without wrapping.
///
/// Header dimensions are attacker-controlled; a product that overflows
/// `usize` (or whose byte count does) is a format error, not a panic.
fn checked_counts(shape: &[usize]) -> Result<(usize, usize), FormatError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .and_then(|elements| {
            elements
                .checked_mul(ELEMENT_SIZE)
                .map(|bytes| (elements, bytes))
        })
        .ok_or_else(|| FormatError::ShapeTooLarge {
            shape: shape.to_vec(),
        })
}

/// Parse the fixed prelude: magic, version, header length field.
///
/// Returns (major, minor, header start, header length).
fn parse_prelude(bytes: &[u8]) -> Result<(u8, u8, usize, usize), FormatError> {
    if bytes.len() < 8 {
        return Err(FormatError::TruncatedHeader {
            needed: 8,
            available: bytes.len(),
        });
    }
    if &bytes[..6] != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let major = bytes[6];
    let minor = bytes[7];

    let (header_start, header_len) = match major {
        1 => {
            if bytes.len() < 10 {
                return Err(FormatError::TruncatedHeader {
                    needed: 10,
                    available: bytes.len(),
                });
            }
            let len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
            (10, len)
        }
        2 => {
            if bytes.len() < 12 {
                return Err(FormatError::TruncatedHeader {
                    needed: 12,
                    available: bytes.len(),
                });
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
            (12, len)
        }
        _ => return Err(FormatError::UnsupportedVersion { major, minor }),
    };

    Ok((major, minor, header_start, header_len))
}

/// Parse prelude plus header text; returns the shape and the payload offset.
fn parse_header(bytes: &[u8]) -> Result<(Vec<usize>, usize), FormatError> {
    let (_, _, header_start, header_len) = parse_prelude(bytes)?;

    let header_end = header_start + header_len;
    if bytes.len() < header_end {
        return Err(FormatError::TruncatedHeader {
            needed: header_end,
            available: bytes.len(),
        });
    }

    let header_text = decode_latin1(&bytes[header_start..header_end]);
    let shape = parse_shape(&header_text)?;

    Ok((shape, header_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a version-1 NPY buffer with the given shape tuple text.
    fn npy_v1(shape_text: &str, payload: &[f32]) -> Vec<u8> {
        let header = format!(
            "{{'descr': '<f4', 'fortran_order': False, 'shape': {}, }}",
            shape_text
        );
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.push(1);
        bytes.push(0);
        bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        for v in payload {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    /// Build a version-2 NPY buffer (u32 header length field).
    fn npy_v2(shape_text: &str, payload: &[f32]) -> Vec<u8> {
        let header = format!(
            "{{'descr': '<f4', 'fortran_order': False, 'shape': {}, }}",
            shape_text
        );
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.push(2);
        bytes.push(0);
        bytes.extend_from_slice(&(header.len() as u32).to_le_bytes());
        bytes.extend_from_slice(header.as_bytes());
        for v in payload {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_v1_round_trip() {
        let payload = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let arr = decode(&npy_v1("(2, 3)", &payload)).unwrap();
        assert_eq!(arr.shape(), &[2, 3]);
        assert_eq!(arr.data(), &payload);

        // Re-encode with the same shape and payload; must decode equal.
        let again = decode(&npy_v1("(2, 3)", arr.data())).unwrap();
        assert_eq!(again, arr);
    }

    #[test]
    fn test_decode_v2() {
        let payload = [9.5f32, -1.25];
        let arr = decode(&npy_v2("(2,)", &payload)).unwrap();
        assert_eq!(arr.shape(), &[2]);
        assert_eq!(arr.data(), &payload);
    }

    #[test]
    fn test_decode_one_element_tuple() {
        let payload = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let arr = decode(&npy_v1("(5,)", &payload)).unwrap();
        assert_eq!(arr.shape(), &[5]);
        assert_eq!(arr.ndim(), 1);
    }

    #[test]
    fn test_decode_scalar() {
        let arr = decode(&npy_v1("()", &[42.0])).unwrap();
        assert_eq!(arr.shape(), &[] as &[usize]);
        assert_eq!(arr.element_count(), 1);
        assert_eq!(arr.data(), &[42.0]);
    }

    #[test]
    fn test_decode_bad_magic() {
        let mut bytes = npy_v1("(2,)", &[1.0, 2.0]);
        bytes[0] = 0x00;
        assert!(matches!(decode(&bytes), Err(FormatError::BadMagic)));
    }

    #[test]
    fn test_decode_unsupported_version() {
        let mut bytes = npy_v1("(2,)", &[1.0, 2.0]);
        bytes[6] = 3;
        assert!(matches!(
            decode(&bytes),
            Err(FormatError::UnsupportedVersion { major: 3, .. })
        ));
    }

    #[test]
    fn test_decode_truncated_prelude() {
        assert!(matches!(
            decode(&MAGIC[..]),
            Err(FormatError::TruncatedHeader { needed: 8, .. })
        ));
    }

    #[test]
    fn test_decode_truncated_header() {
        let bytes = npy_v1("(2, 3)", &[0.0; 6]);
        // Cut inside the header text.
        assert!(matches!(
            decode(&bytes[..20]),
            Err(FormatError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn test_decode_short_payload() {
        let mut bytes = npy_v1("(2, 3)", &[0.0; 6]);
        bytes.truncate(bytes.len() - 4);
        match decode(&bytes) {
            Err(FormatError::PayloadLength { expected, actual }) => {
                assert_eq!(expected, 24);
                assert_eq!(actual, 20);
            }
            other => panic!("expected PayloadLength, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_overflowing_dimension_product() {
        // 2^62 * 16 wraps to 0 mod 2^64; an empty payload must not decode.
        let bytes = npy_v1("(4611686018427387904, 16)", &[]);
        match decode(&bytes) {
            Err(FormatError::ShapeTooLarge { shape }) => {
                assert_eq!(shape, vec![4611686018427387904, 16]);
            }
            other => panic!("expected ShapeTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_overflowing_byte_count() {
        // Element count fits in usize but the 4x byte count does not.
        let bytes = npy_v1("(9223372036854775807,)", &[]);
        assert!(matches!(
            decode(&bytes),
            Err(FormatError::ShapeTooLarge { .. })
        ));
    }

    #[test]
    fn test_inspect_overflowing_shape() {
        let bytes = npy_v1("(4611686018427387904, 16)", &[]);
        assert!(matches!(
            inspect(&bytes),
            Err(FormatError::ShapeTooLarge { .. })
        ));
    }

    #[test]
    fn test_decode_deterministic() {
        let bytes = npy_v1("(3,)", &[0.5, 1.5, 2.5]);
        let a = decode(&bytes).unwrap();
        let b = decode(&bytes).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_inspect() {
        let bytes = npy_v1("(2, 3)", &[0.0; 6]);
        let info = inspect(&bytes).unwrap();
        assert_eq!(info.major, 1);
        assert_eq!(info.shape, vec![2, 3]);
        assert_eq!(info.element_count, 6);
        assert_eq!(info.payload_bytes, 24);
    }
}
