//! NPY header text handling.
//!
//! The header is a Python-dict-literal-like string. Only the `'shape'` entry
//! is consulted; dtype and order flags are ignored by design (the decoder
//! assumes little-endian f32 in C order). Rather than parsing the whole
//! dict literal, the shape value is located as a bounded key span and only
//! its parenthesized token list is parsed.

use crate::error::FormatError;

/// Decode header bytes as one-byte-per-character text.
///
/// The format's header convention is ASCII/Latin-1; multi-byte encodings are
/// deliberately not handled.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Extract the dimension list from a header's `'shape': (...)` entry.
///
/// Tolerates the one-element-tuple trailing comma (`(5,)` yields `[5]`) and
/// the empty tuple (`()` yields an empty shape, denoting a scalar).
pub(crate) fn parse_shape(header: &str) -> Result<Vec<usize>, FormatError> {
    let tuple = shape_span(header).ok_or(FormatError::MissingShape)?;

    let mut dims = Vec::new();
    for token in tuple.split(',') {
        let token = token.trim();
        if token.is_empty() {
            // Trailing comma, or the empty tuple.
            continue;
        }
        let dim: usize = token
            .parse()
            .map_err(|_| FormatError::InvalidShapeValue {
                token: token.to_string(),
            })?;
        dims.push(dim);
    }
    Ok(dims)
}

/// Locate the text between the parentheses of the `'shape'` entry.
fn shape_span(header: &str) -> Option<&str> {
    let key = header.find("'shape'")?;
    let rest = &header[key + "'shape'".len()..];
    let colon = rest.find(':')?;
    let rest = &rest[colon + 1..];
    let open = rest.find('(')?;
    let close = rest[open + 1..].find(')')?;
    Some(&rest[open + 1..open + 1 + close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_shape_multi() {
        let header = "{'descr': '<f4', 'fortran_order': False, 'shape': (2, 181, 360), }";
        assert_eq!(parse_shape(header).unwrap(), vec![2, 181, 360]);
    }

    #[test]
    fn test_parse_shape_trailing_comma() {
        let header = "{'descr': '<f4', 'fortran_order': False, 'shape': (5,), }";
        assert_eq!(parse_shape(header).unwrap(), vec![5]);
    }

    #[test]
    fn test_parse_shape_scalar() {
        let header = "{'descr': '<f4', 'fortran_order': False, 'shape': (), }";
        assert_eq!(parse_shape(header).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_parse_shape_missing() {
        let header = "{'descr': '<f4', 'fortran_order': False}";
        assert!(matches!(
            parse_shape(header),
            Err(FormatError::MissingShape)
        ));
    }

    #[test]
    fn test_parse_shape_bad_token() {
        let header = "{'shape': (5, x), }";
        match parse_shape(header) {
            Err(FormatError::InvalidShapeValue { token }) => assert_eq!(token, "x"),
            other => panic!("expected InvalidShapeValue, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_shape_negative_rejected() {
        let header = "{'shape': (-1, 3), }";
        assert!(matches!(
            parse_shape(header),
            Err(FormatError::InvalidShapeValue { .. })
        ));
    }

    #[test]
    fn test_decode_latin1_high_bytes() {
        // One char per byte, no UTF-8 interpretation.
        let text = decode_latin1(&[0x7b, 0xe9, 0x7d]);
        assert_eq!(text.chars().count(), 3);
        assert_eq!(text.chars().nth(1), Some('é'));
    }
}
