//! Positional binding of decoded arrays to declared model inputs.

use tracing::{debug, warn};

use crate::error::BindingError;
use crate::npy::NpyArray;

/// Bind decoded arrays to a model's declared input names, by position.
///
/// The mapping preserves declaration order. Policy:
///
/// - with at least as many names as arrays, `arrays[i]` goes to `names[i]`
///   and any surplus names stay unbound (the backend decides whether that is
///   an error);
/// - a model declaring a single input takes only the first array. Surplus
///   arrays are dropped without error — a known sharp edge kept for models
///   wrapped to accept one pre-stacked tensor. No stacking happens here; if
///   stacking is wanted it must be done before binding.
/// - a model declaring no inputs at all cannot be bound.
pub fn bind(
    input_names: &[String],
    arrays: Vec<NpyArray>,
) -> Result<Vec<(String, NpyArray)>, BindingError> {
    if input_names.is_empty() {
        return Err(BindingError::NoDeclaredInputs);
    }

    if input_names.len() == 1 && arrays.len() > 1 {
        warn!(
            "model declares a single input '{}'; dropping {} extra buffer(s)",
            input_names[0],
            arrays.len() - 1
        );
    }

    let bound: Vec<(String, NpyArray)> = input_names
        .iter()
        .cloned()
        .zip(arrays)
        .collect();

    debug!(
        "Bound {} input(s): {:?}",
        bound.len(),
        bound.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>()
    );

    Ok(bound)
}
