//! Nested JSON array <-> ndarray conversion
//!
//! Tensors travel through JSON as nested arrays (row-major). Shape is inferred
//! from the first element at every depth and every sibling must agree.

use ndarray::{ArrayD, IxDyn};
use serde_json::Value;

use crate::error::{Result, SuppressError};

/// Parse a rectangular nested JSON array of numbers into a dynamic-rank array
pub fn array_from_json(value: &Value) -> Result<ArrayD<f64>> {
    let shape = infer_shape(value);
    element_count(&shape)?;
    let mut data = Vec::new();
    collect_leaves(value, &shape, &mut data)?;

    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| SuppressError::UnsupportedFormat {
        details: format!("cannot build array of shape {:?}: {}", shape, e),
    })
}

/// Render a dynamic-rank array as nested JSON arrays
///
/// Non-finite elements have no JSON form and render as `null`.
pub fn array_to_json<F>(array: &ArrayD<F>) -> Value
where
    F: Copy + Into<f64>,
{
    fn render<F: Copy + Into<f64>>(view: ndarray::ArrayViewD<'_, F>) -> Value {
        if view.ndim() == 0 {
            let v: f64 = view.iter().next().copied().map(Into::into).unwrap_or(0.0);
            return serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null);
        }
        Value::Array(view.outer_iter().map(|row| render(row)).collect())
    }
    render(array.view())
}

/// Number of elements implied by `shape`; overflow means the payload is malformed
fn element_count(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1_usize, |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| SuppressError::UnsupportedFormat {
            details: format!("array shape {:?} overflows the element count", shape),
        })
}

fn infer_shape(value: &Value) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut current = value;
    while let Value::Array(items) = current {
        shape.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    shape
}

fn collect_leaves(value: &Value, shape: &[usize], out: &mut Vec<f64>) -> Result<()> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, rest))) => {
            if items.len() != len {
                return Err(SuppressError::UnsupportedFormat {
                    details: format!("ragged array: expected {} elements, found {}", len, items.len()),
                });
            }
            for item in items {
                collect_leaves(item, rest, out)?;
            }
            Ok(())
        }
        (Value::Number(n), None) => {
            let v = n.as_f64().ok_or_else(|| SuppressError::UnsupportedFormat {
                details: format!("number {} is not representable as f64", n),
            })?;
            out.push(v);
            Ok(())
        }
        (Value::Array(_), None) => Err(SuppressError::UnsupportedFormat {
            details: "ragged array: nesting deeper than the first element".to_string(),
        }),
        (Value::Number(_), Some(_)) => Err(SuppressError::UnsupportedFormat {
            details: "ragged array: nesting shallower than the first element".to_string(),
        }),
        (other, _) => Err(SuppressError::UnsupportedFormat {
            details: format!("expected a number or array, found {}", json_kind(other)),
        }),
    }
}

/// Short name of a JSON value kind, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
