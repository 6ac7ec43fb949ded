//! Audio payloads accepted by the loudness gate
//!
//! The host delivers audio in a handful of shapes. They are normalized here
//! into a flat, row-major sample sequence before any analysis.

use ndarray::ArrayD;
use serde_json::Value;

use crate::error::{Result, SuppressError};
use crate::nested::{array_from_json, json_kind};

/// Closed set of audio representations
#[derive(Debug, Clone, PartialEq)]
pub enum AudioLike {
    /// Flat sample list
    Flat(Vec<f64>),
    /// `(sample_rate, data)` pair; the tag is ignored
    Paired {
        sample_rate: Option<f64>,
        data: Box<AudioLike>,
    },
    /// Numeric array of any rank, e.g. `[channels, samples]`
    Nested(ArrayD<f64>),
}

impl AudioLike {
    /// Convert an untyped JSON payload into an audio variant
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(|v| AudioLike::Flat(vec![v]))
                .ok_or_else(|| unsupported(value)),
            Value::Array(items) => {
                // Only a numeric or null tag makes a pair, so `[[l], [r]]` stays a
                // nested array and `["44100", [..]]` is rejected rather than unpacked.
                if let [tag @ (Value::Number(_) | Value::Null), data @ Value::Array(_)] =
                    items.as_slice()
                {
                    return Ok(AudioLike::Paired {
                        sample_rate: tag.as_f64(),
                        data: Box::new(AudioLike::from_json(data)?),
                    });
                }
                if items.iter().all(Value::is_number) {
                    let samples = items.iter().filter_map(Value::as_f64).collect();
                    return Ok(AudioLike::Flat(samples));
                }
                Ok(AudioLike::Nested(array_from_json(value)?))
            }
            other => Err(unsupported(other)),
        }
    }

    /// Flatten into a single sample sequence (row-major for arrays)
    pub fn to_samples(&self) -> Result<Vec<f64>> {
        match self {
            AudioLike::Flat(samples) => Ok(samples.clone()),
            AudioLike::Paired { data, .. } => data.to_samples(),
            AudioLike::Nested(array) => Ok(array.iter().copied().collect()),
        }
    }

    /// Sample-rate tag, when the payload carries one
    pub fn sample_rate(&self) -> Option<f64> {
        match self {
            AudioLike::Paired { sample_rate, .. } => *sample_rate,
            _ => None,
        }
    }
}

fn unsupported(value: &Value) -> SuppressError {
    SuppressError::UnsupportedFormat {
        details: format!("cannot interpret {} as audio samples", json_kind(value)),
    }
}

impl From<Vec<f64>> for AudioLike {
    fn from(samples: Vec<f64>) -> Self {
        AudioLike::Flat(samples)
    }
}

impl From<Vec<f32>> for AudioLike {
    fn from(samples: Vec<f32>) -> Self {
        AudioLike::Flat(samples.into_iter().map(f64::from).collect())
    }
}

impl From<&[f32]> for AudioLike {
    fn from(samples: &[f32]) -> Self {
        AudioLike::Flat(samples.iter().copied().map(f64::from).collect())
    }
}

impl From<ArrayD<f32>> for AudioLike {
    fn from(array: ArrayD<f32>) -> Self {
        AudioLike::Nested(array.mapv(f64::from))
    }
}

impl From<ArrayD<f64>> for AudioLike {
    fn from(array: ArrayD<f64>) -> Self {
        AudioLike::Nested(array)
    }
}

impl From<(u32, Vec<f32>)> for AudioLike {
    fn from((sample_rate, samples): (u32, Vec<f32>)) -> Self {
        AudioLike::Paired {
            sample_rate: Some(f64::from(sample_rate)),
            data: Box::new(samples.into()),
        }
    }
}
