//! Image embeds mapping
//!
//! The host hands the editor a keyed mapping. Only the audio embedding under
//! [`AUDIO_EMBED_KEY`] is rewritten; every other entry passes through. Values
//! are reference counted so copying the mapping never copies tensor storage.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use ndarray::ArrayD;
use serde_json::{Map, Value};

use crate::error::{Result, SuppressError};
use crate::nested::{array_from_json, array_to_json};

/// Key of the `[T, 5, C]` audio embedding inside image embeds
pub const AUDIO_EMBED_KEY: &str = "humo_audio_emb";

/// A tensor of either supported precision
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedTensor {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

impl EmbedTensor {
    pub fn shape(&self) -> &[usize] {
        match self {
            EmbedTensor::F32(a) => a.shape(),
            EmbedTensor::F64(a) => a.shape(),
        }
    }

    /// True when every element is finite (and therefore has a JSON form)
    pub fn is_finite(&self) -> bool {
        match self {
            EmbedTensor::F32(a) => a.iter().all(|v| v.is_finite()),
            EmbedTensor::F64(a) => a.iter().all(|v| v.is_finite()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            EmbedTensor::F32(a) => array_to_json(a),
            EmbedTensor::F64(a) => array_to_json(a),
        }
    }
}

impl From<ArrayD<f32>> for EmbedTensor {
    fn from(array: ArrayD<f32>) -> Self {
        EmbedTensor::F32(array)
    }
}

impl From<ArrayD<f64>> for EmbedTensor {
    fn from(array: ArrayD<f64>) -> Self {
        EmbedTensor::F64(array)
    }
}

/// A single entry of the image embeds mapping
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedValue {
    Tensor(Arc<EmbedTensor>),
    /// Opaque host data, passed through untouched
    Other(Arc<Value>),
}

/// Keyed mapping exchanged with the host graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageEmbeds {
    entries: BTreeMap<String, EmbedValue>,
}

impl ImageEmbeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: EmbedValue) -> Option<EmbedValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn insert_tensor(&mut self, key: impl Into<String>, tensor: impl Into<EmbedTensor>) {
        self.entries
            .insert(key.into(), EmbedValue::Tensor(Arc::new(tensor.into())));
    }

    pub fn get(&self, key: &str) -> Option<&EmbedValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The audio embedding tensor, if present and tensor-valued
    pub fn audio_embedding(&self) -> Option<&Arc<EmbedTensor>> {
        match self.entries.get(AUDIO_EMBED_KEY) {
            Some(EmbedValue::Tensor(tensor)) => Some(tensor),
            _ => None,
        }
    }

    /// Build from a JSON object; the audio embedding is parsed as an f64 tensor
    /// so that unedited values are written back exactly
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| SuppressError::UnsupportedFormat {
            details: "image embeds must be a JSON object".to_string(),
        })?;

        let mut embeds = ImageEmbeds::new();
        for (key, entry) in object {
            if key == AUDIO_EMBED_KEY {
                embeds.insert_tensor(key.clone(), array_from_json(entry)?);
            } else {
                embeds.insert(key.clone(), EmbedValue::Other(Arc::new(entry.clone())));
            }
        }
        Ok(embeds)
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (key, entry) in &self.entries {
            let value = match entry {
                EmbedValue::Tensor(tensor) => tensor.to_json(),
                EmbedValue::Other(value) => value.as_ref().clone(),
            };
            object.insert(key.clone(), value);
        }
        Value::Object(object)
    }

    /// Load image embeds from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_json(&value)
    }

    /// Write image embeds to a JSON file
    ///
    /// Tensors holding NaN or infinite values are refused, since JSON cannot
    /// carry them back in.
    pub fn save(&self, path: &Path) -> Result<()> {
        for (key, entry) in &self.entries {
            if let EmbedValue::Tensor(tensor) = entry {
                if !tensor.is_finite() {
                    return Err(SuppressError::NonFinite { key: key.clone() });
                }
            }
        }
        let text = serde_json::to_string(&self.to_json())?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
