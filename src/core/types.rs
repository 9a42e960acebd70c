//! Core types for transform options, engine settings and results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::{DEFAULT_JPEG_QUALITY, MediaError, MediaResult};

/// Named option values handed to an operation.
///
/// Values arrive either from UI controls (often as strings) or from stored plugin
/// configuration. The set itself does no validation; each operation reads what it
/// needs through the typed accessors, which reject malformed input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, Value>);

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reads a strictly positive integer option.
    ///
    /// Accepts JSON integers and strings holding an integer. Missing, zero, negative,
    /// fractional or non-numeric values fail with [`MediaError::InvalidOption`].
    pub fn require_positive_u32(&self, name: &str) -> MediaResult<u32> {
        let value = self
            .get(name)
            .ok_or_else(|| MediaError::invalid_option(name, "missing"))?;

        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match parsed {
            None => Err(MediaError::invalid_option(
                name,
                format!("expected an integer, got {value}"),
            )),
            Some(v) if v <= 0 => Err(MediaError::invalid_option(
                name,
                format!("must be greater than zero, got {v}"),
            )),
            Some(v) => u32::try_from(v)
                .map_err(|_| MediaError::invalid_option(name, format!("{v} is too large"))),
        }
    }

    /// Reads an optional positive integer, treating absence as `None`.
    pub fn positive_u32(&self, name: &str) -> MediaResult<Option<u32>> {
        if self.contains(name) {
            self.require_positive_u32(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl From<serde_json::Map<String, Value>> for OptionSet {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Engine-wide settings.
///
/// Loaded from JSON; every field has a default so a partial or empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// JPEG encode quality (1-100)
    pub jpeg_quality: u8,
    /// Maximum number of files transformed at once in batch mode
    pub batch_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            batch_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> MediaResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| MediaError::config(format!("Invalid engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MediaError::config(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> MediaResult<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(MediaError::config(format!(
                "Invalid quality value: {}. Must be between 1 and 100",
                self.jpeg_quality
            )));
        }
        if self.batch_concurrency == 0 {
            return Err(MediaError::config("Batch concurrency cannot be 0"));
        }
        Ok(())
    }
}

/// Result of one successful transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReport {
    /// File the transformed bytes were written to
    pub path: PathBuf,
    /// Operation that produced the result
    pub operation: String,
    /// Source size in bytes
    pub original_size: u64,
    /// Written size in bytes
    pub new_size: u64,
    /// Resulting raster width
    pub width: u32,
    /// Resulting raster height
    pub height: u32,
}
