//! The contract every transform operation implements.

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::core::{OptionSet, Raster};
use crate::utils::MediaResult;

/// Static metadata of a registered operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    /// Identifier the operation is registered and invoked under
    pub id: String,
    /// Display title
    pub title: String,
    /// Category label used to group operations in a UI
    pub category: String,
    /// Icon identifier
    pub icon: String,
    /// Extensions the operation accepts, lower-case without the dot
    pub extensions: Vec<String>,
    /// Safe to run across many files without per-file interaction
    pub batch_processable: bool,
}

impl OperationDescriptor {
    pub fn supports_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.extensions.iter().any(|e| *e == extension)
    }
}

/// Kind of input a control renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlKind {
    Integer { min: Option<i64>, max: Option<i64> },
}

/// One input in an operation's control panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    /// Option name the control sets
    pub name: String,
    pub label: String,
    pub kind: ControlKind,
    /// Pre-filled value, if any
    pub value: Option<serde_json::Value>,
}

/// Structured description of the controls a UI should render for an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDescriptor {
    pub operation: String,
    pub file_path: PathBuf,
    pub controls: Vec<Control>,
}

/// A named image transform.
///
/// Implementations must not mutate the input raster and must validate every option they
/// read, failing with [`MediaError::InvalidOption`](crate::utils::MediaError::InvalidOption).
pub trait TransformOperation: Send + Sync {
    /// Metadata the operation registers with.
    fn descriptor(&self) -> OperationDescriptor;

    /// Produces a new raster from `raster` and `options`.
    fn apply(&self, raster: &Raster, options: &OptionSet) -> MediaResult<Raster>;

    /// Describes the inputs a UI needs to collect options for `file_path`.
    fn describe_controls(&self, file_path: &Path, options: &OptionSet) -> ControlDescriptor {
        let _ = options;
        ControlDescriptor {
            operation: self.descriptor().id,
            file_path: file_path.to_path_buf(),
            controls: Vec::new(),
        }
    }
}
