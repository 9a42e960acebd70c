//! References to stored media files and per-file batch work.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::TransformReport;
use crate::utils::{MediaResult, get_extension};

/// A stored media file the engine may transform.
///
/// The engine only reads and replaces the bytes at `path`; it never renames or
/// deletes the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileRef {
    /// Full path to the file
    pub path: PathBuf,
    /// Declared extension, lower-case without the dot
    pub extension: String,
    /// Whether the file was just created
    pub is_new: bool,
    /// Call-site category the file reference came from
    pub context: String,
}

impl MediaFileRef {
    pub fn new(
        path: impl Into<PathBuf>,
        extension: impl AsRef<str>,
        is_new: bool,
        context: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            extension: extension.as_ref().trim_start_matches('.').to_lowercase(),
            is_new,
            context: context.into(),
        }
    }

    /// Builds a reference whose extension is taken from the path itself.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = get_extension(&path).unwrap_or_default();
        Self {
            path,
            extension,
            is_new: false,
            context: String::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>, is_new: bool) -> Self {
        self.context = context.into();
        self.is_new = is_new;
        self
    }
}

/// One unit of batch work: a source file and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub file: MediaFileRef,
    /// Write the result here instead of overwriting the source
    pub destination: Option<PathBuf>,
}

impl BatchItem {
    pub fn overwrite(file: MediaFileRef) -> Self {
        Self { file, destination: None }
    }

    pub fn to_destination(file: MediaFileRef, destination: impl Into<PathBuf>) -> Self {
        Self {
            file,
            destination: Some(destination.into()),
        }
    }

    /// Path the transformed bytes end up at.
    pub fn target(&self) -> &Path {
        self.destination.as_deref().unwrap_or(&self.file.path)
    }
}

impl From<MediaFileRef> for BatchItem {
    fn from(file: MediaFileRef) -> Self {
        Self::overwrite(file)
    }
}

/// Outcome of one file in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub result: MediaResult<TransformReport>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
