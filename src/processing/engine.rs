//! Runs registered operations against stored media files.
//!
//! A single transform is synchronous: read, decode, apply, encode and replace all happen
//! on the calling thread. The file is only replaced once every earlier stage succeeded,
//! so a failed transform never leaves a partial file behind.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{
    BatchItem, EngineConfig, FileOutcome, MediaFileRef, OptionSet, Progress, TransformReport,
};
use crate::utils::{MediaError, MediaResult, extract_filename, read_file, write_atomic};

use super::batch::{BatchProcessor, CancelFlag};
use super::codec;
use super::operation::{ControlDescriptor, OperationDescriptor};
use super::registry::OperationRegistry;

/// Orchestrates decode, transform, encode and atomic replace.
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    registry: Arc<OperationRegistry>,
    config: EngineConfig,
}

impl TransformEngine {
    pub fn new(registry: OperationRegistry, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(registry), config)
    }

    pub fn from_shared(registry: Arc<OperationRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Engine with the built-in operations and default settings.
    pub fn with_defaults() -> Self {
        Self::new(OperationRegistry::with_defaults(), EngineConfig::default())
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Transforms `file` in place.
    pub fn process(
        &self,
        file: &MediaFileRef,
        operation_id: &str,
        options: &OptionSet,
    ) -> MediaResult<TransformReport> {
        self.run(file, &file.path, operation_id, options)
    }

    /// Transforms `file` and writes the result to `destination`, leaving the source as is.
    pub fn process_to(
        &self,
        file: &MediaFileRef,
        destination: &Path,
        operation_id: &str,
        options: &OptionSet,
    ) -> MediaResult<TransformReport> {
        self.run(file, destination, operation_id, options)
    }

    /// Runs one batch item, honouring its destination.
    pub fn process_item(
        &self,
        item: &BatchItem,
        operation_id: &str,
        options: &OptionSet,
    ) -> MediaResult<TransformReport> {
        self.run(&item.file, item.target(), operation_id, options)
    }

    /// Transforms every file in place, in parallel, one outcome per file in input order.
    ///
    /// Fails before touching any file when the operation is unknown or not batch-processable.
    pub async fn process_batch(
        &self,
        files: Vec<MediaFileRef>,
        operation_id: &str,
        options: &OptionSet,
    ) -> MediaResult<Vec<FileOutcome>> {
        let items = files.into_iter().map(BatchItem::from).collect();
        self.batch_processor()
            .run(items, operation_id, options, |_: Progress| {})
            .await
    }

    /// Batch processor sized from the engine config, with its own cancel flag.
    pub fn batch_processor(&self) -> BatchProcessor {
        BatchProcessor::new(self.clone(), self.config.batch_concurrency, CancelFlag::new())
    }

    /// Resolves an operation and checks that it can run over many files.
    pub fn batch_operation(&self, operation_id: &str) -> MediaResult<&OperationDescriptor> {
        let (descriptor, _) = self.registry.resolve(operation_id)?;
        if !descriptor.batch_processable {
            return Err(MediaError::NotBatchProcessable(operation_id.to_string()));
        }
        Ok(descriptor)
    }

    /// Control description for rendering an operation's inputs for `file`.
    pub fn describe_controls(
        &self,
        file: &MediaFileRef,
        operation_id: &str,
        options: &OptionSet,
    ) -> MediaResult<ControlDescriptor> {
        let (_, operation) = self.registry.resolve(operation_id)?;
        Ok(operation.describe_controls(&file.path, options))
    }

    fn run(
        &self,
        file: &MediaFileRef,
        target: &Path,
        operation_id: &str,
        options: &OptionSet,
    ) -> MediaResult<TransformReport> {
        let (descriptor, operation) = self.registry.resolve(operation_id)?;

        // Extension gate runs before any I/O.
        if !descriptor.supports_extension(&file.extension) {
            return Err(MediaError::UnsupportedExtension {
                operation: descriptor.id.clone(),
                extension: file.extension.clone(),
            });
        }

        let name = extract_filename(&file.path);
        let bytes = read_file(&file.path)?;
        let original_size = bytes.len() as u64;

        let raster = codec::decode(&bytes, &file.extension)?;
        debug!("Loaded '{}': {}×{}", name, raster.width(), raster.height());

        let result = operation.apply(&raster, options)?;
        drop(raster);
        debug!(
            "'{}' → {} produced {}×{}",
            name,
            descriptor.id,
            result.width(),
            result.height()
        );

        let encoded = codec::encode_with_quality(&result, &file.extension, self.config.jpeg_quality)?;
        write_atomic(target, &encoded)?;

        info!(
            "Applied '{}' to '{}' ({} → {} bytes)",
            descriptor.id,
            name,
            original_size,
            encoded.len()
        );

        Ok(TransformReport {
            path: target.to_path_buf(),
            operation: descriptor.id.clone(),
            original_size,
            new_size: encoded.len() as u64,
            width: result.width(),
            height: result.height(),
        })
    }
}
