//! Explicit registry of transform operations.
//!
//! Populated at startup by direct `register` calls and shared read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use crate::utils::{MediaError, MediaResult};
use super::operation::{OperationDescriptor, TransformOperation};
use super::resize::ResizeOperation;

struct Entry {
    descriptor: OperationDescriptor,
    operation: Arc<dyn TransformOperation>,
}

/// Maps operation identifiers to their implementation and metadata.
#[derive(Default)]
pub struct OperationRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in operations.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let resize: Arc<dyn TransformOperation> = Arc::new(ResizeOperation::new());
        registry.insert(resize.descriptor(), resize);
        registry
    }

    /// Registers `operation` under `descriptor.id`.
    pub fn register(
        &mut self,
        descriptor: OperationDescriptor,
        operation: Arc<dyn TransformOperation>,
    ) -> MediaResult<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(MediaError::DuplicateOperation(descriptor.id));
        }
        self.insert(descriptor, operation);
        Ok(())
    }

    fn insert(&mut self, descriptor: OperationDescriptor, operation: Arc<dyn TransformOperation>) {
        debug!(
            "Registered operation '{}' for [{}]",
            descriptor.id,
            descriptor.extensions.join(", ")
        );
        self.index.insert(descriptor.id.clone(), self.entries.len());
        self.entries.push(Entry { descriptor, operation });
    }

    /// Registers `operation` under its own descriptor.
    pub fn register_operation(&mut self, operation: Arc<dyn TransformOperation>) -> MediaResult<()> {
        let descriptor = operation.descriptor();
        self.register(descriptor, operation)
    }

    /// Looks up an operation and its metadata.
    pub fn resolve(
        &self,
        id: &str,
    ) -> MediaResult<(&OperationDescriptor, &Arc<dyn TransformOperation>)> {
        self.index
            .get(id)
            .map(|&i| (&self.entries[i].descriptor, &self.entries[i].operation))
            .ok_or_else(|| MediaError::UnknownOperation(id.to_string()))
    }

    /// Operations accepting `extension`, in registration order.
    ///
    /// Lazy; call again to restart the listing.
    pub fn list_for_extension<'a>(
        &'a self,
        extension: &str,
    ) -> impl Iterator<Item = &'a OperationDescriptor> + Clone + use<'a> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.entries
            .iter()
            .map(|entry| &entry.descriptor)
            .filter(move |descriptor| descriptor.supports_extension(&extension))
    }

    /// Every registered descriptor, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.descriptor.id))
            .finish()
    }
}
