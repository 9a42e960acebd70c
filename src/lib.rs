// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod lifecycle;
pub mod media_field;

// Public exports for external consumers
pub use crate::core::{
    BatchItem, EngineConfig, FileOutcome, MediaFileRef, OptionSet, Progress, ProgressType, Raster,
    TransformReport,
};
pub use lifecycle::{ConfigStore, JsonConfigStore, LifecycleTrigger, TriggerOutcome};
pub use processing::{
    BatchProcessor, CancelFlag, ControlDescriptor, OperationDescriptor, OperationRegistry,
    ResizeOperation, TransformEngine, TransformOperation,
};
pub use utils::{MediaError, MediaResult};
