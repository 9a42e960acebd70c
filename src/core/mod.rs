//! Core data model shared by the codec, operations and the engine.
//!
//! - [`Raster`]: a decoded image in memory
//! - [`OptionSet`]: named option values passed to an operation
//! - [`MediaFileRef`]: a stored file the engine may transform
//! - [`EngineConfig`]: engine-wide settings
//! - [`Progress`]: progress tracking for batch runs

mod progress;
mod raster;
mod task;
mod types;

pub use progress::{Progress, ProgressType};
pub use raster::Raster;
pub use task::{BatchItem, FileOutcome, MediaFileRef};
pub use types::{EngineConfig, OptionSet, TransformReport};
