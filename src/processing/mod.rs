//! Media transform processing.
//!
//! # Architecture
//!
//! - [`codec`]: decodes file bytes into a [`Raster`](crate::core::Raster) and encodes it back.
//! - [`TransformOperation`]: contract for a named image operation; [`ResizeOperation`] is the
//!   built-in one.
//! - [`OperationRegistry`]: explicit id → operation table, filled at startup.
//! - [`TransformEngine`]: runs an operation against a stored file with atomic replacement.
//! - [`BatchProcessor`]: runs one operation over many files in parallel.

pub mod batch;
pub mod codec;
mod engine;
mod operation;
mod registry;
mod resize;

pub use batch::{BatchProcessor, CancelFlag};
pub use engine::TransformEngine;
pub use operation::{
    Control, ControlDescriptor, ControlKind, OperationDescriptor, TransformOperation,
};
pub use registry::OperationRegistry;
pub use resize::{RESIZE_OPERATION_ID, ResizeOperation};
