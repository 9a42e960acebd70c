//! Boundary with the host's save events.
//!
//! The host delivers "content saved" notifications to a [`LifecycleTrigger`], which reads
//! its switches and options from a [`ConfigStore`] and runs the engine when they allow it.

mod config;
mod trigger;

pub use config::{ConfigStore, JsonConfigStore, is_truthy};
pub use trigger::{AutoApplyRule, LifecycleTrigger, MEDIA_FILE_CONTEXT, TriggerOutcome};
