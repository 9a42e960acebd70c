//! Auto-applies an operation to freshly saved media files.

use std::collections::HashSet;
use std::sync::Arc;
use lazy_static::lazy_static;
use tracing::debug;

use crate::core::{MediaFileRef, TransformReport};
use crate::processing::{RESIZE_OPERATION_ID, TransformEngine};
use crate::utils::{MediaResult, get_extension};

use super::ConfigStore;

/// Context string the host sends when a media file has been saved.
pub const MEDIA_FILE_CONTEXT: &str = "com_media.file";

lazy_static! {
    /// Extensions the save hook will auto-process.
    static ref AUTO_APPLY_EXTENSIONS: HashSet<&'static str> =
        ["jpg", "jpeg", "png", "gif"].into_iter().collect();
}

/// Which operation runs on save, and which config key switches it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoApplyRule {
    pub operation: String,
    pub enabled_key: String,
}

impl Default for AutoApplyRule {
    fn default() -> Self {
        Self {
            operation: RESIZE_OPERATION_ID.to_string(),
            enabled_key: "autoresize".to_string(),
        }
    }
}

/// What the save hook did with a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// Not a new media file
    NotApplicable,
    /// Auto-apply is switched off
    Disabled,
    /// Extension outside the auto-apply allow-list
    UnsupportedExtension(String),
    /// Operation ran
    Applied(TransformReport),
}

/// Hook the host calls after content is saved.
pub struct LifecycleTrigger {
    engine: TransformEngine,
    store: Arc<dyn ConfigStore>,
    rule: AutoApplyRule,
}

impl LifecycleTrigger {
    pub fn new(engine: TransformEngine, store: Arc<dyn ConfigStore>) -> Self {
        Self::with_rule(engine, store, AutoApplyRule::default())
    }

    pub fn with_rule(engine: TransformEngine, store: Arc<dyn ConfigStore>, rule: AutoApplyRule) -> Self {
        Self { engine, store, rule }
    }

    pub fn is_supported_extension(extension: &str) -> bool {
        AUTO_APPLY_EXTENSIONS.contains(extension.to_lowercase().as_str())
    }

    /// Handles a "content saved" notification.
    ///
    /// Policy skips (not a new media file, auto-apply off, unsupported extension) are
    /// reported as outcomes, not errors. Transform failures are returned as errors.
    pub fn on_content_saved(
        &self,
        context: &str,
        file: &MediaFileRef,
        is_new: bool,
    ) -> MediaResult<TriggerOutcome> {
        if !is_new || context != MEDIA_FILE_CONTEXT {
            return Ok(TriggerOutcome::NotApplicable);
        }

        if !self.store.get_flag(&self.rule.enabled_key, false) {
            debug!("Auto-apply '{}' is disabled", self.rule.operation);
            return Ok(TriggerOutcome::Disabled);
        }

        // The saved path is authoritative; fall back to the declared extension.
        let extension = get_extension(&file.path).unwrap_or_else(|| file.extension.clone());
        if !Self::is_supported_extension(&extension) {
            debug!("Skipping auto-apply for extension '{}'", extension);
            return Ok(TriggerOutcome::UnsupportedExtension(extension));
        }

        let target = MediaFileRef::new(&file.path, &extension, is_new, context);
        let options = self.store.to_option_set();
        let report = self.engine.process(&target, &self.rule.operation, &options)?;

        Ok(TriggerOutcome::Applied(report))
    }
}
