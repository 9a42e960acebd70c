mod common;

use std::fs;
use std::sync::Arc;

use common::{dimensions, write_garbage, write_image};
use media_transform::lifecycle::{AutoApplyRule, MEDIA_FILE_CONTEXT};
use media_transform::{
    JsonConfigStore, LifecycleTrigger, MediaError, MediaFileRef, TransformEngine, TriggerOutcome,
};
use serde_json::json;
use tempfile::TempDir;

fn trigger(params: serde_json::Value) -> LifecycleTrigger {
    let store = JsonConfigStore::from_value(params).unwrap();
    LifecycleTrigger::new(TransformEngine::with_defaults(), Arc::new(store))
}

fn enabled() -> LifecycleTrigger {
    trigger(json!({ "autoresize": "1", "width": 50, "height": 25 }))
}

#[test]
fn new_media_file_is_resized_from_stored_options() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.png", 300, 200);
    let file = MediaFileRef::from_path(&path);

    let outcome = enabled().on_content_saved(MEDIA_FILE_CONTEXT, &file, true).unwrap();

    match outcome {
        TriggerOutcome::Applied(report) => assert_eq!((report.width, report.height), (50, 25)),
        other => panic!("expected Applied, got {other:?}"),
    }
    assert_eq!(dimensions(&path), (50, 25));
}

#[test]
fn existing_files_and_other_contexts_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.png", 30, 20);
    let file = MediaFileRef::from_path(&path);
    let trigger = enabled();

    assert_eq!(
        trigger.on_content_saved(MEDIA_FILE_CONTEXT, &file, false).unwrap(),
        TriggerOutcome::NotApplicable
    );
    assert_eq!(
        trigger.on_content_saved("content.article", &file, true).unwrap(),
        TriggerOutcome::NotApplicable
    );
    assert_eq!(dimensions(&path), (30, 20));
}

#[test]
fn host_media_context_string_triggers_the_hook() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.jpg", 30, 20);
    let file = MediaFileRef::from_path(&path);
    let trigger = enabled();

    assert_eq!(
        trigger.on_content_saved("media.file", &file, true).unwrap(),
        TriggerOutcome::NotApplicable
    );
    assert!(matches!(
        trigger.on_content_saved("com_media.file", &file, true).unwrap(),
        TriggerOutcome::Applied(_)
    ));
    assert_eq!(dimensions(&path), (50, 25));
}

#[test]
fn disabled_auto_apply_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.jpg", 30, 20);
    let before = fs::read(&path).unwrap();
    let file = MediaFileRef::from_path(&path);

    for params in [json!({ "width": 5, "height": 5 }), json!({ "autoresize": "0", "width": 5, "height": 5 })] {
        let outcome = trigger(params).on_content_saved(MEDIA_FILE_CONTEXT, &file, true).unwrap();
        assert_eq!(outcome, TriggerOutcome::Disabled);
    }
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn extensions_outside_the_allow_list_are_skipped_silently() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.bmp", 30, 20);
    let before = fs::read(&path).unwrap();

    let outcome = enabled()
        .on_content_saved(MEDIA_FILE_CONTEXT, &MediaFileRef::from_path(&path), true)
        .unwrap();

    assert_eq!(outcome, TriggerOutcome::UnsupportedExtension("bmp".into()));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn extension_is_taken_from_the_saved_path() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.GIF", 30, 20);
    let file = MediaFileRef::new(&path, "", true, MEDIA_FILE_CONTEXT);

    let outcome = enabled().on_content_saved(MEDIA_FILE_CONTEXT, &file, true).unwrap();

    assert!(matches!(outcome, TriggerOutcome::Applied(_)));
    assert_eq!(dimensions(&path), (50, 25));
}

#[test]
fn processing_failures_propagate() {
    let dir = TempDir::new().unwrap();
    let corrupt = write_garbage(dir.path(), "upload.jpg");
    let err = enabled()
        .on_content_saved(MEDIA_FILE_CONTEXT, &MediaFileRef::from_path(&corrupt), true)
        .unwrap_err();
    assert!(matches!(err, MediaError::CorruptData(_)));

    let path = write_image(dir.path(), "upload.png", 30, 20);
    let before = fs::read(&path).unwrap();
    let err = trigger(json!({ "autoresize": true, "width": 40 }))
        .on_content_saved(MEDIA_FILE_CONTEXT, &MediaFileRef::from_path(&path), true)
        .unwrap_err();
    assert!(matches!(err, MediaError::InvalidOption { name, .. } if name == "height"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn custom_rule_selects_operation_and_switch() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "upload.png", 30, 20);
    let store = JsonConfigStore::from_value(json!({ "autoscale": 1, "width": 6, "height": 6 })).unwrap();
    let rule = AutoApplyRule {
        operation: "resize".into(),
        enabled_key: "autoscale".into(),
    };

    let outcome = LifecycleTrigger::with_rule(TransformEngine::with_defaults(), Arc::new(store), rule)
        .on_content_saved(MEDIA_FILE_CONTEXT, &MediaFileRef::from_path(&path), true)
        .unwrap();

    assert!(matches!(outcome, TriggerOutcome::Applied(_)));
    assert_eq!(dimensions(&path), (6, 6));
}
