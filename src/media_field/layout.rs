use std::path::Path;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use super::config::{FieldMode, MediaFieldConfig};
use super::directory::{UserContext, translate_directory};

/// Capability required to upload media.
pub const CREATE_CAPABILITY: &str = "core.create";
/// Access scope the upload capability is checked against.
pub const MEDIA_SCOPE: &str = "com_media";

/// Access-control collaborator.
pub trait Authorizer {
    fn is_authorized(&self, capability: &str, scope: &str) -> bool;
}

/// Everything the field needs from its surroundings, passed in explicitly.
pub struct FieldContext<'a> {
    pub user: &'a UserContext,
    pub authorizer: &'a dyn Authorizer,
    /// Component handling the current request, used when no asset is known
    pub current_component: &'a str,
    /// Site root the field value is relative to
    pub site_root: &'a Path,
    /// The component's media root, relative to the site root (e.g. "images")
    pub image_path: &'a str,
    /// Current form values
    pub form: &'a Map<String, Value>,
    pub now: NaiveDateTime,
}

/// Data a renderer needs to draw the picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    pub value: Option<String>,
    pub asset: String,
    pub author_field: String,
    pub author_id: Option<Value>,
    pub folder: String,
    pub link: String,
    pub width: u32,
    pub height: u32,
    pub preview: String,
    pub preview_width: u32,
    pub preview_height: u32,
}

/// What the field shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum FieldView {
    /// Strict mode and the user may not upload
    UploadDenied,
    Picker(LayoutData),
}

/// A media-picker field bound to its declared configuration.
#[derive(Debug, Clone, Default)]
pub struct MediaField {
    config: MediaFieldConfig,
}

impl MediaField {
    pub fn new(config: MediaFieldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MediaFieldConfig {
        &self.config
    }

    /// Builds the view for the field's current `value`.
    pub fn layout_data(&self, value: Option<&str>, ctx: &FieldContext<'_>) -> FieldView {
        if self.config.mode == FieldMode::Strict
            && !ctx.authorizer.is_authorized(CREATE_CAPABILITY, MEDIA_SCOPE)
        {
            return FieldView::UploadDenied;
        }

        let value = value.filter(|v| !v.is_empty());

        FieldView::Picker(LayoutData {
            value: value.map(str::to_string),
            asset: self.asset(ctx),
            author_field: self.config.author_field.clone(),
            author_id: ctx.form.get(&self.config.author_field).cloned(),
            folder: self.folder(value, ctx),
            link: self.config.link.clone(),
            width: self.config.width,
            height: self.config.height,
            preview: self.config.preview.clone(),
            preview_width: self.config.preview_width,
            preview_height: self.config.preview_height,
        })
    }

    /// Form asset, then the declared asset, then the current component.
    fn asset(&self, ctx: &FieldContext<'_>) -> String {
        let from_form = ctx
            .form
            .get(&self.config.asset_field)
            .and_then(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

        from_form
            .or_else(|| Some(self.config.asset.clone()).filter(|a| !a.is_empty()))
            .unwrap_or_else(|| ctx.current_component.to_string())
    }

    /// Folder the picker opens in.
    ///
    /// An existing value wins: its directory, minus the leading segments it shares
    /// position-for-position with the media root. Otherwise the expanded directory template.
    fn folder(&self, value: Option<&str>, ctx: &FieldContext<'_>) -> String {
        if let Some(value) = value.filter(|v| ctx.site_root.join(v).exists()) {
            let root: Vec<&str> = ctx.image_path.split('/').collect();
            let mut segments: Vec<&str> = value
                .split('/')
                .enumerate()
                .filter(|(i, segment)| root.get(*i) != Some(segment))
                .map(|(_, segment)| segment)
                .collect();
            segments.pop();
            return segments.join("/");
        }

        translate_directory(&self.config.directory, ctx.user, ctx.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    struct Grants(bool);

    impl Authorizer for Grants {
        fn is_authorized(&self, capability: &str, scope: &str) -> bool {
            self.0 && capability == "core.create" && scope == "com_media"
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn picker(view: FieldView) -> LayoutData {
        match view {
            FieldView::Picker(data) => data,
            FieldView::UploadDenied => panic!("expected picker"),
        }
    }

    #[test]
    fn strict_mode_denies_users_without_create_rights() {
        let user = UserContext::new(7, "sam");
        let form = Map::new();
        let root = TempDir::new().unwrap();
        let ctx = FieldContext {
            user: &user,
            authorizer: &Grants(false),
            current_component: "articles",
            site_root: root.path(),
            image_path: "images",
            form: &form,
            now: now(),
        };

        let strict = MediaField::new(MediaFieldConfig {
            mode: FieldMode::Strict,
            ..Default::default()
        });
        assert_eq!(strict.layout_data(None, &ctx), FieldView::UploadDenied);

        let normal = MediaField::default();
        assert!(matches!(normal.layout_data(None, &ctx), FieldView::Picker(_)));

        let granted = FieldContext { authorizer: &Grants(true), ..ctx };
        assert!(matches!(strict.layout_data(None, &granted), FieldView::Picker(_)));
    }

    #[test]
    fn folder_comes_from_template_when_value_is_absent() {
        let user = UserContext::new(7, "sam");
        let form = Map::new();
        let root = TempDir::new().unwrap();
        let ctx = FieldContext {
            user: &user,
            authorizer: &Grants(true),
            current_component: "articles",
            site_root: root.path(),
            image_path: "images",
            form: &form,
            now: now(),
        };

        let field = MediaField::new(MediaFieldConfig {
            directory: "users/{username}/{Y}".into(),
            ..Default::default()
        });
        let data = picker(field.layout_data(Some("images/gone.png"), &ctx));
        assert_eq!(data.folder, "users/sam/2024");
        assert_eq!(data.asset, "articles");
    }

    #[test]
    fn existing_value_sets_folder_relative_to_media_root() {
        let user = UserContext::new(7, "sam");
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("images/banners/2024")).unwrap();
        std::fs::write(root.path().join("images/banners/2024/top.jpg"), b"x").unwrap();
        let form = json!({ "created_by": 7, "asset_id": "91" })
            .as_object()
            .cloned()
            .unwrap();
        let ctx = FieldContext {
            user: &user,
            authorizer: &Grants(true),
            current_component: "articles",
            site_root: root.path(),
            image_path: "images",
            form: &form,
            now: now(),
        };

        let data = picker(MediaField::default().layout_data(Some("images/banners/2024/top.jpg"), &ctx));
        assert_eq!(data.folder, "banners/2024");
        assert_eq!(data.asset, "91");
        assert_eq!(data.author_id, Some(json!(7)));
        assert_eq!(data.value.as_deref(), Some("images/banners/2024/top.jpg"));
        assert_eq!((data.width, data.height), (800, 500));
    }

    #[test]
    fn declared_asset_is_used_before_current_component() {
        let user = UserContext::new(1, "a");
        let form = Map::new();
        let root = TempDir::new().unwrap();
        let ctx = FieldContext {
            user: &user,
            authorizer: &Grants(true),
            current_component: "articles",
            site_root: root.path(),
            image_path: "images",
            form: &form,
            now: now(),
        };
        let field = MediaField::new(MediaFieldConfig {
            asset: "12".into(),
            ..Default::default()
        });
        assert_eq!(picker(field.layout_data(None, &ctx)).asset, "12");
    }
}
