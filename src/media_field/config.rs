use serde::{Deserialize, Serialize};

/// How the picker behaves for users without upload rights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Always show the picker
    #[default]
    Normal,
    /// Hide the picker from users who may not create media
    Strict,
}

/// Attributes of a media-picker form field.
///
/// Every attribute has a default, so a field declared with no attributes deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaFieldConfig {
    /// Form field holding the author's id
    pub author_field: String,
    /// Form field holding the asset id
    pub asset_field: String,
    /// Asset used when the form has none
    pub asset: String,
    /// Custom picker link
    pub link: String,
    /// Picker dialog width
    pub width: u32,
    /// Picker dialog height
    pub height: u32,
    pub mode: FieldMode,
    /// Preview style (e.g. "tooltip", "inline", "false")
    pub preview: String,
    /// Upload directory template, may hold `{userid}`, `{username}` or date tokens
    pub directory: String,
    /// Component whose media settings apply
    pub component: String,
    pub preview_width: u32,
    pub preview_height: u32,
}

impl Default for MediaFieldConfig {
    fn default() -> Self {
        Self {
            author_field: "created_by".to_string(),
            asset_field: "asset_id".to_string(),
            asset: String::new(),
            link: String::new(),
            width: 800,
            height: 500,
            mode: FieldMode::Normal,
            preview: String::new(),
            directory: String::new(),
            component: "com_media".to_string(),
            preview_width: 200,
            preview_height: 200,
        }
    }
}
