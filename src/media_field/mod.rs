//! Data side of the media-picker form field.
//!
//! Rendering is left to the host; this module decides what the picker shows: whether the
//! user may see it at all, which folder it opens in and which asset it is bound to.

mod config;
mod directory;
mod layout;

pub use config::{FieldMode, MediaFieldConfig};
pub use directory::{UserContext, php_date, translate_directory};
pub use layout::{
    Authorizer, CREATE_CAPABILITY, FieldContext, FieldView, LayoutData, MEDIA_SCOPE, MediaField,
};
