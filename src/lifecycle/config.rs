use std::path::Path;
use serde_json::{Map, Value};
use crate::core::OptionSet;
use crate::utils::{MediaError, MediaResult};

/// Read access to an operation's stored parameters.
pub trait ConfigStore: Send + Sync {
    /// Raw value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Every stored parameter as transform options.
    fn to_option_set(&self) -> OptionSet;

    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Reads `key` as a flag; see [`is_truthy`].
    fn get_flag(&self, key: &str, default: bool) -> bool {
        self.get(key).map(|v| is_truthy(&v)).unwrap_or(default)
    }
}

/// Loose boolean reading used for stored flags.
///
/// Stored parameters often hold `"1"`/`"0"` or `"true"` rather than JSON booleans.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// [`ConfigStore`] over a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonConfigStore {
    values: Map<String, Value>,
}

impl JsonConfigStore {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn from_value(value: Value) -> MediaResult<Self> {
        match value {
            Value::Object(values) => Ok(Self::new(values)),
            other => Err(MediaError::config(format!(
                "Plugin parameters must be a JSON object, got {other}"
            ))),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MediaError::config(format!("Cannot read {}: {e}", path.display())))?;
        let value = serde_json::from_str(&raw)
            .map_err(|e| MediaError::config(format!("Invalid JSON in {}: {e}", path.display())))?;
        Self::from_value(value)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn to_option_set(&self) -> OptionSet {
        OptionSet::from(self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_accept_stored_string_forms() {
        let store = JsonConfigStore::from_value(json!({
            "a": "1", "b": "0", "c": true, "d": "yes", "e": 0, "f": null
        }))
        .unwrap();

        assert!(store.get_flag("a", false));
        assert!(!store.get_flag("b", true));
        assert!(store.get_flag("c", false));
        assert!(store.get_flag("d", false));
        assert!(!store.get_flag("e", true));
        assert!(!store.get_flag("f", true));
        assert!(store.get_flag("missing", true));
    }

    #[test]
    fn option_set_mirrors_stored_values() {
        let store = JsonConfigStore::from_value(json!({ "width": 300, "height": "200" })).unwrap();
        let options = store.to_option_set();
        assert_eq!(options.require_positive_u32("width").unwrap(), 300);
        assert_eq!(options.require_positive_u32("height").unwrap(), 200);
        assert_eq!(store.get_or("quality", json!(80)), json!(80));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(matches!(
            JsonConfigStore::from_value(json!([1, 2])),
            Err(MediaError::Config(_))
        ));
    }
}
