// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! String-keyed configuration provider.
//!
//! The host framework hands configuration over as a JSON document of
//! key/value items. This module flattens that document into a string-keyed
//! lookup with an existence predicate, which is all the settings layer
//! needs.
//!
//! Two item shapes are accepted, matching what hosts actually send:
//!
//! - plain scalars: `{"ip": "10.0.0.5", "port": 102}`
//! - item objects carrying metadata: `{"ip": {"value": "10.0.0.5",
//!   "description": "..."}}`, where the `value` field wins and `default`
//!   is the fallback when no `value` is present.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// ConfigProvider
// =============================================================================

/// A string-keyed view over a JSON configuration document.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    items: HashMap<String, String>,
}

impl ConfigProvider {
    /// Creates an empty provider (every lookup misses).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a provider from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::NotAnObject`] when the document root is not an object.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let value: JsonValue =
            serde_json::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Builds a provider from an already parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotAnObject`] when the root is not an object.
    pub fn from_json_value(value: JsonValue) -> ConfigResult<Self> {
        let object = match value {
            JsonValue::Object(map) => map,
            other => {
                return Err(ConfigError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };

        let mut items = HashMap::with_capacity(object.len());
        for (key, item) in object {
            if let Some(value) = item_value(&item) {
                items.insert(key, value);
            }
        }

        Ok(Self { items })
    }

    /// Returns `true` if the given key is present.
    pub fn item_exists(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Returns the value for the given key, if present.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the provider holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Extracts the usable string value of a configuration item.
///
/// Nested item objects resolve through their `value` (then `default`)
/// field; arrays and objects without either are skipped.
fn item_value(item: &JsonValue) -> Option<String> {
    match item {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Object(map) => map
            .get("value")
            .or_else(|| map.get("default"))
            .and_then(item_value),
        JsonValue::Null | JsonValue::Array(_) => None,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_scalars() {
        let provider =
            ConfigProvider::from_json_str(r#"{"ip": "10.0.0.5", "port": 102, "flag": true}"#)
                .unwrap();

        assert!(provider.item_exists("ip"));
        assert_eq!(provider.get_value("ip"), Some("10.0.0.5"));
        assert_eq!(provider.get_value("port"), Some("102"));
        assert_eq!(provider.get_value("flag"), Some("true"));
        assert!(!provider.item_exists("missing"));
        assert_eq!(provider.get_value("missing"), None);
    }

    #[test]
    fn test_item_objects_resolve_value_then_default() {
        let provider = ConfigProvider::from_json_str(
            r#"{
                "ip": {"value": "192.168.1.20", "default": "127.0.0.1"},
                "port": {"default": "102", "description": "server port"}
            }"#,
        )
        .unwrap();

        assert_eq!(provider.get_value("ip"), Some("192.168.1.20"));
        assert_eq!(provider.get_value("port"), Some("102"));
    }

    #[test]
    fn test_items_without_value_are_skipped() {
        let provider = ConfigProvider::from_json_str(
            r#"{"meta": {"description": "no value here"}, "list": [1, 2]}"#,
        )
        .unwrap();

        assert!(!provider.item_exists("meta"));
        assert!(!provider.item_exists("list"));
        assert!(provider.is_empty());
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = ConfigProvider::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { found: "array" }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ConfigProvider::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
