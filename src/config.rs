use serde_json::{Map, Value};

use crate::{errors::PluginError, options::UpdateOptions};

/// Field name used when the caller does not configure one.
pub const DEFAULT_FIELD_NAME: &str = "tags";

/// Configuration for one collection field.
///
/// Built once, validated once when the plugin is applied, and immutable
/// afterwards; it fully determines the derived method names and every
/// update the generated operations issue.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Name the field is registered under on the schema.
    pub field_name: String,
    /// Whether the store should index the field's elements.
    pub is_indexed: bool,
    /// Deduplicate elements on add (`$addToSet`) instead of appending (`$push`).
    pub is_unique: bool,
    /// Maximum element count; values `<= 0` mean unlimited.
    pub max_length: i64,
    /// Per-element options forwarded verbatim into the field definition.
    pub element_options: Map<String, Value>,
    /// Default update options, merged with per-call overrides on every write.
    pub update_options: UpdateOptions,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let mut element_options = Map::new();
        element_options.insert("type".to_string(), Value::String("string".to_string()));
        Self {
            field_name: DEFAULT_FIELD_NAME.to_string(),
            is_indexed: false,
            is_unique: true,
            max_length: -1,
            element_options,
            update_options: UpdateOptions::default(),
        }
    }
}

impl FieldConfig {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::default()
        }
    }

    pub fn with_indexed(mut self, is_indexed: bool) -> Self {
        self.is_indexed = is_indexed;
        self
    }

    pub fn with_unique(mut self, is_unique: bool) -> Self {
        self.is_unique = is_unique;
        self
    }

    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_element_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.element_options.insert(key.into(), value);
        self
    }

    pub fn with_update_options(mut self, update_options: UpdateOptions) -> Self {
        self.update_options = update_options;
        self
    }

    /// Returns `true` when a max-length rule should be attached.
    pub fn has_length_limit(&self) -> bool {
        self.max_length > 0
    }

    /// Checked once at plugin-apply time; generated operations rely on it.
    pub fn validate(&self) -> Result<(), PluginError> {
        if self.field_name.is_empty() {
            return Err(PluginError::InvalidConfig {
                message: "field name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
