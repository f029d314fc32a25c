use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{
    errors::{ValidationError, ValidationIssue, ValidationResult},
    naming::OperationKind,
};

/// Validation rule attached to a collection field.
///
/// Only a bounded element count is supported; at most one rule is ever
/// attached per field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    MaxLength { limit: usize, message: String },
}

/// Build the optional max-length rule for a field.
///
/// `max_length <= 0` means unlimited, so no rule is produced. The rule always
/// compares against the configured limit.
pub fn length_rule(field_name: &str, max_length: i64) -> Option<ValidationRule> {
    if max_length <= 0 {
        return None;
    }
    Some(ValidationRule::MaxLength {
        limit: max_length as usize,
        message: format!("{field_name} exceeds the length limit of {max_length}"),
    })
}

/// Definition registered on the schema for one collection field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub indexed: bool,
    pub element_options: Map<String, Value>,
    pub rules: Vec<ValidationRule>,
}

impl FieldDefinition {
    /// Check a candidate field value against the attached rules.
    ///
    /// Stores call this at save time; rule violations surface to the caller
    /// as store-level validation errors.
    pub fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            match rule {
                ValidationRule::MaxLength { limit, message } => {
                    if let Some(elements) = value.as_array()
                        && elements.len() > *limit
                    {
                        issues.push(ValidationIssue::new(&self.name, "validation.length", message));
                    }
                }
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

/// Binding between a derived method name and the operation it performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationBinding {
    pub kind: OperationKind,
    pub field_name: String,
}

/// Contract the plugin uses to register fields and operations on a schema.
pub trait SchemaRegistrar {
    fn add_field(&mut self, definition: FieldDefinition);
    fn register_operation(&mut self, name: &str, binding: OperationBinding);
}

/// In-process schema recording registered fields and the model-level
/// operation namespace.
///
/// Re-registering the same field name overwrites the previous entry; guarding
/// against that is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldDefinition>,
    operations: HashMap<String, OperationBinding>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn operation(&self, name: &str) -> Option<&OperationBinding> {
        self.operations.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    pub fn operations(&self) -> impl Iterator<Item = (&str, &OperationBinding)> {
        self.operations.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    /// Validate every registered field present on `document`.
    pub fn validate_document(&self, document: &Value) -> ValidationResult<()> {
        let mut issues = Vec::new();
        for definition in self.fields.values() {
            if let Some(value) = document.get(&definition.name)
                && let Err(error) = definition.validate_value(value)
            {
                issues.extend(error.issues);
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

impl SchemaRegistrar for Schema {
    fn add_field(&mut self, definition: FieldDefinition) {
        self.fields.insert(definition.name.clone(), definition);
    }

    fn register_operation(&mut self, name: &str, binding: OperationBinding) {
        self.operations.insert(name.to_string(), binding);
    }
}
