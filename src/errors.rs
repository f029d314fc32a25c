use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by collection-field operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A mutating operation was invoked with an empty or missing query.
    #[error("query should not be empty")]
    EmptyQuery,

    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// The field configuration was rejected at plugin-apply time.
    #[error("invalid field configuration: {message}")]
    InvalidConfig { message: String },

    /// Underlying document-store call failed.
    #[error("store error: {message}")]
    Store { message: Cow<'static, str> },

    /// Catch-all for failures that fit no other kind.
    #[error("{message}")]
    Other { message: Cow<'static, str> },
}

impl PluginError {
    /// Wrap a store-side failure so it can travel through the plugin unchanged.
    pub fn store(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

/// Collection of validation issues encountered while preparing a write.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single field.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for fallible validation steps.
pub type ValidationResult<T> = Result<T, ValidationError>;
