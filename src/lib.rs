//! strcoll — schema plugin for an ordered string-collection field.
//!
//! Attaching the plugin to a schema registers one collection field (an
//! ordered array of scalar elements) plus seven derived operations
//! (`get`/`add`/`batchAdd`/`remove`/`batchRemove`/`replace`/`batchReplace`)
//! that run against an external document store through the
//! [`DocumentStore`] contract.
//!
//! ```no_run
//! use serde_json::json;
//! use strcoll::{FieldConfig, Schema, attach};
//!
//! # async fn demo(store: &mut impl strcoll::DocumentStore) -> Result<(), strcoll::PluginError> {
//! let mut schema = Schema::new();
//! let tags = attach(&mut schema, FieldConfig::default())?;
//!
//! tags.add(store, &json!({ "_id": "post-1" }), &[json!("rust")]).await?;
//! let current = tags.get(store, Some(&json!({ "_id": "post-1" }))).await?;
//! # let _ = current;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod naming;
pub mod options;
pub mod patch;
pub mod plugin;
pub mod schema;
pub mod store;

pub use config::{DEFAULT_FIELD_NAME, FieldConfig};
pub use errors::{PluginError, ValidationError, ValidationIssue, ValidationResult};
pub use naming::{MethodNames, OperationKind, upper_first};
pub use options::{UpdateOptions, UpdateOptionsPatch};
pub use patch::{OperationMode, PatchAction, UpdateOperator, UpdatePatch};
pub use plugin::{CollectionField, attach};
pub use schema::{FieldDefinition, OperationBinding, Schema, SchemaRegistrar, ValidationRule, length_rule};
pub use store::{DocumentStore, UpdateSummary};
