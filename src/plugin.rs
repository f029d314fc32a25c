use log::debug;
use serde_json::{Map, Value};

use crate::{
    config::FieldConfig,
    errors::PluginError,
    naming::MethodNames,
    options::UpdateOptionsPatch,
    patch::{OperationMode, PatchAction, UpdatePatch},
    schema::{FieldDefinition, OperationBinding, SchemaRegistrar, length_rule},
    store::{DocumentStore, UpdateSummary},
};

/// Attach a collection field to `schema` and derive its operation set.
///
/// Registers the field definition (element options, index flag, optional
/// length rule) and the seven derived method names on the schema's
/// model-level namespace, then returns the handle the operations run
/// through. Applying the plugin again with a different field name yields an
/// independent field and method set; reusing a field name is unguarded.
pub fn attach<S: SchemaRegistrar>(schema: &mut S, config: FieldConfig) -> Result<CollectionField, PluginError> {
    config.validate()?;

    let methods = MethodNames::derive(&config.field_name);
    let definition = FieldDefinition {
        name: config.field_name.clone(),
        indexed: config.is_indexed,
        element_options: config.element_options.clone(),
        rules: length_rule(&config.field_name, config.max_length).into_iter().collect(),
    };
    schema.add_field(definition);
    for (kind, name) in methods.iter() {
        schema.register_operation(
            name,
            OperationBinding {
                kind,
                field_name: config.field_name.clone(),
            },
        );
    }

    debug!("attached collection field '{}'", config.field_name);
    Ok(CollectionField { config, methods })
}

/// Handle for one attached collection field.
///
/// The operation set is a closed enum compiled into explicit methods; only
/// the public names in [`MethodNames`] vary with the configured field name.
/// Each method is one asynchronous round trip to the store, with no internal
/// locking or retries.
#[derive(Debug, Clone)]
pub struct CollectionField {
    config: FieldConfig,
    methods: MethodNames,
}

impl CollectionField {
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn method_names(&self) -> &MethodNames {
        &self.methods
    }

    fn field(&self) -> &str {
        &self.config.field_name
    }

    /// Fetch the field's value from the first document matching `query`.
    ///
    /// An absent query matches any document. Resolves to `None` when no
    /// document matches or the matched document lacks the field; otherwise
    /// the field's value, which may be an empty array.
    pub async fn get<S: DocumentStore>(
        &self,
        store: &mut S,
        query: Option<&Value>,
    ) -> Result<Option<Value>, PluginError> {
        let match_any = Value::Object(Map::new());
        let query = query.unwrap_or(&match_any);
        debug!("{}: find_one projected to '{}'", self.methods.get, self.field());
        let document = store.find_one(query, &[self.field()]).await?;
        Ok(document.and_then(|document| document.get(self.field()).cloned()))
    }

    /// Add `elements` to the first matching document's collection.
    ///
    /// Deduplicates against existing elements when the field is configured
    /// unique, appends otherwise. Returns the document as found after the
    /// update.
    pub async fn add<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
    ) -> Result<Option<Value>, PluginError> {
        self.add_with(store, query, elements, UpdateOptionsPatch::new()).await
    }

    pub async fn add_with<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<Option<Value>, PluginError> {
        self.run_singular(store, query, PatchAction::Add, elements, overrides).await
    }

    /// Add `elements` to every matching document's collection.
    pub async fn batch_add<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
    ) -> Result<UpdateSummary, PluginError> {
        self.batch_add_with(store, query, elements, UpdateOptionsPatch::new()).await
    }

    pub async fn batch_add_with<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<UpdateSummary, PluginError> {
        self.run_batch(store, query, PatchAction::Add, elements, overrides).await
    }

    /// Remove every occurrence of each listed element from the first
    /// matching document's collection.
    pub async fn remove<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
    ) -> Result<Option<Value>, PluginError> {
        self.remove_with(store, query, elements, UpdateOptionsPatch::new()).await
    }

    pub async fn remove_with<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<Option<Value>, PluginError> {
        self.run_singular(store, query, PatchAction::Remove, elements, overrides).await
    }

    /// Remove the listed elements from every matching document's collection.
    pub async fn batch_remove<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
    ) -> Result<UpdateSummary, PluginError> {
        self.batch_remove_with(store, query, elements, UpdateOptionsPatch::new()).await
    }

    pub async fn batch_remove_with<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<UpdateSummary, PluginError> {
        self.run_batch(store, query, PatchAction::Remove, elements, overrides).await
    }

    /// Replace the first matching document's collection wholesale.
    pub async fn replace<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
    ) -> Result<Option<Value>, PluginError> {
        self.replace_with(store, query, elements, UpdateOptionsPatch::new()).await
    }

    pub async fn replace_with<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<Option<Value>, PluginError> {
        self.run_singular(store, query, PatchAction::Replace, elements, overrides).await
    }

    /// Replace every matching document's collection wholesale.
    pub async fn batch_replace<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
    ) -> Result<UpdateSummary, PluginError> {
        self.batch_replace_with(store, query, elements, UpdateOptionsPatch::new()).await
    }

    pub async fn batch_replace_with<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<UpdateSummary, PluginError> {
        self.run_batch(store, query, PatchAction::Replace, elements, overrides).await
    }

    async fn run_singular<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        action: PatchAction,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<Option<Value>, PluginError> {
        ensure_query(query)?;
        let options = self.config.update_options.merged_with(&overrides);
        let patch = UpdatePatch::build(action, self.field(), elements, self.config.is_unique);
        debug!(
            "{}: {} {} element(s) on '{}'",
            self.methods.name_of(action.kind(OperationMode::Singular)),
            patch.operator.as_str(),
            elements.len(),
            self.field(),
        );
        store.find_one_and_update(query, &patch.into_document(), options).await
    }

    async fn run_batch<S: DocumentStore>(
        &self,
        store: &mut S,
        query: &Value,
        action: PatchAction,
        elements: &[Value],
        overrides: UpdateOptionsPatch,
    ) -> Result<UpdateSummary, PluginError> {
        ensure_query(query)?;
        let options = self.config.update_options.merged_with(&overrides);
        let patch = UpdatePatch::build(action, self.field(), elements, self.config.is_unique);
        debug!(
            "{}: {} {} element(s) on '{}'",
            self.methods.name_of(action.kind(OperationMode::Batch)),
            patch.operator.as_str(),
            elements.len(),
            self.field(),
        );
        store.update_many(query, &patch.into_document(), options).await
    }
}

/// Mutating operations refuse empty queries before touching the store.
fn ensure_query(query: &Value) -> Result<(), PluginError> {
    let empty = match query {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty { Err(PluginError::EmptyQuery) } else { Ok(()) }
}
