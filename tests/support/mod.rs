//! In-memory [`DocumentStore`] used by the integration tests.
//!
//! Implements just enough of the store's query/update dialect for the
//! generated operations: equality and `$in` matching, the four update
//! operators, projection, upsert seeding, and save-time enforcement of the
//! schema's validation rules.

use std::sync::Once;

use nanoid::nanoid;
use serde_json::{Map, Value};
use strcoll::{DocumentStore, PluginError, Schema, UpdateOptions, UpdateSummary};

static INIT_LOGGING: Once = Once::new();

pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub struct MemoryStore {
    documents: Vec<Value>,
    schema: Option<Schema>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            schema: None,
        }
    }

    /// A store that enforces the schema's validation rules on every write.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            documents: Vec::new(),
            schema: Some(schema),
        }
    }

    /// Insert a document directly, bypassing validation.
    pub fn seed(&mut self, document: Value) {
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    /// First stored document matching `query`, unprojected.
    pub fn find(&self, query: &Value) -> Option<&Value> {
        self.documents.iter().find(|document| matches(query, document))
    }

    fn check(&self, document: &Value) -> Result<(), PluginError> {
        if let Some(schema) = &self.schema {
            schema.validate_document(document)?;
        }
        Ok(())
    }
}

fn matches(query: &Value, document: &Value) -> bool {
    let Some(conditions) = query.as_object() else {
        return false;
    };
    conditions.iter().all(|(key, condition)| {
        let actual = document.get(key);
        if let Some(spec) = condition.as_object()
            && let Some(candidates) = spec.get("$in").and_then(Value::as_array)
        {
            return actual.is_some_and(|value| candidates.contains(value));
        }
        actual == Some(condition)
    })
}

fn array_field<'a>(document: &'a mut Value, field: &str) -> &'a mut Vec<Value> {
    let fields = document.as_object_mut().expect("document is an object");
    fields
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .expect("field holds an array")
}

fn apply_patch(document: &mut Value, patch: &Value) {
    let Some(operations) = patch.as_object() else {
        return;
    };
    for (operator, spec) in operations {
        let Some(fields) = spec.as_object() else {
            continue;
        };
        for (field, payload) in fields {
            match operator.as_str() {
                "$addToSet" => {
                    let elements = each_elements(payload);
                    let target = array_field(document, field);
                    for element in elements {
                        if !target.contains(&element) {
                            target.push(element);
                        }
                    }
                }
                "$push" => {
                    let elements = each_elements(payload);
                    array_field(document, field).extend(elements);
                }
                "$pullAll" => {
                    let removals = payload.as_array().cloned().unwrap_or_default();
                    array_field(document, field).retain(|element| !removals.contains(element));
                }
                "$set" => {
                    document
                        .as_object_mut()
                        .expect("document is an object")
                        .insert(field.clone(), payload.clone());
                }
                other => panic!("unsupported update operator: {other}"),
            }
        }
    }
}

fn each_elements(payload: &Value) -> Vec<Value> {
    payload
        .get("$each")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Seed document for an upsert: the query's equality pairs plus a fresh id.
fn seed_document(query: &Value) -> Value {
    let mut document = Map::new();
    if let Some(conditions) = query.as_object() {
        for (key, condition) in conditions {
            if !condition.is_object() {
                document.insert(key.clone(), condition.clone());
            }
        }
    }
    document
        .entry("_id".to_string())
        .or_insert_with(|| Value::String(nanoid!()));
    Value::Object(document)
}

impl DocumentStore for MemoryStore {
    async fn find_one(&mut self, query: &Value, projection: &[&str]) -> Result<Option<Value>, PluginError> {
        let Some(document) = self.documents.iter().find(|document| matches(query, document)) else {
            return Ok(None);
        };
        if projection.is_empty() {
            return Ok(Some(document.clone()));
        }
        let mut projected = Map::new();
        if let Some(fields) = document.as_object() {
            for (key, value) in fields {
                if key == "_id" || projection.contains(&key.as_str()) {
                    projected.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(Some(Value::Object(projected)))
    }

    async fn find_one_and_update(
        &mut self,
        query: &Value,
        patch: &Value,
        options: UpdateOptions,
    ) -> Result<Option<Value>, PluginError> {
        match self.documents.iter().position(|document| matches(query, document)) {
            Some(index) => {
                let before = self.documents[index].clone();
                let mut after = before.clone();
                apply_patch(&mut after, patch);
                self.check(&after)?;
                self.documents[index] = after.clone();
                Ok(Some(if options.return_updated { after } else { before }))
            }
            None if options.upsert => {
                let mut created = seed_document(query);
                apply_patch(&mut created, patch);
                self.check(&created)?;
                self.documents.push(created.clone());
                Ok(Some(created))
            }
            None => Ok(None),
        }
    }

    async fn update_many(
        &mut self,
        query: &Value,
        patch: &Value,
        options: UpdateOptions,
    ) -> Result<UpdateSummary, PluginError> {
        let mut summary = UpdateSummary::default();
        let mut targets: Vec<usize> = self
            .documents
            .iter()
            .enumerate()
            .filter(|(_, document)| matches(query, document))
            .map(|(index, _)| index)
            .collect();
        if !options.multi {
            targets.truncate(1);
        }

        if targets.is_empty() {
            if options.upsert {
                let mut created = seed_document(query);
                apply_patch(&mut created, patch);
                self.check(&created)?;
                self.documents.push(created);
                summary.upserted = 1;
            }
            return Ok(summary);
        }

        for index in targets {
            summary.matched += 1;
            let mut after = self.documents[index].clone();
            apply_patch(&mut after, patch);
            self.check(&after)?;
            if after != self.documents[index] {
                summary.modified += 1;
            }
            self.documents[index] = after;
        }
        Ok(summary)
    }

    async fn create(&mut self, document: Value) -> Result<Value, PluginError> {
        self.check(&document)?;
        self.documents.push(document.clone());
        Ok(document)
    }
}
