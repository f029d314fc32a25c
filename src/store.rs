use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::PluginError, options::UpdateOptions};

/// Aggregate result of a batch update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub matched: u64,
    pub modified: u64,
    pub upserted: u64,
}

/// Narrow contract over the external persistence engine.
///
/// Queries, patches, and documents travel as `serde_json::Value`; their exact
/// semantics (query matching, operator application, casting) belong to the
/// store. Store failures propagate unchanged through every generated
/// operation.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Fetch the first document matching `query`, projected to the named
    /// fields when `projection` is non-empty.
    async fn find_one(&mut self, query: &Value, projection: &[&str]) -> Result<Option<Value>, PluginError>;

    /// Apply `patch` to the first document matching `query`. Returns the
    /// pre- or post-update document depending on `options.return_updated`,
    /// or `None` when nothing matched and upsert is disabled.
    async fn find_one_and_update(
        &mut self,
        query: &Value,
        patch: &Value,
        options: UpdateOptions,
    ) -> Result<Option<Value>, PluginError>;

    /// Apply `patch` to every document matching `query` (first match only
    /// when `options.multi` is false) and report aggregate counts.
    async fn update_many(
        &mut self,
        query: &Value,
        patch: &Value,
        options: UpdateOptions,
    ) -> Result<UpdateSummary, PluginError>;

    /// Persist a new document, returning it as stored.
    async fn create(&mut self, document: Value) -> Result<Value, PluginError>;
}
