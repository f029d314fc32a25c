use serde_json::{Value, json};

use crate::naming::OperationKind;

/// Store-level update operator, spelled the way the store's wire format
/// expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    AddToSet,
    Push,
    PullAll,
    Set,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::AddToSet => "$addToSet",
            UpdateOperator::Push => "$push",
            UpdateOperator::PullAll => "$pullAll",
            UpdateOperator::Set => "$set",
        }
    }
}

/// What a mutating operation does to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    Add,
    Remove,
    Replace,
}

/// Whether an operation targets the first match or every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Singular,
    Batch,
}

impl PatchAction {
    /// Map an action/mode pair back to its public operation kind.
    pub fn kind(self, mode: OperationMode) -> OperationKind {
        match (mode, self) {
            (OperationMode::Singular, PatchAction::Add) => OperationKind::Add,
            (OperationMode::Singular, PatchAction::Remove) => OperationKind::Remove,
            (OperationMode::Singular, PatchAction::Replace) => OperationKind::Replace,
            (OperationMode::Batch, PatchAction::Add) => OperationKind::BatchAdd,
            (OperationMode::Batch, PatchAction::Remove) => OperationKind::BatchRemove,
            (OperationMode::Batch, PatchAction::Replace) => OperationKind::BatchReplace,
        }
    }
}

/// One update payload, built per call, handed to the store, then discarded.
///
/// Singular and batch variants of the same action share the same payload;
/// only the dispatch endpoint and options differ.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePatch {
    pub operator: UpdateOperator,
    pub field: String,
    pub elements: Vec<Value>,
}

impl UpdatePatch {
    /// Build the patch for `action` on `field`.
    ///
    /// Add picks `$addToSet` or `$push` depending on `is_unique`; remove
    /// always uses `$pullAll` (every occurrence of each listed value);
    /// replace writes the collection wholesale via `$set`.
    pub fn build(action: PatchAction, field: &str, elements: &[Value], is_unique: bool) -> Self {
        let operator = match action {
            PatchAction::Add if is_unique => UpdateOperator::AddToSet,
            PatchAction::Add => UpdateOperator::Push,
            PatchAction::Remove => UpdateOperator::PullAll,
            PatchAction::Replace => UpdateOperator::Set,
        };
        Self {
            operator,
            field: field.to_string(),
            elements: elements.to_vec(),
        }
    }

    /// Render the wire document handed to the store.
    pub fn into_document(self) -> Value {
        let payload = match self.operator {
            UpdateOperator::AddToSet | UpdateOperator::Push => json!({ "$each": self.elements }),
            UpdateOperator::PullAll | UpdateOperator::Set => Value::Array(self.elements),
        };
        json!({ self.operator.as_str(): { self.field: payload } })
    }
}
