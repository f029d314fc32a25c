/// The closed set of operations a collection field exposes.
///
/// The set is fixed at compile time; only the derived public names vary with
/// the configured field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Get,
    Add,
    BatchAdd,
    Remove,
    BatchRemove,
    Replace,
    BatchReplace,
}

impl OperationKind {
    pub const ALL: [OperationKind; 7] = [
        OperationKind::Get,
        OperationKind::Add,
        OperationKind::BatchAdd,
        OperationKind::Remove,
        OperationKind::BatchRemove,
        OperationKind::Replace,
        OperationKind::BatchReplace,
    ];

    /// Verb prefix used when deriving the public method name.
    pub fn verb(self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::Add => "add",
            OperationKind::BatchAdd => "batchAdd",
            OperationKind::Remove => "remove",
            OperationKind::BatchRemove => "batchRemove",
            OperationKind::Replace => "replace",
            OperationKind::BatchReplace => "batchReplace",
        }
    }

    /// Returns `true` for the operations that write through the store.
    pub fn is_mutation(self) -> bool {
        !matches!(self, OperationKind::Get)
    }
}

/// Uppercase the first character of a field name, leaving the rest untouched.
pub fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The seven public method names derived from a field name.
///
/// Derived once when the plugin is applied and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNames {
    pub get: String,
    pub add: String,
    pub batch_add: String,
    pub remove: String,
    pub batch_remove: String,
    pub replace: String,
    pub batch_replace: String,
}

impl MethodNames {
    /// Derive the method set for `field_name` as `"{verb}{UpperFirst(field_name)}"`.
    pub fn derive(field_name: &str) -> Self {
        let suffix = upper_first(field_name);
        Self {
            get: format!("get{suffix}"),
            add: format!("add{suffix}"),
            batch_add: format!("batchAdd{suffix}"),
            remove: format!("remove{suffix}"),
            batch_remove: format!("batchRemove{suffix}"),
            replace: format!("replace{suffix}"),
            batch_replace: format!("batchReplace{suffix}"),
        }
    }

    pub fn name_of(&self, kind: OperationKind) -> &str {
        match kind {
            OperationKind::Get => &self.get,
            OperationKind::Add => &self.add,
            OperationKind::BatchAdd => &self.batch_add,
            OperationKind::Remove => &self.remove,
            OperationKind::BatchRemove => &self.batch_remove,
            OperationKind::Replace => &self.replace,
            OperationKind::BatchReplace => &self.batch_replace,
        }
    }

    /// Iterate the method set in the fixed `OperationKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (OperationKind, &str)> {
        OperationKind::ALL.iter().map(move |kind| (*kind, self.name_of(*kind)))
    }
}
