/// Options forwarded to the store with every update.
///
/// The defaults mirror the store's `new`/`upsert`/`multi` trio: return the
/// post-update document, create a document when the query matches nothing,
/// and let batch operations touch every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Return the post-update document rather than the pre-update one.
    pub return_updated: bool,
    /// Create a document when the query matches nothing.
    pub upsert: bool,
    /// Apply batch updates to every matching document.
    pub multi: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            return_updated: true,
            upsert: true,
            multi: true,
        }
    }
}

impl UpdateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_return_updated(mut self, return_updated: bool) -> Self {
        self.return_updated = return_updated;
        self
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Shallow-merge a per-call override onto these defaults.
    ///
    /// Always returns a fresh value; the stored defaults are never mutated,
    /// so overrides cannot leak into later calls.
    pub fn merged_with(&self, overrides: &UpdateOptionsPatch) -> UpdateOptions {
        UpdateOptions {
            return_updated: overrides.return_updated.unwrap_or(self.return_updated),
            upsert: overrides.upsert.unwrap_or(self.upsert),
            multi: overrides.multi.unwrap_or(self.multi),
        }
    }
}

/// Per-call override for [`UpdateOptions`]; unset keys keep the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptionsPatch {
    pub return_updated: Option<bool>,
    pub upsert: Option<bool>,
    pub multi: Option<bool>,
}

impl UpdateOptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_return_updated(mut self, return_updated: bool) -> Self {
        self.return_updated = Some(return_updated);
        self
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = Some(upsert);
        self
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = Some(multi);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_new_upsert_multi() {
        let options = UpdateOptions::default();
        assert!(options.return_updated);
        assert!(options.upsert);
        assert!(options.multi);
    }

    #[test]
    fn override_wins_per_key() {
        let defaults = UpdateOptions::default();
        let merged = defaults.merged_with(&UpdateOptionsPatch::new().with_upsert(false));
        assert!(!merged.upsert);
        assert!(merged.return_updated);
        assert!(merged.multi);
    }

    #[test]
    fn merge_never_touches_the_default() {
        let defaults = UpdateOptions::default();
        let _ = defaults.merged_with(&UpdateOptionsPatch::new().with_upsert(false).with_multi(false));
        let _ = defaults.merged_with(&UpdateOptionsPatch::new().with_return_updated(false));
        // Repeated merges observe the same defaults every time.
        assert_eq!(defaults, UpdateOptions::default());
        let merged = defaults.merged_with(&UpdateOptionsPatch::new());
        assert_eq!(merged, defaults);
    }
}
