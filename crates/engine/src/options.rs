//! Per-call sibling options

use siblings_core::{ScopeSpec, ScopeValues, Value};

/// Options accepted by every sibling operation
///
/// `scope: None` falls back to the record type's default sibling scope; an
/// explicit scope, even an empty one, always wins over the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiblingOptions {
    /// Explicit scope
    pub scope: Option<ScopeSpec>,
    /// Overrides for the record's own values
    pub scope_values: ScopeValues,
    /// Overrides for the other record's values (comparison and mutation)
    pub other_scope_values: ScopeValues,
}

impl SiblingOptions {
    /// Options with no scope, no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit scope (single key or ordered keys)
    pub fn scope(mut self, scope: impl Into<ScopeSpec>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Override the record's value for one key
    pub fn scope_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.scope_values.insert(key, value);
        self
    }

    /// Override the other record's value for one key
    pub fn other_scope_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.other_scope_values.insert(key, value);
        self
    }

    /// Replace all of the record's overrides
    pub fn scope_values(mut self, values: ScopeValues) -> Self {
        self.scope_values = values;
        self
    }

    /// Replace all of the other record's overrides
    pub fn other_scope_values(mut self, values: ScopeValues) -> Self {
        self.other_scope_values = values;
        self
    }
}
