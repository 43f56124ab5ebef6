//! Scope declarations and value overrides
//!
//! - ScopeSpec: ordered list of scope keys, lowest priority first
//! - ScopeValues: per-key overrides used instead of the record's live value

use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Ordered list of relation or attribute names siblings must share
///
/// Later keys take priority when choosing the root criteria. An empty spec
/// means every record of the base type is a sibling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScopeSpec(Vec<String>);

impl ScopeSpec {
    /// Create a spec from keys in declaration order
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        ScopeSpec(keys.into_iter().map(Into::into).collect())
    }

    /// The empty spec
    pub fn empty() -> Self {
        ScopeSpec(Vec::new())
    }

    /// Keys in declaration order
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Iterate keys in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// A scope is written either as a single key or as a list of keys.
impl<'de> Deserialize<'de> for ScopeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(key) => ScopeSpec(vec![key]),
            Repr::Many(keys) => ScopeSpec(keys),
        })
    }
}

impl From<&str> for ScopeSpec {
    fn from(key: &str) -> Self {
        ScopeSpec(vec![key.to_string()])
    }
}

impl From<String> for ScopeSpec {
    fn from(key: String) -> Self {
        ScopeSpec(vec![key])
    }
}

impl<const N: usize> From<[&str; N]> for ScopeSpec {
    fn from(keys: [&str; N]) -> Self {
        ScopeSpec::new(keys)
    }
}

impl From<&[&str]> for ScopeSpec {
    fn from(keys: &[&str]) -> Self {
        ScopeSpec::new(keys.iter().copied())
    }
}

impl From<Vec<&str>> for ScopeSpec {
    fn from(keys: Vec<&str>) -> Self {
        ScopeSpec::new(keys)
    }
}

impl From<Vec<String>> for ScopeSpec {
    fn from(keys: Vec<String>) -> Self {
        ScopeSpec(keys)
    }
}

impl<'a> IntoIterator for &'a ScopeSpec {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Override values keyed by scope key
///
/// A key that is present overrides the live value, even when the override
/// is `Value::Null`. Absent keys fall back to reading the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeValues(BTreeMap<String, Value>);

impl ScopeValues {
    /// No overrides
    pub fn new() -> Self {
        ScopeValues(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an override
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Override for a key, if any
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// True if the key is overridden
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True if there are no overrides
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ScopeValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        ScopeValues(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
