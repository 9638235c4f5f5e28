//! The flat query-parameter mapping exchanged with the host routing layer.
//!
//! The wire convention is three-state and the distinction is load-bearing:
//! a key holding a string is present, a key holding `null` is explicitly
//! absent (the router must drop its current value), and a key missing from
//! the map is untouched (the router keeps whatever it has). Collapsing
//! `Absent` into "missing" is exactly the bug the explicit null exists to
//! prevent: stale parameter values surviving a navigation to another
//! entity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value state for one parameter key that IS present in the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Comma-joined string of one or more values.
    Present(String),
    /// Explicit absence, serialized as JSON `null`.
    Absent,
}

impl ParamValue {
    pub fn as_present(&self) -> Option<&str> {
        match self {
            ParamValue::Present(v) => Some(v),
            ParamValue::Absent => None,
        }
    }
}

/// Ordered string-keyed parameter mapping. Insertion order is preserved,
/// and re-inserting an existing key overwrites the value in place without
/// moving the key, matching the host's object semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(IndexMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ParamValue::Present(value.into()));
    }

    pub fn set_absent(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), ParamValue::Absent);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ParamValue)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Projection result in the exact shape the host routing layer consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedParams {
    #[serde(rename = "queryParams")]
    pub query_params: QueryParams,
}
