//! Field filtering for nested records.
//!
//! A [`FilterSpec`] mirrors (a subset of) a record's shape: a leaf marker
//! at a key removes that field entirely, a sub-mapping recurses into the
//! matched sub-structure and removes only the nested leaves it names.
//! Filtering is pure (the input record is never mutated) and shape
//! mismatches are no-ops, never errors.

use std::collections::BTreeMap;

use serde_json::Value;

/// A filter specification mirroring (a subset of) a record's shape.
///
/// The JSON form uses `null` (conventionally; any non-object value works)
/// as the removal marker:
///
/// ```
/// use record_export_rs::export::filter::{FilterSpec, filter_fields};
/// use serde_json::json;
///
/// let spec = FilterSpec::from_value(&json!({
///     "body": null,
///     "location": { "placeId": null }
/// }));
/// let record = json!({
///     "id": 3,
///     "body": "Dangerous Body",
///     "location": { "label": "Cleveland", "placeId": "ChIJ..." }
/// });
///
/// assert_eq!(
///     filter_fields(&record, &spec),
///     json!({ "id": 3, "location": { "label": "Cleveland" } })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// Leaf marker: remove the matched field entirely.
    Remove,
    /// Recurse into the matched sub-structure.
    Fields(BTreeMap<String, FilterSpec>),
}

impl FilterSpec {
    /// The empty specification: filters nothing.
    pub fn empty() -> FilterSpec {
        FilterSpec::Fields(BTreeMap::new())
    }

    /// Builds a specification from its JSON form: an object recurses,
    /// anything else marks removal.
    pub fn from_value(value: &Value) -> FilterSpec {
        match value {
            Value::Object(fields) => FilterSpec::Fields(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), FilterSpec::from_value(child)))
                    .collect(),
            ),
            _ => FilterSpec::Remove,
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec::empty()
    }
}

/// Returns a copy of `record` with the paths named by `spec` removed.
///
/// - A key present in both with a leaf marker is omitted from the result.
/// - A key present in both with a sub-mapping recurses; when the value is
///   a list, every element is filtered independently, preserving order and
///   length.
/// - Keys named by `spec` but absent from the record are no-ops.
/// - Keys absent from `spec` are always preserved.
/// - The empty spec returns a structurally equal copy.
pub fn filter_fields(record: &Value, spec: &FilterSpec) -> Value {
    let FilterSpec::Fields(spec_fields) = spec else {
        // A bare removal marker names no key; nothing to prune.
        return record.clone();
    };

    match record {
        Value::Object(fields) => {
            let mut result = serde_json::Map::new();
            for (key, value) in fields {
                match spec_fields.get(key) {
                    None => {
                        result.insert(key.clone(), value.clone());
                    }
                    Some(FilterSpec::Remove) => {}
                    Some(sub) => {
                        result.insert(key.clone(), filter_fields(value, sub));
                    }
                }
            }
            Value::Object(result)
        }
        // A list under a sub-mapping filters element-wise.
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| filter_fields(item, spec))
                .collect(),
        ),
        other => other.clone(),
    }
}
