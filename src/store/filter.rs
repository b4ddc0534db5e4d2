//! Field Filter Module
//!
//! Optional predicate over entity fields used by listing operations.

use serde_json::Value;

use crate::store::Entity;

// == Field Filter ==
/// Matches entities whose fields satisfy every condition.
///
/// String fields match by case-sensitive substring; all other JSON
/// values match by equality. An entity missing a named field never
/// matches. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    conditions: Vec<(String, Value)>,
}

impl FieldFilter {
    // == Constructor ==
    /// Creates an empty filter that matches all entities.
    pub fn new() -> Self {
        Self::default()
    }

    // == With Field ==
    /// Adds a condition on a field, consuming and returning the filter.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.conditions.push((name.into(), value));
        self
    }

    // == Is Empty ==
    /// Returns true if the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    // == Matches ==
    /// Returns true if the entity satisfies every condition.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.conditions.iter().all(|(name, expected)| {
            match (entity.fields.get(name), expected) {
                (Some(Value::String(actual)), Value::String(needle)) => actual.contains(needle),
                (Some(actual), expected) => actual == expected,
                (None, _) => false,
            }
        })
    }
}
