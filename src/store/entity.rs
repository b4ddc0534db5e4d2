//! Entity Module
//!
//! Defines the keyed record type managed by the store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Identifier for an entity. Auto-assigned ids are decimal strings
/// from a process-local sequence; callers may supply their own.
pub type EntityId = String;

// == Entity ==
/// A keyed record of consumer-defined JSON fields.
///
/// The store enforces nothing about the fields beyond the id being
/// present and unique at creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Unique entity id
    pub id: EntityId,
    /// Consumer-defined fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (UTC)
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    // == Constructor ==
    /// Creates a new entity with the given id and fields.
    ///
    /// Both timestamps are set to the current time.
    pub fn new(id: EntityId, fields: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    // == Apply Patch ==
    /// Shallow-merges a partial field map into this entity.
    ///
    /// Patch values replace existing fields of the same name and add
    /// fields that were absent. A `null` patch value removes the field
    /// (JSON merge-patch semantics). Unpatched fields are retained.
    /// `updated_at` is bumped to the current time.
    pub fn apply_patch(&mut self, patch: Map<String, Value>) {
        for (name, value) in patch {
            if value.is_null() {
                self.fields.remove(&name);
            } else {
                self.fields.insert(name, value);
            }
        }
        self.updated_at = Utc::now();
    }
}
