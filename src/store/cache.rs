//! Read Cache Module
//!
//! In-memory cache of last-known entity values keyed by entity id.

use std::collections::HashMap;

use crate::store::{Entity, EntityId};

// == Read Cache ==
/// Cache of the last known value for each entity id.
///
/// Holds whatever create, update, and fallback reads put in it; there
/// is no expiration or eviction. The store keeps it in step with every
/// write so a read never observes a stale value within the process.
#[derive(Debug, Default)]
pub struct ReadCache {
    entries: HashMap<EntityId, Entity>,
}

impl ReadCache {
    // == Constructor ==
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Get ==
    /// Returns the cached entity for an id, if present.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entries.get(id)
    }

    // == Refresh ==
    /// Stores or overwrites the cached value for the entity's id.
    pub fn refresh(&mut self, entity: Entity) {
        self.entries.insert(entity.id.clone(), entity);
    }

    // == Invalidate ==
    /// Removes the cache entry for an id.
    ///
    /// Returns true if an entry was removed.
    pub fn invalidate(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    // == Contains ==
    /// Checks whether an id is cached.
    #[allow(dead_code)]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    // == Length ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
