//! Entity Store Module
//!
//! Main store engine combining keyed storage with a read-through cache.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{Result, StoreError};
use crate::store::{
    Entity, EntityId, FieldFilter, ReadCache, StoreStats, MAX_KEY_LENGTH, RESERVED_FIELDS,
};

// == Entity Store ==
/// Key-addressed storage for entities with a transparent read cache.
///
/// Every operation completes, including the cache refresh, before it
/// returns, so a read issued after a write always sees that write.
#[derive(Debug)]
pub struct EntityStore {
    /// Backing entity storage
    entities: HashMap<EntityId, Entity>,
    /// Entity ids in insertion order
    order: Vec<EntityId>,
    /// Read-through cache
    cache: ReadCache,
    /// Performance statistics
    stats: StoreStats,
    /// Next auto-assigned id
    next_id: u64,
}

impl EntityStore {
    // == Constructor ==
    /// Creates a new empty EntityStore.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            order: Vec::new(),
            cache: ReadCache::new(),
            stats: StoreStats::new(),
            next_id: 1,
        }
    }

    // == Create ==
    /// Stores a new entity and populates the cache with it.
    ///
    /// When `explicit_id` is `None`, an id is drawn from the store's
    /// numeric sequence. An explicit id fails with `DuplicateKey` if
    /// it already names an entity. Field names reserved for the entity
    /// envelope are rejected with `InvalidRequest`.
    ///
    /// # Arguments
    /// * `fields` - Consumer-defined fields for the new entity
    /// * `explicit_id` - Optional caller-supplied id
    pub fn create(
        &mut self,
        fields: Map<String, Value>,
        explicit_id: Option<EntityId>,
    ) -> Result<Entity> {
        check_reserved_fields(&fields)?;

        let id = match explicit_id {
            Some(id) => {
                if id.is_empty() {
                    return Err(StoreError::InvalidRequest(
                        "Entity id cannot be empty".to_string(),
                    ));
                }
                if id.len() > MAX_KEY_LENGTH {
                    return Err(StoreError::InvalidRequest(format!(
                        "Entity id exceeds maximum length of {} bytes",
                        MAX_KEY_LENGTH
                    )));
                }
                if self.entities.contains_key(&id) {
                    return Err(StoreError::DuplicateKey(id));
                }
                id
            }
            None => self.next_auto_id(),
        };

        let entity = Entity::new(id.clone(), fields);
        self.entities.insert(id.clone(), entity.clone());
        self.order.push(id);

        // Cache reflects the new entity before the call returns
        self.cache.refresh(entity.clone());
        self.stats.set_total_entities(self.entities.len());

        Ok(entity)
    }

    // == Find By Id ==
    /// Retrieves an entity by id through the cache.
    ///
    /// Serves from the cache when possible; otherwise falls back to
    /// the backing storage and populates the cache on a hit. Absence
    /// is reported as `None`, never as an error.
    pub fn find_by_id(&mut self, id: &str) -> Option<Entity> {
        if let Some(cached) = self.cache.get(id) {
            self.stats.record_hit();
            return Some(cached.clone());
        }

        self.stats.record_miss();

        if let Some(entity) = self.entities.get(id) {
            let entity = entity.clone();
            self.stats.record_store_read();
            self.cache.refresh(entity.clone());
            Some(entity)
        } else {
            None
        }
    }

    // == Find All ==
    /// Returns all entities matching an optional filter, in insertion order.
    pub fn find_all(&self, filter: Option<&FieldFilter>) -> Vec<Entity> {
        self.order
            .iter()
            .filter_map(|id| self.entities.get(id))
            .filter(|entity| filter.map_or(true, |f| f.matches(entity)))
            .cloned()
            .collect()
    }

    // == Update ==
    /// Merges partial fields into an existing entity.
    ///
    /// Fails with `NotFound` if the id names no entity and with
    /// `InvalidRequest` if the patch names a reserved field, leaving
    /// the store unchanged either way. On success the cache is
    /// refreshed with the updated value before returning it.
    ///
    /// # Arguments
    /// * `id` - Id of the entity to update
    /// * `patch` - Partial fields to merge (null removes a field)
    pub fn update(&mut self, id: &str, patch: Map<String, Value>) -> Result<Entity> {
        check_reserved_fields(&patch)?;

        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        entity.apply_patch(patch);
        let updated = entity.clone();

        self.cache.refresh(updated.clone());

        Ok(updated)
    }

    // == Delete ==
    /// Removes an entity and its cache entry.
    ///
    /// Returns whether a removal occurred.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.entities.remove(id).is_none() {
            return false;
        }

        self.order.retain(|existing| existing != id);
        if self.cache.invalidate(id) {
            self.stats.record_invalidation();
        }
        self.stats.set_total_entities(self.entities.len());

        true
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entities(self.entities.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entities in the store.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // == Cached Len ==
    /// Returns the number of entries currently held by the read cache.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    // == Next Auto Id ==
    /// Draws the next unused id from the numeric sequence.
    ///
    /// Skips ids already taken by explicit creates.
    fn next_auto_id(&mut self) -> EntityId {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if !self.entities.contains_key(&id) {
                return id;
            }
        }
    }
}

// == Reserved Field Check ==
/// Rejects field maps that use names owned by the entity envelope.
fn check_reserved_fields(fields: &Map<String, Value>) -> Result<()> {
    for reserved in RESERVED_FIELDS {
        if fields.contains_key(reserved) {
            return Err(StoreError::InvalidRequest(format!(
                "Field name '{}' is reserved",
                reserved
            )));
        }
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_store_new() {
        let store = EntityStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = EntityStore::new();

        let first = store.create(fields(json!({"name": "Alice"})), None).unwrap();
        let second = store.create(fields(json!({"name": "Bob"})), None).unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_then_find_returns_equal_entity() {
        let mut store = EntityStore::new();

        let created = store
            .create(fields(json!({"name": "Alice", "age": 28})), None)
            .unwrap();
        let found = store.find_by_id(&created.id).unwrap();

        assert_eq!(found, created);
    }

    #[test]
    fn test_create_explicit_id() {
        let mut store = EntityStore::new();

        let entity = store
            .create(fields(json!({"name": "Alice"})), Some("user_42".to_string()))
            .unwrap();

        assert_eq!(entity.id, "user_42");
        assert!(store.find_by_id("user_42").is_some());
    }

    #[test]
    fn test_create_duplicate_explicit_id() {
        let mut store = EntityStore::new();

        store
            .create(fields(json!({})), Some("dup".to_string()))
            .unwrap();
        let result = store.create(fields(json!({})), Some("dup".to_string()));

        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_empty_explicit_id() {
        let mut store = EntityStore::new();

        let result = store.create(fields(json!({})), Some(String::new()));
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[test]
    fn test_create_explicit_id_too_long() {
        let mut store = EntityStore::new();
        let long_id = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = store.create(fields(json!({})), Some(long_id));
        match result {
            Err(StoreError::InvalidRequest(msg)) => assert!(msg.contains("bytes")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_reserved_field_names() {
        let mut store = EntityStore::new();

        for reserved in RESERVED_FIELDS {
            let mut spoofed = Map::new();
            spoofed.insert(reserved.to_string(), json!("spoofed"));

            let result = store.create(spoofed, None);
            assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_rejects_reserved_field_names_unchanged() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({"name": "Alice"})), None).unwrap();
        let result = store.update(&created.id, fields(json!({"id": "spoofed"})));

        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found.id, created.id);
        assert!(!found.fields.contains_key("id"));
    }

    #[test]
    fn test_entity_serializes_single_id_key() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({"name": "Alice"})), None).unwrap();
        let json = serde_json::to_string(&created).unwrap();

        assert_eq!(json.matches("\"id\"").count(), 1);
        assert_eq!(json.matches("\"created_at\"").count(), 1);
    }

    #[test]
    fn test_auto_id_skips_explicit_collision() {
        let mut store = EntityStore::new();

        store
            .create(fields(json!({})), Some("1".to_string()))
            .unwrap();
        let auto = store.create(fields(json!({})), None).unwrap();

        assert_eq!(auto.id, "2");
    }

    #[test]
    fn test_find_by_id_absent_returns_none() {
        let mut store = EntityStore::new();
        assert!(store.find_by_id("missing").is_none());
    }

    #[test]
    fn test_find_by_id_hits_cache() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({"name": "Alice"})), None).unwrap();
        store.find_by_id(&created.id).unwrap();
        store.find_by_id(&created.id).unwrap();

        let stats = store.stats();
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_misses, 0);
    }

    #[test]
    fn test_find_by_id_populates_cache_on_store_hit() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({"name": "Alice"})), None).unwrap();
        // Drop the cache entry without touching the backing store
        store.cache.invalidate(&created.id);

        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found, created);

        let stats = store.stats();
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.store_reads, 1);
        assert_eq!(store.cached_len(), 1);

        // Second read now comes from the cache
        store.find_by_id(&created.id).unwrap();
        assert_eq!(store.stats().cache_hits, 1);
    }

    #[test]
    fn test_find_all_insertion_order() {
        let mut store = EntityStore::new();

        store.create(fields(json!({"name": "Alice"})), None).unwrap();
        store.create(fields(json!({"name": "Bob"})), None).unwrap();
        store.create(fields(json!({"name": "Carol"})), None).unwrap();

        let all = store.find_all(None);
        let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_find_all_with_filter() {
        let mut store = EntityStore::new();

        store
            .create(fields(json!({"name": "Alice", "age": 28})), None)
            .unwrap();
        store
            .create(fields(json!({"name": "Bob", "age": 28})), None)
            .unwrap();
        store
            .create(fields(json!({"name": "Alfred", "age": 60})), None)
            .unwrap();

        let filter = FieldFilter::new().with_field("name", json!("Al"));
        let matched = store.find_all(Some(&filter));

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].fields["name"], json!("Alice"));
        assert_eq!(matched[1].fields["name"], json!("Alfred"));
    }

    #[test]
    fn test_update_merges_and_retains_fields() {
        let mut store = EntityStore::new();

        let created = store
            .create(fields(json!({"name": "Alice", "age": 28})), None)
            .unwrap();
        let updated = store.update(&created.id, fields(json!({"age": 29}))).unwrap();

        assert_eq!(updated.fields["age"], json!(29));
        assert_eq!(updated.fields["name"], json!("Alice"));

        // A read after the update sees the new value
        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found.fields["age"], json!(29));
    }

    #[test]
    fn test_update_missing_key_fails_and_leaves_store_unchanged() {
        let mut store = EntityStore::new();

        store.create(fields(json!({"name": "Alice"})), None).unwrap();
        let before = store.find_all(None);

        let result = store.update("missing", fields(json!({"age": 1})));
        assert!(matches!(result, Err(StoreError::NotFound(_))));

        assert_eq!(store.find_all(None), before);
    }

    #[test]
    fn test_update_refreshes_cache_before_returning() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({"age": 28})), None).unwrap();
        store.update(&created.id, fields(json!({"age": 29}))).unwrap();

        // Cache must already hold the patched value, so this is a hit
        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found.fields["age"], json!(29));
        assert_eq!(store.stats().cache_hits, 1);
        assert_eq!(store.stats().cache_misses, 0);
    }

    #[test]
    fn test_delete_removes_entity_and_cache_entry() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({"name": "Alice"})), None).unwrap();

        assert!(store.delete(&created.id));
        assert!(store.find_by_id(&created.id).is_none());
        assert_eq!(store.cached_len(), 0);
        assert_eq!(store.stats().invalidations, 1);
    }

    #[test]
    fn test_delete_twice_returns_false() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({})), None).unwrap();

        assert!(store.delete(&created.id));
        assert!(!store.delete(&created.id));
    }

    #[test]
    fn test_delete_nonexistent_returns_false() {
        let mut store = EntityStore::new();
        assert!(!store.delete("missing"));
    }

    #[test]
    fn test_create_update_delete_scenario() {
        let mut store = EntityStore::new();

        let created = store
            .create(fields(json!({"name": "Alice", "age": 28})), None)
            .unwrap();
        assert_eq!(created.id, "1");

        let found = store.find_by_id("1").unwrap();
        assert_eq!(found.fields["name"], json!("Alice"));
        assert_eq!(found.fields["age"], json!(28));

        store.update("1", fields(json!({"age": 29}))).unwrap();
        let found = store.find_by_id("1").unwrap();
        assert_eq!(found.fields["name"], json!("Alice"));
        assert_eq!(found.fields["age"], json!(29));

        assert!(store.delete("1"));
        assert!(store.find_by_id("1").is_none());
    }

    #[test]
    fn test_stats_snapshot() {
        let mut store = EntityStore::new();

        let created = store.create(fields(json!({})), None).unwrap();
        store.find_by_id(&created.id); // hit
        store.find_by_id("missing"); // miss

        let stats = store.stats();
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.total_entities, 1);
    }
}
