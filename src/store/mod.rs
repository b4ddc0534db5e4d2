//! Store Module
//!
//! Provides key-addressed in-memory entity storage with a transparent
//! read-through cache.

mod cache;
mod entity;
mod filter;
mod stats;
mod store;


// Re-export public types
pub use cache::ReadCache;
pub use entity::{Entity, EntityId};
pub use filter::FieldFilter;
pub use stats::StoreStats;
pub use store::EntityStore;

// == Public Constants ==
/// Maximum allowed entity id length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Field names owned by the entity envelope.
///
/// Consumer fields may not use these names: the field map is flattened
/// into the serialized entity, and a collision would emit duplicate
/// JSON keys that misreport the entity's identity.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];
