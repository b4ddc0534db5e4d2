//! Request DTOs for the entity store API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::store::{FieldFilter, MAX_KEY_LENGTH, RESERVED_FIELDS};

/// Upper bound on the page size accepted by the list endpoint.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Request body for entity creation (POST /entities)
///
/// # Fields
/// - `id`: Optional explicit entity id (auto-assigned if absent)
/// - `fields`: Consumer-defined fields for the new entity
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntityRequest {
    /// Optional explicit id
    #[serde(default)]
    pub id: Option<String>,
    /// Entity fields
    pub fields: Map<String, Value>,
}

impl CreateEntityRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(id) = &self.id {
            if id.is_empty() {
                return Some("Entity id cannot be empty".to_string());
            }
            if id.len() > MAX_KEY_LENGTH {
                return Some(format!(
                    "Entity id exceeds maximum length of {} bytes",
                    MAX_KEY_LENGTH
                ));
            }
        }
        reserved_field_error(&self.fields)
    }
}

/// Request body for partial update (PATCH /entities/:id)
///
/// Patch fields are shallow-merged into the entity; a `null` value
/// removes the field. An empty patch is a valid no-op.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntityRequest {
    /// Partial fields to merge
    pub fields: Map<String, Value>,
}

impl UpdateEntityRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        reserved_field_error(&self.fields)
    }
}

/// Returns an error message if the field map names a reserved
/// envelope field (`id`, `created_at`, `updated_at`), None otherwise.
///
/// Consumer fields are flattened into the serialized entity, so a
/// reserved name would emit duplicate JSON keys.
fn reserved_field_error(fields: &Map<String, Value>) -> Option<String> {
    RESERVED_FIELDS
        .iter()
        .find(|reserved| fields.contains_key(**reserved))
        .map(|reserved| format!("Field name '{}' is reserved", reserved))
}

/// Query parameters for the list endpoint (GET /entities)
///
/// `field` and `value` form an optional filter pair; `page` and
/// `limit` paginate the result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Field name to filter on
    #[serde(default)]
    pub field: Option<String>,
    /// Value to match (strings match by substring)
    #[serde(default)]
    pub value: Option<String>,
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size (default: 20, max: 100)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Validates the query parameters
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match (&self.field, &self.value) {
            (Some(_), None) | (None, Some(_)) => {
                return Some("Filter requires both 'field' and 'value'".to_string());
            }
            _ => {}
        }
        if self.page == Some(0) {
            return Some("Page numbers start at 1".to_string());
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Some(format!("Limit must be between 1 and {}", MAX_PAGE_LIMIT));
            }
        }
        None
    }

    /// Builds the field filter described by the query, if any.
    ///
    /// The raw value is interpreted as JSON where possible (numbers,
    /// booleans) and falls back to a substring match on strings.
    pub fn filter(&self) -> Option<FieldFilter> {
        let (field, value) = match (&self.field, &self.value) {
            (Some(field), Some(value)) => (field, value),
            _ => return None,
        };

        let parsed = serde_json::from_str::<Value>(value)
            .ok()
            .filter(|v| v.is_number() || v.is_boolean())
            .unwrap_or_else(|| Value::String(value.clone()));

        Some(FieldFilter::new().with_field(field.clone(), parsed))
    }

    /// Returns the effective (page, limit) pair.
    pub fn pagination(&self) -> (usize, usize) {
        (self.page.unwrap_or(1), self.limit.unwrap_or(20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"fields": {"name": "Alice", "age": 28}}"#;
        let req: CreateEntityRequest = serde_json::from_str(json).unwrap();
        assert!(req.id.is_none());
        assert_eq!(req.fields["name"], json!("Alice"));
    }

    #[test]
    fn test_create_request_with_explicit_id() {
        let json = r#"{"id": "user_1", "fields": {}}"#;
        let req: CreateEntityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id.as_deref(), Some("user_1"));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_empty_explicit_id() {
        let req = CreateEntityRequest {
            id: Some(String::new()),
            fields: Map::new(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_explicit_id() {
        let req = CreateEntityRequest {
            id: Some("x".repeat(MAX_KEY_LENGTH + 1)),
            fields: Map::new(),
        };
        let error = req.validate().unwrap();
        assert!(error.contains("bytes"));
    }

    #[test]
    fn test_validate_reserved_field_name() {
        for reserved in RESERVED_FIELDS {
            let mut fields = Map::new();
            fields.insert(reserved.to_string(), json!("spoofed"));

            let req = CreateEntityRequest { id: None, fields };
            let error = req.validate().unwrap();
            assert!(error.contains(reserved));
        }
    }

    #[test]
    fn test_update_validate_reserved_field_name() {
        let mut fields = Map::new();
        fields.insert("updated_at".to_string(), json!("spoofed"));

        let req = UpdateEntityRequest { fields };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_update_validate_plain_fields() {
        let req = UpdateEntityRequest {
            fields: match json!({"age": 29}) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            },
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"fields": {"age": 29}}"#;
        let req: UpdateEntityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.fields["age"], json!(29));
    }

    #[test]
    fn test_list_query_filter_string() {
        let query = ListQuery {
            field: Some("name".to_string()),
            value: Some("Ali".to_string()),
            ..Default::default()
        };

        assert!(query.validate().is_none());
        assert!(query.filter().is_some());
    }

    #[test]
    fn test_list_query_filter_number() {
        let query = ListQuery {
            field: Some("age".to_string()),
            value: Some("28".to_string()),
            ..Default::default()
        };

        // "28" should be matched as the number 28, not the string "28"
        let filter = query.filter().unwrap();
        let entity = crate::store::Entity::new("1".to_string(), {
            let mut map = Map::new();
            map.insert("age".to_string(), json!(28));
            map
        });
        assert!(filter.matches(&entity));
    }

    #[test]
    fn test_list_query_filter_requires_both_parts() {
        let query = ListQuery {
            field: Some("name".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_some());
        assert!(query.filter().is_none());
    }

    #[test]
    fn test_list_query_pagination_defaults() {
        let query = ListQuery::default();
        assert!(query.validate().is_none());
        assert_eq!(query.pagination(), (1, 20));
    }

    #[test]
    fn test_list_query_rejects_zero_page() {
        let query = ListQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_some());
    }

    #[test]
    fn test_list_query_rejects_oversized_limit() {
        let query = ListQuery {
            limit: Some(MAX_PAGE_LIMIT + 1),
            ..Default::default()
        };
        assert!(query.validate().is_some());
    }
}
