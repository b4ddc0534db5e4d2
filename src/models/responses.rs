//! Response DTOs for the entity store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::audit::AuditEvent;
use crate::store::{Entity, StoreStats};

/// Response body for the delete operation (DELETE /entities/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Entity '{}' deleted successfully", id),
            id,
        }
    }
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// Total number of matching entities
    pub total: usize,
    /// Total number of pages
    pub total_pages: usize,
}

/// Response body for the list operation (GET /entities)
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    /// Entities on the requested page
    pub data: Vec<Entity>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl ListResponse {
    /// Creates a ListResponse by paginating the full match set.
    ///
    /// A page past the end yields an empty data array with the same
    /// pagination metadata. Degenerate inputs are tolerated: `page` 0
    /// is treated as the first page and `limit` 0 yields an empty
    /// page with zero total pages.
    pub fn paginate(matches: Vec<Entity>, page: usize, limit: usize) -> Self {
        let total = matches.len();
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        let start = page.saturating_sub(1).saturating_mul(limit);
        let data = matches.into_iter().skip(start).take(limit).collect();

        Self {
            data,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads served from the cache
    pub cache_hits: u64,
    /// Number of reads that missed the cache
    pub cache_misses: u64,
    /// Number of cache misses satisfied by the backing store
    pub store_reads: u64,
    /// Number of cache entries removed by deletion
    pub invalidations: u64,
    /// Current number of entities
    pub total_entities: usize,
    /// Hit rate (cache_hits / (cache_hits + cache_misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from store statistics
    pub fn from_stats(stats: &StoreStats) -> Self {
        Self {
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            store_reads: stats.store_reads,
            invalidations: stats.invalidations,
            total_entities: stats.total_entities,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the audit endpoint (GET /audit)
#[derive(Debug, Clone, Serialize)]
pub struct AuditResponse {
    /// Recent events, newest first
    pub events: Vec<AuditEvent>,
    /// Number of events returned
    pub count: usize,
}

impl AuditResponse {
    /// Creates a new AuditResponse
    pub fn new(events: Vec<AuditEvent>) -> Self {
        let count = events.len();
        Self { events, count }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
