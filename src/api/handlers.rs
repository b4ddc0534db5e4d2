//! API Handlers
//!
//! HTTP request handlers for each entity store endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::audit::{AuditAction, AuditLog};
use crate::error::{Result, StoreError};
use crate::models::{
    AuditResponse, CreateEntityRequest, DeleteResponse, HealthResponse, ListQuery, ListResponse,
    StatsResponse, UpdateEntityRequest,
};
use crate::store::{Entity, EntityStore};

/// Number of audit events returned by the audit endpoint.
const AUDIT_PAGE_SIZE: usize = 100;

/// Application state shared across all handlers.
///
/// The store and audit log are wrapped in Arc<RwLock<>> for
/// thread-safe access; all store access is serialized behind the one
/// lock so the cache always reflects the latest write.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe entity store
    pub store: Arc<RwLock<EntityStore>>,
    /// Thread-safe audit trail
    pub audit: Arc<RwLock<AuditLog>>,
}

impl AppState {
    /// Creates a new AppState with the given store and audit log.
    pub fn new(store: EntityStore, audit: AuditLog) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            audit: Arc::new(RwLock::new(audit)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(EntityStore::new(), AuditLog::new(config.audit_capacity))
    }
}

/// Handler for POST /entities
///
/// Creates a new entity, populating the read cache with it. Returns
/// 201 with the stored entity, 409 on an explicit id collision.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateEntityRequest>,
) -> Result<(StatusCode, Json<Entity>)> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let entity = {
        let mut store = state.store.write().await;
        store.create(req.fields, req.id)?
    };

    state.audit.write().await.record(
        AuditAction::Created,
        entity.id.clone(),
        format!("{} fields", entity.fields.len()),
    );

    Ok((StatusCode::CREATED, Json(entity)))
}

/// Handler for GET /entities/:id
///
/// Retrieves an entity by id through the read cache. 404 when absent.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entity>> {
    // Write lock: a cache-through read may refresh the cache and
    // always updates hit/miss counters
    let mut store = state.store.write().await;
    let entity = store.find_by_id(&id).ok_or(StoreError::NotFound(id))?;

    Ok(Json(entity))
}

/// Handler for GET /entities
///
/// Lists entities in insertion order with an optional field filter
/// (`?field=name&value=Ali`) and pagination (`?page=1&limit=20`).
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let filter = query.filter();
    let (page, limit) = query.pagination();

    let matches = {
        let store = state.store.read().await;
        store.find_all(filter.as_ref())
    };

    Ok(Json(ListResponse::paginate(matches, page, limit)))
}

/// Handler for PATCH /entities/:id
///
/// Shallow-merges the patch into the entity and refreshes the cache.
/// 404 when the id names no entity.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEntityRequest>,
) -> Result<Json<Entity>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let patched: Vec<&str> = req.fields.keys().map(String::as_str).collect();
    let detail = format!("patched: {}", patched.join(", "));

    let entity = {
        let mut store = state.store.write().await;
        store.update(&id, req.fields)?
    };

    state
        .audit
        .write()
        .await
        .record(AuditAction::Updated, entity.id.clone(), detail);

    Ok(Json(entity))
}

/// Handler for DELETE /entities/:id
///
/// Removes the entity and its cache entry. 404 when nothing was
/// removed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let removed = {
        let mut store = state.store.write().await;
        store.delete(&id)
    };

    if !removed {
        return Err(StoreError::NotFound(id));
    }

    state
        .audit
        .write()
        .await
        .record(AuditAction::Deleted, id.clone(), String::new());

    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /stats
///
/// Returns current store and cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.read().await;
    let stats = store.stats();

    Json(StatsResponse::from_stats(&stats))
}

/// Handler for GET /audit
///
/// Returns recent audit events, newest first.
pub async fn audit_handler(State(state): State<AppState>) -> Json<AuditResponse> {
    let audit = state.audit.read().await;

    Json(AuditResponse::new(audit.recent(AUDIT_PAGE_SIZE)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
