//! API Routes
//!
//! Configures the Axum router with all entity store endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    audit_handler, create_handler, delete_handler, get_handler, health_handler, list_handler,
    stats_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /entities` - Create an entity
/// - `GET /entities` - List entities with optional filter and pagination
/// - `GET /entities/:id` - Retrieve an entity by id
/// - `PATCH /entities/:id` - Partially update an entity
/// - `DELETE /entities/:id` - Delete an entity
/// - `GET /stats` - Get store statistics
/// - `GET /audit` - Get recent audit events
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/entities", post(create_handler).get(list_handler))
        .route("/entities/:id", get(get_handler))
        .route("/entities/:id", patch(update_handler))
        .route("/entities/:id", delete(delete_handler))
        .route("/stats", get(stats_handler))
        .route("/audit", get(audit_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
