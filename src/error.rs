//! Error types for the entity store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Unified error type for the entity store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Entity not found in the store
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Explicit id collides with an existing entity
    #[error("Duplicate entity id: {0}")]
    DuplicateKey(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::DuplicateKey(msg) => (StatusCode::CONFLICT, msg.clone()),
            StoreError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(ErrorResponse::new(message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the entity store.
pub type Result<T> = std::result::Result<T, StoreError>;
