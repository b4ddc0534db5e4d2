//! Request and Response models for the entity store API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateEntityRequest, ListQuery, UpdateEntityRequest};
pub use responses::{
    AuditResponse, DeleteResponse, ErrorResponse, HealthResponse, ListResponse, StatsResponse,
};
