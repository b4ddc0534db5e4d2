//! API Module
//!
//! HTTP handlers and routing for the entity store REST API.
//!
//! # Endpoints
//! - `POST /entities` - Create an entity
//! - `GET /entities` - List entities with optional filter and pagination
//! - `GET /entities/:id` - Retrieve an entity by id
//! - `PATCH /entities/:id` - Partially update an entity
//! - `DELETE /entities/:id` - Delete an entity
//! - `GET /stats` - Get store statistics
//! - `GET /audit` - Get recent audit events
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
