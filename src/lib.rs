//! Entity Store - A lightweight in-memory entity store
//!
//! Provides key-addressed entity storage with a read-through cache,
//! filtered listing, and an in-memory audit trail.

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
