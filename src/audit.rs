//! Audit Trail Module
//!
//! Bounded in-memory record of entity lifecycle events.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

// == Audit Action ==
/// Lifecycle action recorded by the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    /// Returns the action name used in log lines.
    fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }
}

// == Audit Event ==
/// A single recorded lifecycle event.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// What happened to the entity
    pub action: AuditAction,
    /// Id of the affected entity
    pub entity_id: String,
    /// Free-form detail (e.g. patched field names)
    pub detail: String,
    /// When the event was recorded (UTC)
    pub recorded_at: DateTime<Utc>,
}

// == Audit Log ==
/// Bounded ring of lifecycle events.
///
/// The newest `capacity` events are retained; older ones are dropped
/// silently. Events are also emitted as tracing log lines.
#[derive(Debug)]
pub struct AuditLog {
    events: VecDeque<AuditEvent>,
    capacity: usize,
}

impl AuditLog {
    // == Constructor ==
    /// Creates a new audit log retaining at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    // == Record ==
    /// Records a lifecycle event and emits a log line for it.
    pub fn record(&mut self, action: AuditAction, entity_id: impl Into<String>, detail: impl Into<String>) {
        let entity_id = entity_id.into();
        let detail = detail.into();

        info!(
            action = action.as_str(),
            entity_id = %entity_id,
            "audit: entity {} {}",
            entity_id,
            action.as_str()
        );

        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(AuditEvent {
            action,
            entity_id,
            detail,
            recorded_at: Utc::now(),
        });
    }

    // == Recent ==
    /// Returns up to `limit` events, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.events.iter().rev().take(limit).cloned().collect()
    }

    // == Length ==
    /// Returns the number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
