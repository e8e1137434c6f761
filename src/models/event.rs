//! Scheduled festival event.

use crate::models::category::{EventCategory, EventType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
pub type EventId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub category: EventCategory,
    pub event_type: EventType,
    /// Set once a result has been recorded.
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        event_date: DateTime<Utc>,
        category: EventCategory,
        event_type: EventType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            event_date,
            category,
            event_type,
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Event fields accepted on create and update.
#[derive(Clone, Debug, Deserialize)]
pub struct EventDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub category: EventCategory,
    pub event_type: EventType,
}
