//! Team data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A competing team. Its point total is derived from results, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display colour, e.g. "#FF6B35".
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            logo_url: None,
            created_at: Utc::now(),
        }
    }
}

/// Team fields accepted on create and update.
#[derive(Clone, Debug, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}
