//! Member data structure.

use crate::models::category::Category;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a member.
pub type MemberId = Uuid;

/// An individual participant, belonging to exactly one team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub category: Category,
    pub team_id: TeamId,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: impl Into<String>, category: Category, team_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            team_id,
            created_at: Utc::now(),
        }
    }
}

/// Member fields accepted on create.
#[derive(Clone, Debug, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    pub category: Category,
    pub team_id: TeamId,
}
