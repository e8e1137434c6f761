//! Recorded event outcome and the default points configuration.

use crate::models::event::EventId;
use crate::models::member::MemberId;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a result.
pub type ResultId = Uuid;

/// The outcome of one event: a winner and an optional runner-up.
///
/// Team events populate the `*_team_id` fields, individual events the
/// `*_member_id` fields. The store guarantees exactly one winner field is set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventResult {
    pub id: ResultId,
    pub event_id: EventId,
    #[serde(default)]
    pub winner_team_id: Option<TeamId>,
    #[serde(default)]
    pub winner_member_id: Option<MemberId>,
    #[serde(default)]
    pub runner_up_team_id: Option<TeamId>,
    #[serde(default)]
    pub runner_up_member_id: Option<MemberId>,
    pub winner_points: u32,
    pub runner_up_points: u32,
    #[serde(default)]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EventResult {
    /// Result of a team event.
    pub fn for_teams(
        event_id: EventId,
        winner: TeamId,
        runner_up: Option<TeamId>,
        points: PointsConfig,
    ) -> Self {
        Self {
            winner_team_id: Some(winner),
            runner_up_team_id: runner_up,
            ..Self::empty(event_id, points)
        }
    }

    /// Result of an individual event.
    pub fn for_members(
        event_id: EventId,
        winner: MemberId,
        runner_up: Option<MemberId>,
        points: PointsConfig,
    ) -> Self {
        Self {
            winner_member_id: Some(winner),
            runner_up_member_id: runner_up,
            ..Self::empty(event_id, points)
        }
    }

    fn empty(event_id: EventId, points: PointsConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            winner_team_id: None,
            winner_member_id: None,
            runner_up_team_id: None,
            runner_up_member_id: None,
            winner_points: points.winner_points,
            runner_up_points: points.runner_up_points,
            remarks: None,
            created_at: Utc::now(),
        }
    }
}

/// Result fields accepted on create. Missing points fall back to the current [`PointsConfig`].
#[derive(Clone, Debug, Deserialize)]
pub struct ResultDraft {
    pub event_id: EventId,
    #[serde(default)]
    pub winner_team_id: Option<TeamId>,
    #[serde(default)]
    pub winner_member_id: Option<MemberId>,
    #[serde(default)]
    pub runner_up_team_id: Option<TeamId>,
    #[serde(default)]
    pub runner_up_member_id: Option<MemberId>,
    #[serde(default)]
    pub winner_points: Option<u32>,
    #[serde(default)]
    pub runner_up_points: Option<u32>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Default points used to pre-fill new results. Never applied retroactively.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointsConfig {
    pub winner_points: u32,
    pub runner_up_points: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            winner_points: 10,
            runner_up_points: 5,
        }
    }
}
