//! Dangling references between results and the roster / schedule.

use crate::models::{Category, Event, EventCategory, EventId, EventResult, MemberId, ResultId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A result points at something that no longer exists. Its points are left out of every total.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityWarning {
    UnknownTeam { result_id: ResultId, team_id: TeamId },
    UnknownMember { result_id: ResultId, member_id: MemberId },
    UnknownEvent { result_id: ResultId, event_id: EventId },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::UnknownTeam { result_id, team_id } => {
                write!(f, "result {} references unknown team {}", result_id, team_id)
            }
            IntegrityWarning::UnknownMember { result_id, member_id } => {
                write!(f, "result {} references unknown member {}", result_id, member_id)
            }
            IntegrityWarning::UnknownEvent { result_id, event_id } => {
                write!(f, "result {} references unknown event {}", result_id, event_id)
            }
        }
    }
}

/// Whether a member of `member_category` may win or place in an individual event of `event_category`.
pub fn is_eligible(event_category: EventCategory, member_category: Category) -> bool {
    event_category.admits(member_category)
}

/// Results whose event is missing from `events`.
pub fn find_orphan_results(events: &[Event], results: &[EventResult]) -> Vec<IntegrityWarning> {
    let known: HashSet<EventId> = events.iter().map(|e| e.id).collect();
    results
        .iter()
        .filter(|r| !known.contains(&r.event_id))
        .map(|r| IntegrityWarning::UnknownEvent {
            result_id: r.id,
            event_id: r.event_id,
        })
        .collect()
}
