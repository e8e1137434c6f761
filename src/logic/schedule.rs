//! Split events into completed, upcoming and awaiting a result.

use crate::models::{Event, EventId, EventResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventSchedule {
    /// Has a result. Most recent first.
    pub completed: Vec<Event>,
    /// No result, still in the future. Soonest first.
    pub upcoming: Vec<Event>,
    /// No result although the event date has passed. Oldest first.
    pub past_pending_results: Vec<Event>,
}

/// Partition `events` relative to `now`. Every event lands in exactly one bucket.
///
/// An event counts as completed if a result exists for it or it is flagged `is_completed`.
/// An event dated exactly `now` is past, not upcoming.
pub fn categorize_events(events: &[Event], results: &[EventResult], now: DateTime<Utc>) -> EventSchedule {
    let with_result: HashSet<EventId> = results.iter().map(|r| r.event_id).collect();
    let mut schedule = EventSchedule::default();

    for event in events {
        if event.is_completed || with_result.contains(&event.id) {
            schedule.completed.push(event.clone());
        } else if event.event_date > now {
            schedule.upcoming.push(event.clone());
        } else {
            schedule.past_pending_results.push(event.clone());
        }
    }

    schedule
        .completed
        .sort_by(|a, b| b.event_date.cmp(&a.event_date));
    schedule.upcoming.sort_by_key(|e| e.event_date);
    schedule.past_pending_results.sort_by_key(|e| e.event_date);
    schedule
}
