//! Festival: the authoritative collection of teams, members, events and results.

use crate::models::category::{Category, EventCategory, EventType};
use crate::models::event::{Event, EventDraft, EventId};
use crate::models::member::{Member, MemberDraft, MemberId};
use crate::models::result::{EventResult, PointsConfig, ResultDraft};
use crate::models::team::{Team, TeamDraft, TeamId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur while editing the festival.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FestivalError {
    /// A required name was empty after trimming.
    EmptyName,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName(String),
    TeamNotFound(TeamId),
    MemberNotFound(MemberId),
    EventNotFound(EventId),
    /// The event already has a result; results cannot be replaced.
    ResultAlreadyRecorded(EventId),
    /// Winner / runner-up fields do not match the event type.
    PlacementMismatch(EventType),
    /// Winner and runner-up are the same team or member.
    SameWinnerAndRunnerUp,
    /// The member's category is not admitted by the event category.
    IneligibleMember {
        member: MemberId,
        category: Category,
        event_category: EventCategory,
    },
    /// Category and event type of a completed event are locked.
    CompletedEventLocked(EventId),
    /// A roster row names a team that does not exist.
    UnknownTeamName { row: usize, name: String },
}

impl std::fmt::Display for FestivalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FestivalError::EmptyName => write!(f, "Name must not be empty"),
            FestivalError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            FestivalError::TeamNotFound(_) => write!(f, "Team not found"),
            FestivalError::MemberNotFound(_) => write!(f, "Member not found"),
            FestivalError::EventNotFound(_) => write!(f, "Event not found"),
            FestivalError::ResultAlreadyRecorded(_) => {
                write!(f, "A result has already been recorded for this event")
            }
            FestivalError::PlacementMismatch(EventType::Team) => {
                write!(f, "Team events need a winning team and no member placements")
            }
            FestivalError::PlacementMismatch(EventType::Individual) => {
                write!(f, "Individual events need a winning member and no team placements")
            }
            FestivalError::SameWinnerAndRunnerUp => {
                write!(f, "Winner and runner-up must be different")
            }
            FestivalError::IneligibleMember {
                category,
                event_category,
                ..
            } => write!(
                f,
                "{} members cannot be placed in a {:?} event",
                category, event_category
            ),
            FestivalError::CompletedEventLocked(_) => write!(
                f,
                "Category and event type cannot change once a result is recorded"
            ),
            FestivalError::UnknownTeamName { row, name } => {
                write!(f, "Row {}: no team named '{}'", row, name)
            }
        }
    }
}

impl std::error::Error for FestivalError {}

/// One validated roster line, ready to be turned into a member.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterEntry {
    /// 1-based data row number (header excluded), for error messages.
    pub row: usize,
    pub name: String,
    pub category: Category,
    pub team_name: String,
}

/// Everything the admin manages. Point totals are never stored here; see [`crate::logic`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Festival {
    pub teams: Vec<Team>,
    pub members: Vec<Member>,
    pub events: Vec<Event>,
    pub results: Vec<EventResult>,
    #[serde(default)]
    pub points_config: PointsConfig,
}

fn clean_name(name: &str) -> Result<String, FestivalError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FestivalError::EmptyName);
    }
    Ok(trimmed.to_string())
}

impl Festival {
    /// Create an empty festival with the default points configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty festival with the two opening teams.
    pub fn with_default_teams() -> Self {
        let mut festival = Self::new();
        festival.teams.push(Team::new("Team Maveli", "#FF6B35"));
        festival.teams.push(Team::new("Team Vamanan", "#4ECDC4"));
        festival
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn result_for_event(&self, event_id: EventId) -> Option<&EventResult> {
        self.results.iter().find(|r| r.event_id == event_id)
    }

    /// Members of one team, in roster order.
    pub fn members_of_team(&self, team_id: TeamId) -> Vec<Member> {
        self.members
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect()
    }

    fn ensure_unique_team_name(&self, name: &str, except: Option<TeamId>) -> Result<(), FestivalError> {
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| Some(t.id) != except && t.name.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(FestivalError::DuplicateTeamName(name.to_string()));
        }
        Ok(())
    }

    /// Add a team. Names must be unique (case-insensitive).
    pub fn add_team(&mut self, draft: TeamDraft) -> Result<Team, FestivalError> {
        let name = clean_name(&draft.name)?;
        self.ensure_unique_team_name(&name, None)?;
        let mut team = Team::new(name, draft.color.trim());
        team.logo_url = draft.logo_url;
        self.teams.push(team.clone());
        Ok(team)
    }

    /// Rename / recolour a team.
    pub fn update_team(&mut self, id: TeamId, draft: TeamDraft) -> Result<Team, FestivalError> {
        let name = clean_name(&draft.name)?;
        self.ensure_unique_team_name(&name, Some(id))?;
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(FestivalError::TeamNotFound(id))?;
        team.name = name;
        team.color = draft.color.trim().to_string();
        team.logo_url = draft.logo_url;
        Ok(team.clone())
    }

    /// Remove a team and its members. Returns the removed members.
    ///
    /// Results naming the team (or its members) are kept; they surface as integrity warnings.
    pub fn remove_team(&mut self, id: TeamId) -> Result<Vec<Member>, FestivalError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(FestivalError::TeamNotFound(id))?;
        self.teams.remove(idx);
        let (removed, kept): (Vec<Member>, Vec<Member>) =
            self.members.drain(..).partition(|m| m.team_id == id);
        self.members = kept;
        Ok(removed)
    }

    /// Add a member to an existing team.
    pub fn add_member(&mut self, draft: MemberDraft) -> Result<Member, FestivalError> {
        let name = clean_name(&draft.name)?;
        if self.team(draft.team_id).is_none() {
            return Err(FestivalError::TeamNotFound(draft.team_id));
        }
        let member = Member::new(name, draft.category, draft.team_id);
        self.members.push(member.clone());
        Ok(member)
    }

    pub fn remove_member(&mut self, id: MemberId) -> Result<(), FestivalError> {
        let idx = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(FestivalError::MemberNotFound(id))?;
        self.members.remove(idx);
        Ok(())
    }

    /// Add every roster entry as a member, or none if any entry names an unknown team.
    pub fn import_roster(&mut self, entries: &[RosterEntry]) -> Result<Vec<Member>, FestivalError> {
        let mut added = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = clean_name(&entry.name)?;
            let team_id = self
                .teams
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(entry.team_name.trim()))
                .map(|t| t.id)
                .ok_or_else(|| FestivalError::UnknownTeamName {
                    row: entry.row,
                    name: entry.team_name.trim().to_string(),
                })?;
            added.push(Member::new(name, entry.category, team_id));
        }
        self.members.extend(added.iter().cloned());
        Ok(added)
    }

    pub fn add_event(&mut self, draft: EventDraft) -> Result<Event, FestivalError> {
        let name = clean_name(&draft.name)?;
        let mut event = Event::new(name, draft.event_date, draft.category, draft.event_type);
        event.description = draft.description.trim().to_string();
        self.events.push(event.clone());
        Ok(event)
    }

    /// Edit an event. Once completed, its category and event type are fixed.
    pub fn update_event(&mut self, id: EventId, draft: EventDraft) -> Result<Event, FestivalError> {
        let name = clean_name(&draft.name)?;
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(FestivalError::EventNotFound(id))?;
        if event.is_completed
            && (event.category != draft.category || event.event_type != draft.event_type)
        {
            return Err(FestivalError::CompletedEventLocked(id));
        }
        event.name = name;
        event.description = draft.description.trim().to_string();
        event.event_date = draft.event_date;
        event.category = draft.category;
        event.event_type = draft.event_type;
        Ok(event.clone())
    }

    /// Remove an event together with its result, if any.
    pub fn remove_event(&mut self, id: EventId) -> Result<(), FestivalError> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(FestivalError::EventNotFound(id))?;
        self.events.remove(idx);
        self.results.retain(|r| r.event_id != id);
        Ok(())
    }

    /// Record the outcome of an event and mark it completed. Each event takes one result.
    pub fn record_result(&mut self, draft: ResultDraft) -> Result<EventResult, FestivalError> {
        let event = self
            .event(draft.event_id)
            .ok_or(FestivalError::EventNotFound(draft.event_id))?
            .clone();
        if event.is_completed || self.result_for_event(event.id).is_some() {
            return Err(FestivalError::ResultAlreadyRecorded(event.id));
        }

        match event.event_type {
            EventType::Team => self.check_team_placements(&draft)?,
            EventType::Individual => self.check_member_placements(&event, &draft)?,
        }

        let result = EventResult {
            id: Uuid::new_v4(),
            event_id: event.id,
            winner_team_id: draft.winner_team_id,
            winner_member_id: draft.winner_member_id,
            runner_up_team_id: draft.runner_up_team_id,
            runner_up_member_id: draft.runner_up_member_id,
            winner_points: draft
                .winner_points
                .unwrap_or(self.points_config.winner_points),
            runner_up_points: draft
                .runner_up_points
                .unwrap_or(self.points_config.runner_up_points),
            remarks: draft
                .remarks
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            created_at: Utc::now(),
        };
        self.results.push(result.clone());
        if let Some(e) = self.events.iter_mut().find(|e| e.id == event.id) {
            e.is_completed = true;
        }
        Ok(result)
    }

    fn check_team_placements(&self, draft: &ResultDraft) -> Result<(), FestivalError> {
        if draft.winner_member_id.is_some() || draft.runner_up_member_id.is_some() {
            return Err(FestivalError::PlacementMismatch(EventType::Team));
        }
        let winner = draft
            .winner_team_id
            .ok_or(FestivalError::PlacementMismatch(EventType::Team))?;
        self.team(winner).ok_or(FestivalError::TeamNotFound(winner))?;
        if let Some(runner_up) = draft.runner_up_team_id {
            if runner_up == winner {
                return Err(FestivalError::SameWinnerAndRunnerUp);
            }
            self.team(runner_up)
                .ok_or(FestivalError::TeamNotFound(runner_up))?;
        }
        Ok(())
    }

    fn check_member_placements(&self, event: &Event, draft: &ResultDraft) -> Result<(), FestivalError> {
        if draft.winner_team_id.is_some() || draft.runner_up_team_id.is_some() {
            return Err(FestivalError::PlacementMismatch(EventType::Individual));
        }
        let winner = draft
            .winner_member_id
            .ok_or(FestivalError::PlacementMismatch(EventType::Individual))?;
        if draft.runner_up_member_id == Some(winner) {
            return Err(FestivalError::SameWinnerAndRunnerUp);
        }
        for id in std::iter::once(winner).chain(draft.runner_up_member_id) {
            let member = self.member(id).ok_or(FestivalError::MemberNotFound(id))?;
            if !event.category.admits(member.category) {
                return Err(FestivalError::IneligibleMember {
                    member: id,
                    category: member.category,
                    event_category: event.category,
                });
            }
        }
        Ok(())
    }

    /// Replace the default points for future results.
    pub fn set_points_config(&mut self, config: PointsConfig) {
        self.points_config = config;
    }
}
