//! Festival scoreboard: library with models, scoreboard logic and the REST API.

pub mod api;
pub mod auth;
pub mod config;
pub mod logic;
pub mod models;
pub mod persistence;
pub mod roster;

pub use logic::{
    categorize_events, compute_individual_rankings, compute_team_standings, find_orphan_results,
    is_eligible, EventSchedule, IndividualRankings, IntegrityWarning, MemberRanking, TeamStanding,
    TeamStandings,
};
pub use models::{
    Category, Event, EventCategory, EventDraft, EventId, EventResult, EventType, Festival,
    FestivalError, Member, MemberDraft, MemberId, PointsConfig, ResultDraft, ResultId,
    RosterEntry, ScoreboardError, Team, TeamDraft, TeamId,
};
