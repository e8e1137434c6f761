//! Data structures for the festival: teams, members, events, results.

mod category;
mod event;
mod festival;
mod member;
mod result;
mod team;

pub use category::{Category, EventCategory, EventType, ScoreboardError};
pub use event::{Event, EventDraft, EventId};
pub use festival::{Festival, FestivalError, RosterEntry};
pub use member::{Member, MemberDraft, MemberId};
pub use result::{EventResult, PointsConfig, ResultDraft, ResultId};
pub use team::{Team, TeamDraft, TeamId};
