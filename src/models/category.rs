//! Closed enumerations: member category, event category, event type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a category or event type string is not one of the known values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScoreboardError {
    /// Not `Adult`, `Kid` (or `Mixed` for events).
    InvalidCategory(String),
    /// Not `Team` or `Individual`.
    InvalidEventType(String),
}

impl fmt::Display for ScoreboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreboardError::InvalidCategory(v) => write!(f, "Unknown category '{}'", v),
            ScoreboardError::InvalidEventType(v) => {
                write!(f, "Unknown event type '{}' (expected Team or Individual)", v)
            }
        }
    }
}

impl std::error::Error for ScoreboardError {}

/// Age group of a member. Fixed at creation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Category {
    Adult,
    Kid,
}

/// Which members may take part in an event.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum EventCategory {
    Adult,
    Kid,
    Mixed,
}

/// Whether an event is won by a team or by a single member.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    Team,
    Individual,
}

impl EventCategory {
    /// True if a member of `category` may be placed in an event of this category.
    pub fn admits(self, category: Category) -> bool {
        match self {
            EventCategory::Mixed => true,
            EventCategory::Adult => category == Category::Adult,
            EventCategory::Kid => category == Category::Kid,
        }
    }
}

impl FromStr for Category {
    type Err = ScoreboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Adult" => Ok(Category::Adult),
            "Kid" => Ok(Category::Kid),
            other => Err(ScoreboardError::InvalidCategory(other.to_string())),
        }
    }
}

impl FromStr for EventCategory {
    type Err = ScoreboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Adult" => Ok(EventCategory::Adult),
            "Kid" => Ok(EventCategory::Kid),
            "Mixed" => Ok(EventCategory::Mixed),
            other => Err(ScoreboardError::InvalidCategory(other.to_string())),
        }
    }
}

impl FromStr for EventType {
    type Err = ScoreboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Team" => Ok(EventType::Team),
            "Individual" => Ok(EventType::Individual),
            other => Err(ScoreboardError::InvalidEventType(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Adult => f.write_str("Adult"),
            Category::Kid => f.write_str("Kid"),
        }
    }
}
