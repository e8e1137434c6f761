//! CSV roster import: `name,category,team` rows into roster entries.

use crate::models::{Category, RosterEntry, ScoreboardError};
use serde::Deserialize;
use std::fmt;

#[derive(Debug)]
pub enum RosterError {
    /// Malformed CSV or a missing column.
    Csv(csv::Error),
    /// A row has an unknown category.
    InvalidCategory { row: usize, source: ScoreboardError },
    /// Header only, or nothing at all.
    Empty,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid roster CSV: {}", e),
            RosterError::InvalidCategory { row, source } => write!(f, "Row {}: {}", row, source),
            RosterError::Empty => write!(f, "Roster contains no members"),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Csv(e) => Some(e),
            RosterError::InvalidCategory { source, .. } => Some(source),
            RosterError::Empty => None,
        }
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

#[derive(Deserialize)]
struct RosterRecord {
    name: String,
    category: String,
    team: String,
}

/// Parse a roster with header `name,category,team`. Fails on the first bad row.
pub fn parse_roster(input: &str) -> Result<Vec<RosterEntry>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let mut entries = Vec::new();
    for (idx, record) in reader.deserialize::<RosterRecord>().enumerate() {
        let record = record?;
        let row = idx + 1;
        let category: Category = record
            .category
            .parse()
            .map_err(|source| RosterError::InvalidCategory { row, source })?;
        entries.push(RosterEntry {
            row,
            name: record.name,
            category,
            team_name: record.team,
        });
    }

    if entries.is_empty() {
        return Err(RosterError::Empty);
    }
    Ok(entries)
}
