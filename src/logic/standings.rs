//! Team standings: total points per team, ranked.

use crate::logic::integrity::IntegrityWarning;
use crate::logic::competition_ranks;
use crate::models::{EventResult, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the team scoreboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    #[serde(flatten)]
    pub team: Team,
    pub total_points: u64,
    /// 1-based; teams with equal totals share a rank.
    pub rank: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStandings {
    pub teams: Vec<TeamStanding>,
    pub warnings: Vec<IntegrityWarning>,
}

/// Sum winner and runner-up points per team and rank the teams.
///
/// Sorted by `total_points` descending; equal totals keep the order of `teams`.
/// Points for teams missing from `teams` are dropped and reported in `warnings`.
pub fn compute_team_standings(teams: &[Team], results: &[EventResult]) -> TeamStandings {
    let mut totals: HashMap<TeamId, u64> = teams.iter().map(|t| (t.id, 0)).collect();
    let mut warnings = Vec::new();

    for r in results {
        let placements = [
            (r.winner_team_id, r.winner_points),
            (r.runner_up_team_id, r.runner_up_points),
        ];
        for (team_id, points) in placements {
            let Some(team_id) = team_id else { continue };
            match totals.get_mut(&team_id) {
                Some(total) => *total += u64::from(points),
                None => warnings.push(IntegrityWarning::UnknownTeam {
                    result_id: r.id,
                    team_id,
                }),
            }
        }
    }

    let mut rows: Vec<TeamStanding> = teams
        .iter()
        .map(|t| TeamStanding {
            team: t.clone(),
            total_points: totals.get(&t.id).copied().unwrap_or(0),
            rank: 0,
        })
        .collect();
    // sort_by is stable: ties keep input order
    rows.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    let ranks = competition_ranks(rows.iter().map(|r| r.total_points));
    for (row, rank) in rows.iter_mut().zip(ranks) {
        row.rank = rank;
    }

    TeamStandings {
        teams: rows,
        warnings,
    }
}
