//! Scoreboard logic: standings, individual rankings, event schedule.
//!
//! Everything here is a pure function of its inputs.

mod integrity;
mod rankings;
mod schedule;
mod standings;

pub use integrity::{find_orphan_results, is_eligible, IntegrityWarning};
pub use rankings::{compute_individual_rankings, IndividualRankings, MemberRanking};
pub use schedule::{categorize_events, EventSchedule};
pub use standings::{compute_team_standings, TeamStanding, TeamStandings};

/// Competition ranks ("1224") for points already sorted descending.
fn competition_ranks(sorted_points: impl Iterator<Item = u64>) -> Vec<usize> {
    let mut ranks = Vec::new();
    let mut previous = None;
    for (idx, points) in sorted_points.enumerate() {
        let rank = match previous {
            Some((p, r)) if p == points => r,
            _ => idx + 1,
        };
        ranks.push(rank);
        previous = Some((points, rank));
    }
    ranks
}
