//! Individual rankings, split into adults and kids.

use crate::logic::competition_ranks;
use crate::logic::integrity::IntegrityWarning;
use crate::models::{Category, EventResult, Member, MemberId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MemberRanking {
    #[serde(flatten)]
    pub member: Member,
    pub individual_points: u64,
    /// 1-based within the member's category.
    pub rank: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct IndividualRankings {
    pub adults: Vec<MemberRanking>,
    pub kids: Vec<MemberRanking>,
    pub warnings: Vec<IntegrityWarning>,
}

/// Sum individual-event points per member and rank each category separately.
///
/// Only member placements count, so team-event results contribute nothing here.
/// Equal totals keep the order of `members`.
pub fn compute_individual_rankings(members: &[Member], results: &[EventResult]) -> IndividualRankings {
    let mut totals: HashMap<MemberId, u64> = members.iter().map(|m| (m.id, 0)).collect();
    let mut warnings = Vec::new();

    for r in results {
        let placements = [
            (r.winner_member_id, r.winner_points),
            (r.runner_up_member_id, r.runner_up_points),
        ];
        for (member_id, points) in placements {
            let Some(member_id) = member_id else { continue };
            match totals.get_mut(&member_id) {
                Some(total) => *total += u64::from(points),
                None => warnings.push(IntegrityWarning::UnknownMember {
                    result_id: r.id,
                    member_id,
                }),
            }
        }
    }

    let ranked = |category: Category| -> Vec<MemberRanking> {
        let mut rows: Vec<MemberRanking> = members
            .iter()
            .filter(|m| m.category == category)
            .map(|m| MemberRanking {
                member: m.clone(),
                individual_points: totals.get(&m.id).copied().unwrap_or(0),
                rank: 0,
            })
            .collect();
        rows.sort_by(|a, b| b.individual_points.cmp(&a.individual_points));
        let ranks = competition_ranks(rows.iter().map(|r| r.individual_points));
        for (row, rank) in rows.iter_mut().zip(ranks) {
            row.rank = rank;
        }
        rows
    };

    IndividualRankings {
        adults: ranked(Category::Adult),
        kids: ranked(Category::Kid),
        warnings,
    }
}
