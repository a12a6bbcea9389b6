use std::cmp::Ordering;

use crate::model::{LeaderboardEntry, Team, TeamOwner};

pub const UNKNOWN_OWNER: &str = "Unknown";

#[derive(Debug, Clone)]
struct Standing<'a> {
    team: &'a Team,
    points: f64,
    rank: u32,
}

/// Ranks teams by total points and annotates each entry with the rank the team
/// held one match ago.
pub fn build_leaderboard(teams: &[Team], owners: &[TeamOwner]) -> Vec<LeaderboardEntry> {
    let current = rank_standings(teams.iter().map(|team| (team, team.total_points)));

    // Nothing played yet: everyone keeps their current rank.
    let cutoff = latest_match(teams).map(previous_cutoff);
    let previous = cutoff
        .map(|c| rank_standings(teams.iter().map(|team| (team, team.points_through(c)))))
        .unwrap_or_default();

    current
        .into_iter()
        .map(|standing| {
            // A team that had not played by the cutoff has no earlier rank of its own.
            let previous_rank = match cutoff {
                Some(c) if standing.team.has_match_through(c) => previous
                    .iter()
                    .find(|p| p.team.name == standing.team.name)
                    .map_or(standing.rank, |p| p.rank),
                _ => standing.rank,
            };
            LeaderboardEntry {
                rank: standing.rank,
                team: standing.team.name.clone(),
                owner: find_owner(&standing.team.name, owners).to_string(),
                points: standing.points,
                matches_played: standing.team.matches.len(),
                matches: standing.team.matches.clone(),
                previous_rank,
            }
        })
        .collect()
}

pub fn find_owner<'a>(team_name: &str, owners: &'a [TeamOwner]) -> &'a str {
    owners
        .iter()
        .find(|o| team_name.contains(o.team.as_str()) || o.team.contains(team_name))
        .map(|o| o.owner.as_str())
        .unwrap_or(UNKNOWN_OWNER)
}

pub fn latest_match(teams: &[Team]) -> Option<u32> {
    teams.iter().filter_map(Team::latest_match).max()
}

pub fn previous_cutoff(latest: u32) -> u32 {
    latest.saturating_sub(1).max(1)
}

/// Ranks for points already sorted in descending order.
///
/// A tie copies the preceding rank; the next distinct value falls back to its
/// 1-based position, so `[30, 30, 20]` ranks as `[1, 1, 3]`.
pub fn assign_ranks(sorted_points: &[f64]) -> Vec<u32> {
    let mut ranks: Vec<u32> = Vec::with_capacity(sorted_points.len());
    for (idx, points) in sorted_points.iter().enumerate() {
        let rank = match ranks.last() {
            Some(&prev_rank) if sorted_points[idx - 1] == *points => prev_rank,
            _ => idx as u32 + 1,
        };
        ranks.push(rank);
    }
    ranks
}

fn rank_standings<'a>(scored: impl Iterator<Item = (&'a Team, f64)>) -> Vec<Standing<'a>> {
    let mut standings: Vec<Standing<'a>> = scored
        .map(|(team, points)| Standing {
            team,
            points,
            rank: 0,
        })
        .collect();
    // Stable: equal totals keep sheet order.
    standings.sort_by(|a, b| b.points.partial_cmp(&a.points).unwrap_or(Ordering::Equal));

    let points: Vec<f64> = standings.iter().map(|s| s.points).collect();
    for (standing, rank) in standings.iter_mut().zip(assign_ranks(&points)) {
        standing.rank = rank;
    }
    standings
}
