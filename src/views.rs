use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::leaderboard::find_owner;
use crate::model::{Fixture, Team, TeamOwner};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformance {
    pub team: String,
    pub owner: String,
    pub total: f64,
    pub matches: Vec<MatchPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPoint {
    #[serde(rename = "match")]
    pub label: String,
    pub score: f64,
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Today,
    Past,
    Future,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledMatch {
    pub id: u32,
    pub date: String,
    pub fixture: String,
    pub time: String,
    pub venue: String,
    pub home: Option<String>,
    pub away: Option<String>,
    pub status: MatchStatus,
}

pub fn team_performance(teams: &[Team], owners: &[TeamOwner]) -> Vec<TeamPerformance> {
    teams
        .iter()
        .map(|team| TeamPerformance {
            team: display_name(&team.name).to_string(),
            owner: find_owner(&team.name, owners).to_string(),
            total: team.total_points,
            matches: team
                .matches
                .iter()
                .map(|m| MatchPoint {
                    label: format!("Match {}", m.match_number),
                    score: m.score,
                    points: m.points,
                })
                .collect(),
        })
        .collect()
}

pub fn match_schedule(fixtures: &[Fixture], today: NaiveDate) -> Vec<ScheduledMatch> {
    fixtures
        .iter()
        .map(|fixture| {
            let sides = fixture_sides(&fixture.fixture_label);
            ScheduledMatch {
                id: fixture.match_number,
                date: fixture.date.clone(),
                fixture: fixture.fixture_label.clone(),
                time: fixture.time.clone(),
                venue: fixture.venue.clone(),
                home: sides.map(|(home, _)| home.to_string()),
                away: sides.map(|(_, away)| away.to_string()),
                status: match_status(&fixture.date, today),
            }
        })
        .collect()
}

pub fn display_name(name: &str) -> &str {
    name.split(" (").next().unwrap_or(name)
}

pub fn fixture_sides(label: &str) -> Option<(&str, &str)> {
    label.split_once(" vs ")
}

/// Dates look like `"Mar 22, Sat"`; the year is taken from `today`.
pub fn match_status(date: &str, today: NaiveDate) -> MatchStatus {
    let head = date.split(',').next().unwrap_or_default();
    let mut parts = head.split_whitespace();
    let (Some(month), Some(day)) = (parts.next(), parts.next()) else {
        return MatchStatus::Unknown;
    };
    let candidate = format!("{month} {day} {}", today.year());
    let Ok(match_date) = NaiveDate::parse_from_str(&candidate, "%b %d %Y") else {
        return MatchStatus::Unknown;
    };
    if match_date == today {
        MatchStatus::Today
    } else if match_date < today {
        MatchStatus::Past
    } else {
        MatchStatus::Future
    }
}

pub fn last_updated_label(updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let clock = updated.format("%H:%M");
    match (now - updated).num_days() {
        days if days <= 0 => format!("Updated: Today at {clock}"),
        1 => format!("Updated: Yesterday at {clock}"),
        days => format!("Updated: {days} days ago at {clock}"),
    }
}
