use tracing::warn;

use crate::error::FetchError;
use crate::model::{Fixture, MatchResult, Team, TeamOwner};

pub type Grid = Vec<Vec<String>>;

// Title, header and column-label rows.
pub const SCORING_HEADER_ROWS: usize = 3;
const MIN_SCORING_ROWS: usize = 3;

pub const FIXTURE_HEADER_ROWS: usize = 1;
const MIN_FIXTURE_ROWS: usize = 2;

const FIRST_MATCH_COLUMN: usize = 2;

pub fn parse_scoring_grid(rows: &[Vec<String>]) -> Result<Vec<Team>, FetchError> {
    if rows.len() < MIN_SCORING_ROWS {
        return Err(FetchError::NoDataFound);
    }
    Ok(rows
        .iter()
        .skip(SCORING_HEADER_ROWS)
        .filter_map(|row| parse_team_row(row))
        .collect())
}

/// Column 0 is the team name, column 1 the total, then `(score, points)` pairs.
pub fn parse_team_row(row: &[String]) -> Option<Team> {
    let name = row.first().map(|cell| cell.trim()).unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    let total_points = row.get(1).map(|cell| parse_number(cell)).unwrap_or(0.0);

    let matches = (FIRST_MATCH_COLUMN..row.len())
        .step_by(2)
        .filter(|&i| !row[i].is_empty())
        .map(|i| MatchResult {
            match_number: (i / 2) as u32,
            score: parse_number(&row[i]),
            points: row.get(i + 1).map(|cell| parse_number(cell)).unwrap_or(0.0),
        })
        .collect();

    Some(Team {
        name: name.to_string(),
        total_points,
        matches,
    })
}

pub fn parse_fixtures_grid(rows: &[Vec<String>]) -> Result<Vec<Fixture>, FetchError> {
    if rows.len() < MIN_FIXTURE_ROWS {
        return Err(FetchError::NoDataFound);
    }
    Ok(rows
        .iter()
        .skip(FIXTURE_HEADER_ROWS)
        .filter_map(|row| parse_fixture_row(row))
        .collect())
}

pub fn parse_fixture_row(row: &[String]) -> Option<Fixture> {
    let number = parse_number(cell(row, 0));
    if !number.is_finite() || number < 1.0 {
        return None;
    }
    Some(Fixture {
        match_number: number.floor() as u32,
        date: cell(row, 1).trim().to_string(),
        fixture_label: cell(row, 2).trim().to_string(),
        time: cell(row, 3).trim().to_string(),
        venue: cell(row, 4).trim().to_string(),
    })
}

/// Splits `"<team> (<owner>)"`. Labels without the `" ("` separator yield `None`.
pub fn parse_team_owner(label: &str) -> Option<TeamOwner> {
    let mut parts = label.split(" (");
    let team = parts.next()?;
    let rest = parts.next()?;
    let owner = rest.strip_suffix(')').unwrap_or(rest);
    Some(TeamOwner {
        team: team.to_string(),
        owner: owner.to_string(),
    })
}

pub fn parse_team_owners(labels: &[String]) -> Vec<TeamOwner> {
    labels
        .iter()
        .filter_map(|label| {
            let parsed = parse_team_owner(label);
            if parsed.is_none() {
                warn!(label = %label, "skipping team owner label without owner");
            }
            parsed
        })
        .collect()
}

/// Lenient float parsing: the longest numeric prefix wins, anything else is `0`.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        // -0 collapses to 0 like every other zero-ish cell.
        Ok(value) if value != 0.0 => value,
        _ => 0.0,
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or_default()
}
