use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOwner {
    pub team: String,
    pub owner: String,
}

impl TeamOwner {
    pub fn label(&self) -> String {
        format!("{} ({})", self.team, self.owner)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "match", alias = "matchNumber")]
    pub match_number: u32,
    pub score: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub total_points: f64,
    #[serde(default)]
    pub matches: Vec<MatchResult>,
}

impl Team {
    pub fn latest_match(&self) -> Option<u32> {
        self.matches.iter().map(|m| m.match_number).max()
    }

    pub fn has_match_through(&self, last_match: u32) -> bool {
        self.matches.iter().any(|m| m.match_number <= last_match)
    }

    pub fn points_through(&self, last_match: u32) -> f64 {
        self.matches
            .iter()
            .filter(|m| m.match_number <= last_match)
            .map(|m| m.points)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub team: String,
    pub owner: String,
    pub points: f64,
    pub matches_played: usize,
    pub matches: Vec<MatchResult>,
    pub previous_rank: u32,
}

impl LeaderboardEntry {
    pub fn movement(&self) -> RankMovement {
        RankMovement::between(self.previous_rank, self.rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum RankMovement {
    Up { places: u32 },
    Down { places: u32 },
    Same,
}

impl RankMovement {
    pub fn between(previous: u32, current: u32) -> Self {
        if current < previous {
            RankMovement::Up {
                places: previous - current,
            }
        } else if current > previous {
            RankMovement::Down {
                places: current - previous,
            }
        } else {
            RankMovement::Same
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(rename = "match", alias = "matchNumber")]
    pub match_number: u32,
    pub date: String,
    #[serde(rename = "fixture", alias = "fixtureLabel")]
    pub fixture_label: String,
    pub time: String,
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringData {
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedScoring {
    pub teams: Vec<Team>,
    pub last_updated: String,
}
