use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::FetchError;
use crate::leaderboard::build_leaderboard;
use crate::model::{CachedScoring, Fixture, LeaderboardEntry, ScoringData, Team, TeamOwner};
use crate::sheet_rows::{parse_fixtures_grid, parse_scoring_grid, parse_team_owners};
use crate::sheets_client::SheetSource;
use crate::snapshot_cache::{Snapshot, SnapshotCache};
use crate::views::{match_schedule, team_performance, ScheduledMatch, TeamPerformance};

pub const SCORING_RANGE: &str = "Scoring!A1:ZZ100";
pub const FIXTURES_RANGE: &str = "Fixtures!A1:E200";

pub type ScoringCache = SnapshotCache<Vec<Team>>;

pub struct DataService<S> {
    source: S,
    owner_labels: Vec<String>,
    scoring_cache: Option<Arc<ScoringCache>>,
}

impl<S: SheetSource> DataService<S> {
    pub fn new(
        source: S,
        owner_labels: Vec<String>,
        scoring_cache: Option<Arc<ScoringCache>>,
    ) -> Self {
        Self {
            source,
            owner_labels,
            scoring_cache,
        }
    }

    pub fn scoring_cache(&self) -> Option<&Arc<ScoringCache>> {
        self.scoring_cache.as_ref()
    }

    pub async fn fetch_scoring(&self) -> Result<ScoringData, FetchError> {
        Ok(ScoringData {
            teams: self.fetch_scoring_teams().await?,
        })
    }

    pub async fn fetch_fixtures(&self) -> Result<Vec<Fixture>, FetchError> {
        let rows = self.source.read_range(FIXTURES_RANGE).await?;
        parse_fixtures_grid(&rows)
    }

    pub fn fetch_team_owners(&self) -> Vec<TeamOwner> {
        parse_team_owners(&self.owner_labels)
    }

    /// Last polled scoring snapshot, or `NotYetAvailable` until the first poll lands.
    pub fn cached_scoring(&self) -> Result<CachedScoring, FetchError> {
        let snapshot = self
            .scoring_cache
            .as_ref()
            .and_then(|cache| cache.latest())
            .ok_or(FetchError::NotYetAvailable)?;
        Ok(CachedScoring {
            teams: snapshot.value.clone(),
            last_updated: snapshot.fetched_at.to_rfc3339(),
        })
    }

    /// One poll cycle. Without a cache configured this is a no-op.
    pub async fn refresh_scoring_cache(&self) -> bool {
        match &self.scoring_cache {
            Some(cache) => cache.refresh(self.fetch_scoring_teams()).await,
            None => false,
        }
    }

    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        match self.current_scoring().await {
            Ok(snapshot) => build_leaderboard(&snapshot.value, &self.fetch_team_owners()),
            Err(err) => {
                warn!(error = %err, "failed to fetch leaderboard data");
                Vec::new()
            }
        }
    }

    pub async fn team_performance(&self) -> Vec<TeamPerformance> {
        match self.current_scoring().await {
            Ok(snapshot) => team_performance(&snapshot.value, &self.fetch_team_owners()),
            Err(err) => {
                warn!(error = %err, "failed to fetch team performance data");
                Vec::new()
            }
        }
    }

    pub async fn match_schedule(&self, today: NaiveDate) -> Vec<ScheduledMatch> {
        match self.fetch_fixtures().await {
            Ok(fixtures) => match_schedule(&fixtures, today),
            Err(err) => {
                warn!(error = %err, "failed to fetch match schedule");
                Vec::new()
            }
        }
    }

    async fn fetch_scoring_teams(&self) -> Result<Vec<Team>, FetchError> {
        let rows = self.source.read_range(SCORING_RANGE).await?;
        parse_scoring_grid(&rows)
    }

    async fn current_scoring(&self) -> Result<Arc<Snapshot<Vec<Team>>>, FetchError> {
        if let Some(snapshot) = self.scoring_cache.as_ref().and_then(|cache| cache.latest()) {
            return Ok(snapshot);
        }
        let teams = self.fetch_scoring_teams().await?;
        Ok(Arc::new(Snapshot::new(teams)))
    }
}
