mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use kbl_dashboard::data_service::{FIXTURES_RANGE, SCORING_RANGE};
use kbl_dashboard::error::FetchError;
use kbl_dashboard::poller::spawn_scoring_poller;
use kbl_dashboard::views::MatchStatus;

use support::{cached_service, fixture_grid, league_sheet, live_service, FakeSheet};

#[tokio::test]
async fn fetch_scoring_reads_live_sheet() {
    let service = live_service(league_sheet());
    let data = service.fetch_scoring().await.expect("scoring should load");
    assert_eq!(data.teams.len(), 4);
}

#[tokio::test]
async fn fetch_scoring_distinguishes_no_data_from_upstream_failure() {
    let short = FakeSheet::default().with_range(
        SCORING_RANGE,
        vec![vec!["title".to_string()], vec!["Team A".to_string(), "10".to_string()]],
    );
    let err = live_service(short).fetch_scoring().await.unwrap_err();
    assert!(matches!(err, FetchError::NoDataFound));

    let err = live_service(FakeSheet::default()).fetch_scoring().await.unwrap_err();
    assert!(matches!(err, FetchError::Upstream(_)));
}

#[tokio::test]
async fn team_owners_come_from_labels() {
    let owners = live_service(FakeSheet::default()).fetch_team_owners();
    assert_eq!(owners.len(), 4);
    assert_eq!(owners[0].team, "Super Strikers");
    assert_eq!(owners[0].owner, "Alex");
}

#[tokio::test]
async fn cache_is_not_available_before_first_poll() {
    let service = cached_service(league_sheet());
    assert!(matches!(service.cached_scoring(), Err(FetchError::NotYetAvailable)));

    assert!(service.refresh_scoring_cache().await);
    let cached = service.cached_scoring().expect("cache should be filled");
    assert_eq!(cached.teams.len(), 4);
    assert!(!cached.last_updated.is_empty());
}

#[tokio::test]
async fn failed_poll_keeps_previous_snapshot() {
    let sheet = league_sheet();
    let service = cached_service(sheet.clone());
    assert!(service.refresh_scoring_cache().await);
    let before = service.cached_scoring().unwrap();

    sheet.clear_range(SCORING_RANGE);
    assert!(!service.refresh_scoring_cache().await);
    let after = service.cached_scoring().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn leaderboard_prefers_cached_snapshot() {
    let sheet = league_sheet();
    let service = cached_service(sheet.clone());
    service.refresh_scoring_cache().await;
    let reads_after_poll = sheet.reads();

    sheet.clear_range(SCORING_RANGE);
    let board = service.leaderboard().await;
    assert_eq!(board.len(), 4);
    assert_eq!(sheet.reads(), reads_after_poll);
}

#[tokio::test]
async fn composites_degrade_to_empty_on_failure() {
    let service = live_service(FakeSheet::default());
    assert!(service.leaderboard().await.is_empty());
    assert!(service.team_performance().await.is_empty());
    let today = NaiveDate::from_ymd_opt(2025, 3, 23).unwrap();
    assert!(service.match_schedule(today).await.is_empty());
}

#[tokio::test]
async fn schedule_annotates_status_and_sides() {
    let sheet = FakeSheet::default().with_range(FIXTURES_RANGE, fixture_grid("fixtures_values.json"));
    let service = live_service(sheet);
    let today = NaiveDate::from_ymd_opt(2025, 3, 23).unwrap();
    let schedule = service.match_schedule(today).await;
    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule[0].status, MatchStatus::Past);
    assert_eq!(schedule[0].home.as_deref(), Some("Kolkata Knight Riders"));
    assert_eq!(schedule[1].status, MatchStatus::Today);
    assert_eq!(schedule[2].status, MatchStatus::Future);
    assert!(schedule[2].away.is_none());
}

#[tokio::test]
async fn poller_fills_cache_on_first_tick() {
    let service = Arc::new(cached_service(league_sheet()));
    let handle = spawn_scoring_poller(Arc::clone(&service), Duration::from_secs(60));
    tokio::time::timeout(Duration::from_secs(5), async {
        while service.cached_scoring().is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("first poll should land");
    handle.abort();
    assert_eq!(service.cached_scoring().unwrap().teams.len(), 4);
}
