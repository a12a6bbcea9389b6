use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::data_service::DataService;
use crate::error::FetchError;
use crate::model::{LeaderboardEntry, RankMovement};
use crate::sheets_client::SheetSource;
use crate::views::last_updated_label;

pub fn build_router<S: SheetSource>(service: Arc<DataService<S>>) -> Router {
    Router::new()
        .route("/api/scoring", get(scoring_handler::<S>))
        .route("/api/scoring/cached", get(cached_scoring_handler::<S>))
        .route("/api/fixtures", get(fixtures_handler::<S>))
        .route("/api/teams", get(teams_handler::<S>))
        .route("/api/leaderboard", get(leaderboard_handler::<S>))
        .route("/api/performance", get(performance_handler::<S>))
        .route("/api/schedule", get(schedule_handler::<S>))
        .route("/api/status", get(status_handler::<S>))
        .with_state(service)
}

async fn scoring_handler<S: SheetSource>(State(service): State<Arc<DataService<S>>>) -> Response {
    match service.fetch_scoring().await {
        Ok(data) => Json(data).into_response(),
        Err(err) => fetch_failure(err, "Failed to fetch scoring data"),
    }
}

async fn cached_scoring_handler<S: SheetSource>(
    State(service): State<Arc<DataService<S>>>,
) -> Response {
    match service.cached_scoring() {
        Ok(data) => Json(data).into_response(),
        Err(err) => fetch_failure(err, "Failed to fetch scoring data"),
    }
}

async fn fixtures_handler<S: SheetSource>(State(service): State<Arc<DataService<S>>>) -> Response {
    match service.fetch_fixtures().await {
        Ok(fixtures) => Json(json!({ "fixtures": fixtures })).into_response(),
        Err(err) => fetch_failure(err, "Failed to fetch fixtures data"),
    }
}

async fn teams_handler<S: SheetSource>(State(service): State<Arc<DataService<S>>>) -> Response {
    Json(json!({ "teamOwners": service.fetch_team_owners() })).into_response()
}

#[derive(Debug, Serialize)]
struct LeaderboardRow {
    #[serde(flatten)]
    entry: LeaderboardEntry,
    movement: RankMovement,
}

async fn leaderboard_handler<S: SheetSource>(
    State(service): State<Arc<DataService<S>>>,
) -> Response {
    let rows: Vec<LeaderboardRow> = service
        .leaderboard()
        .await
        .into_iter()
        .map(|entry| LeaderboardRow {
            movement: entry.movement(),
            entry,
        })
        .collect();
    Json(json!({ "leaderboard": rows })).into_response()
}

async fn performance_handler<S: SheetSource>(
    State(service): State<Arc<DataService<S>>>,
) -> Response {
    Json(json!({ "teams": service.team_performance().await })).into_response()
}

async fn schedule_handler<S: SheetSource>(State(service): State<Arc<DataService<S>>>) -> Response {
    let today = Utc::now().date_naive();
    Json(json!({ "matches": service.match_schedule(today).await })).into_response()
}

async fn status_handler<S: SheetSource>(State(service): State<Arc<DataService<S>>>) -> Response {
    let cache = service.scoring_cache();
    let latest = cache.and_then(|c| c.latest());
    Json(json!({
        "lastUpdated": latest.as_ref().map(|s| s.fetched_at.to_rfc3339()),
        "label": latest.as_ref().map(|s| last_updated_label(s.fetched_at, Utc::now())),
        "refreshing": cache.is_some_and(|c| c.is_refreshing()),
    }))
    .into_response()
}

fn fetch_failure(err: FetchError, upstream_message: &str) -> Response {
    match err {
        FetchError::NoDataFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No data found" })),
        )
            .into_response(),
        FetchError::NotYetAvailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Data not available yet" })),
        )
            .into_response(),
        FetchError::Upstream(err) => {
            error!(error = %format!("{err:#}"), "{upstream_message}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": upstream_message })),
            )
                .into_response()
        }
    }
}
