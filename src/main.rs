use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kbl_dashboard::api::build_router;
use kbl_dashboard::config::{load_team_owner_labels, Config};
use kbl_dashboard::data_service::{DataService, ScoringCache};
use kbl_dashboard::poller::spawn_scoring_poller;
use kbl_dashboard::sheets_client::{GoogleSheetsClient, ServiceAccountKey};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kbl_dashboard=info")),
        )
        .init();

    let config = Config::from_env()?;
    let key = ServiceAccountKey::from_json(&config.service_account_key)?;
    let source = GoogleSheetsClient::new(config.spreadsheet_id.clone(), key);

    let owner_labels = load_team_owner_labels(&config.team_owners_file).unwrap_or_else(|err| {
        warn!(error = %format!("{err:#}"), "no team owners loaded; owners will show as Unknown");
        Vec::new()
    });

    let cache = config
        .scoring_cache
        .then(|| Arc::new(ScoringCache::new("scoring")));
    let service = Arc::new(DataService::new(source, owner_labels, cache));
    if config.scoring_cache {
        spawn_scoring_poller(Arc::clone(&service), config.poll_interval);
        info!(every_secs = config.poll_interval.as_secs(), "scoring poller started");
    }

    let app = build_router(service);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "dashboard api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}
