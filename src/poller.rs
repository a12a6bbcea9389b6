use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::data_service::DataService;
use crate::sheets_client::SheetSource;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3 * 60);

/// Refreshes the scoring cache right away and then every `every`.
///
/// Each tick spawns its own refresh, so a slow poll does not hold back the next one.
pub fn spawn_scoring_poller<S: SheetSource>(
    service: Arc<DataService<S>>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            debug!("polling scoring sheet");
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service.refresh_scoring_cache().await;
            });
        }
    })
}
