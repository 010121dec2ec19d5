//! Periodic background reload of a [`QuoteStore`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::store::QuoteStore;

/// Reload `store` every `every` until `shutdown` is cancelled.
///
/// The first reload happens one period after spawning; the initial load is the
/// caller's job. A failed reload is logged and the last good snapshot keeps
/// serving. Cancellation is observed mid-fetch too; the store never holds a lock
/// across an await, so dropping an in-flight refresh is safe.
pub fn spawn_refresh_task(
    store: Arc<QuoteStore>,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            source = store.source_name(),
            interval_secs = every.as_secs(),
            "quote refresh task started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                result = store.refresh() => {
                    if let Err(e) = result {
                        tracing::warn!(
                            source = store.source_name(),
                            error = %e,
                            "failed to refresh quotes, keeping previous snapshot"
                        );
                    }
                }
            }
        }

        tracing::info!(source = store.source_name(), "quote refresh task stopped");
    })
}
