//! Periodic replacement sweep.
//!
//! Recomputes `total_usage_days` and `is_replacement_needed` for every active
//! item on a fixed interval using `tokio::time::interval`. The same sweep can
//! be triggered over HTTP; the store serializes the two with an advisory lock.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use stockroom_db::repositories::ItemRepo;
use tokio_util::sync::CancellationToken;

/// Run the replacement sweep loop until `cancel` is triggered.
///
/// The first sweep runs immediately on start.
pub async fn run(pool: PgPool, threshold_days: i32, every: Duration, cancel: CancellationToken) {
    tracing::info!(
        threshold_days,
        interval_secs = every.as_secs(),
        "Replacement sweep job started"
    );

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Replacement sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let today = Utc::now().date_naive();
                match ItemRepo::sweep_replacement(&pool, threshold_days, today).await {
                    Ok(items) => {
                        tracing::debug!(swept = items.len(), "Replacement sweep: pass complete");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Replacement sweep: pass failed");
                    }
                }
            }
        }
    }
}
