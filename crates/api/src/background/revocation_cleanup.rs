//! Periodic purge of expired revocation records.
//!
//! A revoked token only needs to stay blacklisted while the token itself
//! could still verify; past that point the expiry check rejects it anyway.
//! This task deletes rows older than the retention window on a fixed
//! interval. Reads enforce the window themselves, so a delayed sweep never
//! resurrects a token.

use std::time::Duration;

use chrono::Utc;
use rydeline_db::repositories::RevokedTokenRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup sweep runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the revocation cleanup loop until `cancel` is triggered.
///
/// `retention_hours` comes from the same configuration as the session-token
/// lifetime: a record older than that cannot correspond to a verifiable
/// token any more.
pub async fn run(pool: PgPool, retention_hours: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_hours,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Revocation cleanup job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Revocation cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::hours(retention_hours);
                match RevokedTokenRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Revocation cleanup: purged expired records");
                    }
                    Ok(_) => {
                        tracing::debug!("Revocation cleanup: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Revocation cleanup: sweep failed");
                    }
                }
            }
        }
    }
}
