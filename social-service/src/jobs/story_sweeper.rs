//! Story Expiry Sweep
//!
//! Periodically deletes stories older than the visibility window. The
//! read path already filters expired rows, so the sweep only reclaims
//! storage; it has no ordering dependency on request handling and is
//! safe to run while stories are being created (the cutoff predates any
//! story created after a run starts).

use crate::repository::StoryRepository;
use chrono::{Duration as ChronoDuration, Utc};
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Delete all stories past the visibility window; returns the count.
pub async fn sweep_expired_stories(
    db: &PgPool,
    ttl: ChronoDuration,
) -> Result<u64, sqlx::Error> {
    let cutoff = Utc::now() - ttl;
    let deleted = StoryRepository::new(db.clone())
        .delete_older_than(cutoff)
        .await?;

    if deleted > 0 {
        tracing::info!(deleted, %cutoff, "expired stories deleted");
    } else {
        tracing::debug!(%cutoff, "no expired stories");
    }
    Ok(deleted)
}

/// Run the sweep on a fixed interval until the task is dropped.
pub async fn start_story_sweeper(db: PgPool, ttl: ChronoDuration, interval: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        ttl_hours = ttl.num_hours(),
        "Starting story sweeper background job"
    );

    loop {
        sleep(interval).await;

        let cycle_start = Instant::now();
        match sweep_expired_stories(&db, ttl).await {
            Ok(deleted) => {
                tracing::info!(
                    deleted,
                    duration_ms = cycle_start.elapsed().as_millis(),
                    "Story sweep cycle completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    duration_ms = cycle_start.elapsed().as_millis(),
                    "Story sweep failed"
                );
            }
        }
    }
}
