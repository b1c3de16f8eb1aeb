use anyhow::{Context, Result};
use chrono::Duration as ChronoDuration;
use db_pool::{create_pool, DbConfig};
use social_service::config::Config;
use social_service::jobs::story_sweeper::start_story_sweeper;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting social service");

    let config = Config::from_env().context("failed to load configuration")?;

    let mut db_config =
        DbConfig::from_env("social-service").map_err(|e| anyhow::anyhow!(e))?;
    db_config.database_url = config.database.url.clone();
    db_config.max_connections = config.database.max_connections;
    db_config.min_connections = config.database.min_connections;

    let pool = create_pool(db_config)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    tracing::info!("Migrations applied");

    let ttl = ChronoDuration::hours(config.stories.ttl_hours);
    let sweep_interval = Duration::from_secs(config.stories.sweep_interval_secs);
    let sweeper = tokio::spawn(start_story_sweeper(pool.clone(), ttl, sweep_interval));

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping");
    sweeper.abort();

    Ok(())
}
