use anyhow::Result;
use localized_catalog::{config, scheduler, server};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_catalog=info".parse()?),
        )
        .init();

    info!("Starting localized catalog service");

    let config = config::Config::from_env()?;

    info!("Loading catalog from {}", config.catalog_source);
    let catalog = config.catalog_source.load().await?;

    if catalog.is_empty() {
        info!("Catalog is empty, serving anyway");
    }

    let refresh_cron = config.catalog_refresh_cron.clone();
    let state = Arc::new(server::AppState::new(config, catalog));

    // Keep the scheduler alive for the lifetime of the server
    let _scheduler = match refresh_cron {
        Some(cron) => Some(scheduler::start_scheduler(Arc::clone(&state), &cron).await?),
        None => None,
    };

    server::serve(state).await
}
