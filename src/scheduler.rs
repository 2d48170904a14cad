use crate::server::SharedState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Start periodic catalog refreshes on a 6-field cron expression (UTC).
///
/// A failed refresh is logged and the catalog already in service is kept.
pub async fn start_scheduler(state: SharedState, cron_expr: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    info!("Scheduling catalog refresh (cron: {})", cron_expr);

    let job = Job::new_async(cron_expr, move |_uuid, _l| {
        let state = Arc::clone(&state);

        Box::pin(async move {
            info!("⏰ Scheduled catalog refresh triggered");
            if let Err(e) = state.reload().await {
                error!("Scheduled catalog refresh failed: {}", e);
            }
        })
    })
    .with_context(|| format!("Invalid CATALOG_REFRESH_CRON expression: {}", cron_expr))?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    info!("✓ Scheduler started");

    Ok(scheduler)
}
