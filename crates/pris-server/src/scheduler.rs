//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring autonomous mission.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Cron expression: every 6 hours, on the hour.
const MISSION_SCHEDULE: &str = "0 0 */6 * * *";

/// Builds and starts the background job scheduler.
///
/// Registers the recurring mission and starts the scheduler. Returns the
/// running [`JobScheduler`] handle, which must be kept alive for the
/// lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: SqlitePool,
    config: Arc<pris_core::AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_mission_job(&scheduler, pool, config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the six-hourly autonomous mission.
///
/// Each tick runs the full pipeline for the configured default query.
/// Failures are logged and swallowed — a broken upstream must not take the
/// scheduler down with it.
async fn register_mission_job(
    scheduler: &JobScheduler,
    pool: SqlitePool,
    config: Arc<pris_core::AppConfig>,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);

    let job = Job::new_async(MISSION_SCHEDULE, move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!(query = %config.default_query, "scheduler: autonomous mission starting");
            match pris_mission::run_mission(&pool, &config, &config.default_query).await {
                Ok(report) => {
                    tracing::info!(
                        analyzed = report.analyzed,
                        flagged = report.flagged,
                        alert_sent = report.alert.sent,
                        "scheduler: autonomous mission complete"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "scheduler: autonomous mission failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
