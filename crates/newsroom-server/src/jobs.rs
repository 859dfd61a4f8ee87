//! Background scheduler wiring.

use newsroom_config::JobsConfig;
use newsroom_core::NewsroomResult;
use newsroom_service::{LikeService, NewsStatsJob, Scheduler};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Builds the scheduler with every recurring job, or `None` when jobs are
/// disabled. Fails on an invalid cron expression.
pub fn build_scheduler(
    config: &JobsConfig,
    like_service: Arc<dyn LikeService>,
) -> NewsroomResult<Option<Arc<Scheduler>>> {
    if !config.enabled {
        info!("Background jobs disabled");
        return Ok(None);
    }

    let scheduler = Scheduler::new(config.poll_interval());
    scheduler.schedule(
        &config.news_stats_cron,
        Arc::new(NewsStatsJob::new(like_service)),
    )?;

    Ok(Some(Arc::new(scheduler)))
}

/// Runs the scheduler on its own task.
pub fn spawn_scheduler(scheduler: Arc<Scheduler>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = scheduler.start().await {
            error!("Scheduler error: {}", e);
        }
    })
}
