//! Server startup utilities.

use newsroom_config::{AppConfig, DatabaseBackend};
use tracing::info;

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", config.server.addr());
    info!("Health:    http://{}/health", config.server.addr());
    if config.observability.metrics_enabled {
        info!(
            "Metrics:   http://{}{}",
            config.server.addr(),
            config.observability.metrics_path
        );
    }
    info!("Backend:   {:?}", config.database.backend);
    info!(
        "Cache:     {} (ttl {}s, on write: {})",
        cache_backend(config),
        config.cache.ttl_secs,
        config.cache.invalidation
    );
    if config.jobs.enabled {
        info!("Jobs:      like stats on \"{}\"", config.jobs.news_stats_cron);
    }
    info!("{}", separator);
}

fn cache_backend(config: &AppConfig) -> &'static str {
    match config.database.backend {
        DatabaseBackend::Memory => "in-process",
        DatabaseBackend::Postgres if config.redis.enabled => "redis",
        DatabaseBackend::Postgres => "disabled",
    }
}
