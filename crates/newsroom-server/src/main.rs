//! # Newsroom Server
//!
//! Serves the news, video, user, comment and like REST API with a
//! read-through / write-invalidate cache in front of every collection list,
//! and runs the recurring like statistics job.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use newsroom_config::{AppConfig, ConfigLoader, DatabaseBackend, LogFormat, ObservabilityConfig};
use newsroom_core::{NewsroomError, NewsroomResult};
use newsroom_rest::create_router;
use newsroom_server::di::{
    build_memory_module, build_postgres_module, DatabaseResolver, ServiceResolver,
};
use newsroom_server::jobs::{build_scheduler, spawn_scheduler};
use newsroom_service::{LikeService, Scheduler};
use std::sync::Arc;
use newsroom_server::startup::print_startup_info;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    info!("Starting Newsroom Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> NewsroomResult<()> {
    info!("Environment: {}", config.app.environment);

    let metrics = install_metrics(&config.observability)?;

    match config.database.backend {
        DatabaseBackend::Postgres => {
            let module = build_postgres_module(&config).await?;
            let router = create_router(module.as_ref(), &config.server);
            run_with_jobs(&config, module.like_service(), async {
                serve(&config, with_metrics(router, &config.observability, metrics)).await
            })
            .await?;
            module.database_pool().close().await;
        }
        DatabaseBackend::Memory => {
            warn!("Using the in-memory backend; data is lost on shutdown");
            let module = build_memory_module(&config);
            let router = create_router(module.as_ref(), &config.server);
            run_with_jobs(&config, module.like_service(), async {
                serve(&config, with_metrics(router, &config.observability, metrics)).await
            })
            .await?;
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Runs `server` with the scheduler alongside, stopping the scheduler once
/// the server returns.
async fn run_with_jobs<F>(
    config: &AppConfig,
    like_service: Arc<dyn LikeService>,
    server: F,
) -> NewsroomResult<()>
where
    F: std::future::Future<Output = NewsroomResult<()>>,
{
    let scheduler: Option<Arc<Scheduler>> = build_scheduler(&config.jobs, like_service)?;
    let handle = scheduler.clone().map(spawn_scheduler);

    let result = server.await;

    if let (Some(scheduler), Some(handle)) = (scheduler, handle) {
        scheduler.stop();
        if let Err(e) = handle.await {
            warn!("Scheduler task ended abnormally: {}", e);
        }
    }

    result
}

async fn serve(config: &AppConfig, router: Router) -> NewsroomResult<()> {
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NewsroomError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NewsroomError::internal(format!("REST server error: {}", e)))
}

fn install_metrics(config: &ObservabilityConfig) -> NewsroomResult<Option<PrometheusHandle>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| NewsroomError::internal(format!("Failed to install metrics recorder: {}", e)))?;
    newsroom_service::cache::metrics::register_metrics();

    Ok(Some(handle))
}

fn with_metrics(
    router: Router,
    config: &ObservabilityConfig,
    handle: Option<PrometheusHandle>,
) -> Router {
    match handle {
        Some(handle) => router.route(
            &config.metrics_path,
            get(move || std::future::ready(handle.render())),
        ),
        None => router,
    }
}

fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},newsroom=debug,tower_http=debug",
            config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
