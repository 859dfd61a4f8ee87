//! Main application router.

use crate::{
    controllers::{
        comment_controller, health_controller, like_controller, news_controller, user_controller,
        video_controller,
    },
    middleware::logging_middleware,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use newsroom_config::ServerConfig;
use newsroom_service::{CommentService, LikeService, NewsService, UserService, VideoService};
use shaku::{HasComponent, Module};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router from a Shaku module.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module
        + HasComponent<dyn NewsService>
        + HasComponent<dyn VideoService>
        + HasComponent<dyn UserService>
        + HasComponent<dyn CommentService>
        + HasComponent<dyn LikeService>,
{
    create_router_with_state(AppState::from_module(module), server_config)
}

/// Creates the main application router around an already built state.
pub fn create_router_with_state(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new()
        .nest(
            "/news",
            news_controller::router().merge(like_controller::news_router()),
        )
        .nest(
            "/videos",
            video_controller::router().merge(like_controller::video_router()),
        )
        .nest("/users", user_controller::router())
        .nest("/comments", comment_controller::router())
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout(server_config)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with news, video, user, comment and like endpoints under /api/v1");
    router
}

fn request_timeout(server_config: &ServerConfig) -> Duration {
    let timeout = server_config.request_timeout();
    if timeout.is_zero() {
        Duration::from_secs(30)
    } else {
        timeout
    }
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = server_config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> &'static str {
    "Newsroom API v1"
}
