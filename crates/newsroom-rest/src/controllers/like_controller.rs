//! Like endpoints, mounted next to the news and video routes.
//!
//! `/news/:id/likes` and `/videos/:id/likes` accept GET, POST and
//! `DELETE ?user_id=`. `/news/:id/stats` serves the last calculated totals.

use crate::{
    extractors::{parse_path_id, PathId},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use newsroom_core::{ContentTarget, NewsId, NewsroomError, UserId, VideoId};
use newsroom_service::{AddLikeRequest, LikeResponse, NewsStatsResponse};
use serde::Deserialize;
use tracing::debug;

/// Query string of `DELETE .../likes`.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveLikeQuery {
    pub user_id: Option<String>,
}

/// Content kinds that can be liked.
trait LikeTarget: PathId {
    fn target(self) -> ContentTarget;
}

impl LikeTarget for NewsId {
    fn target(self) -> ContentTarget {
        ContentTarget::News(self)
    }
}

impl LikeTarget for VideoId {
    fn target(self) -> ContentTarget {
        ContentTarget::Video(self)
    }
}

/// Like routes under `/news`.
pub fn news_router() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/likes",
            get(list_likes::<NewsId>)
                .post(add_like::<NewsId>)
                .delete(remove_like::<NewsId>),
        )
        .route("/:id/stats", get(news_stats))
}

/// Like routes under `/videos`.
pub fn video_router() -> Router<AppState> {
    Router::new().route(
        "/:id/likes",
        get(list_likes::<VideoId>)
            .post(add_like::<VideoId>)
            .delete(remove_like::<VideoId>),
    )
}

fn parse_target<T: LikeTarget>(raw: &str) -> Result<ContentTarget, AppError> {
    parse_path_id::<T>(raw).map(LikeTarget::target)
}

async fn list_likes<T: LikeTarget>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<LikeResponse>> {
    let target = parse_target::<T>(&id)?;
    debug!("List likes request: {}", target);

    let response = state.like_service.list_likes(target).await?;
    ok(response)
}

async fn add_like<T: LikeTarget>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddLikeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LikeResponse>>), AppError> {
    let target = parse_target::<T>(&id)?;
    debug!("Add like request: {} by {}", target, request.user_id);

    let response = state.like_service.add_like(target, request).await?;
    Ok(created(response))
}

async fn remove_like<T: LikeTarget>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RemoveLikeQuery>,
) -> Result<StatusCode, AppError> {
    let target = parse_target::<T>(&id)?;
    let user_id = query
        .user_id
        .as_deref()
        .ok_or_else(|| AppError(NewsroomError::validation("user_id is required")))
        .and_then(parse_path_id::<UserId>)?;
    debug!("Remove like request: {} by {}", target, user_id);

    state.like_service.remove_like(target, user_id).await?;
    Ok(no_content())
}

async fn news_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<NewsStatsResponse> {
    let news_id = parse_path_id::<NewsId>(&id)?;
    let response = state.like_service.news_stats(news_id).await?;
    ok(response)
}
