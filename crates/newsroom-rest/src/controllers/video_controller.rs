//! Video controller.

use crate::{
    extractors::{parse_path_id, PaginationQuery},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use newsroom_core::{UserId, VideoId};
use newsroom_service::{
    CreateVideoRequest, UpdateVideoRequest, VideoFilter, VideoListResponse, VideoResponse,
};
use serde::Deserialize;
use tracing::debug;

/// Query string of `GET /videos`.
#[derive(Debug, Default, Deserialize)]
pub struct VideoQuery {
    pub author_id: Option<String>,
    pub title: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl VideoQuery {
    fn into_filter(self) -> Result<VideoFilter, AppError> {
        Ok(VideoFilter {
            author_id: self
                .author_id
                .as_deref()
                .map(parse_path_id::<UserId>)
                .transpose()?,
            title: self.title,
            page: PaginationQuery {
                page: self.page,
                size: self.size,
            }
            .into(),
        })
    }
}

/// Creates the video router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_videos).post(create_video))
        .route("/:id", get(get_video).put(update_video).delete(delete_video))
}

async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> ApiResult<VideoListResponse> {
    debug!("List videos request: {:?}", query);

    let response = state.video_service.list_videos(query.into_filter()?).await?;
    ok(response)
}

async fn create_video(
    State(state): State<AppState>,
    Json(request): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VideoResponse>>), AppError> {
    debug!("Create video request: {}", request.title);

    let response = state.video_service.create_video(request).await?;
    Ok(created(response))
}

async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<VideoResponse> {
    let video_id = parse_path_id::<VideoId>(&id)?;
    let response = state.video_service.get_video(video_id).await?;
    ok(response)
}

async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVideoRequest>,
) -> ApiResult<VideoResponse> {
    debug!("Update video request: {}", id);

    let video_id = parse_path_id::<VideoId>(&id)?;
    let response = state.video_service.update_video(video_id, request).await?;
    ok(response)
}

async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete video request: {}", id);

    let video_id = parse_path_id::<VideoId>(&id)?;
    state.video_service.delete_video(video_id).await?;
    Ok(no_content())
}
