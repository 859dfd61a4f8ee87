//! Comment controller.

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
use newsroom_core::{CommentId, ContentTarget, NewsId, NewsroomError, PageRequest, VideoId};
use newsroom_service::{
    CommentListResponse, CommentResponse, CreateCommentRequest, UpdateCommentRequest,
};
use serde::Deserialize;
use tracing::debug;

/// Query string of `GET /comments`. At most one of `news_id` / `video_id`.
#[derive(Debug, Default, Deserialize)]
pub struct CommentQuery {
    pub news_id: Option<String>,
    pub video_id: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl CommentQuery {
    fn target(&self) -> Result<Option<ContentTarget>, AppError> {
        let news_id = self
            .news_id
            .as_deref()
            .map(parse_path_id::<NewsId>)
            .transpose()?;
        let video_id = self
            .video_id
            .as_deref()
            .map(parse_path_id::<VideoId>)
            .transpose()?;

        match (news_id, video_id) {
            (Some(_), Some(_)) => Err(AppError(NewsroomError::validation(
                "Filter by news_id or video_id, not both",
            ))),
            (Some(id), None) => Ok(Some(ContentTarget::News(id))),
            (None, Some(id)) => Ok(Some(ContentTarget::Video(id))),
            (None, None) => Ok(None),
        }
    }

    fn page(&self) -> PageRequest {
        PaginationQuery {
            page: self.page,
            size: self.size,
        }
        .into()
    }
}

/// Creates the comment router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route(
            "/:id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentQuery>,
) -> ApiResult<CommentListResponse> {
    debug!("List comments request: {:?}", query);

    let response = state
        .comment_service
        .list_comments(query.target()?, query.page())
        .await?;
    ok(response)
}

async fn create_comment(
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), AppError> {
    debug!("Create comment request from user: {}", request.user_id);

    let response = state.comment_service.create_comment(request).await?;
    Ok(created(response))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CommentResponse> {
    let comment_id = parse_path_id::<CommentId>(&id)?;
    let response = state.comment_service.get_comment(comment_id).await?;
    ok(response)
}

async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCommentRequest>,
) -> ApiResult<CommentResponse> {
    debug!("Update comment request: {}", id);

    let comment_id = parse_path_id::<CommentId>(&id)?;
    let response = state.comment_service.update_comment(comment_id, request).await?;
    ok(response)
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete comment request: {}", id);

    let comment_id = parse_path_id::<CommentId>(&id)?;
    state.comment_service.delete_comment(comment_id).await?;
    Ok(no_content())
}
