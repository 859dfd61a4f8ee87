//! News controller.

use crate::{
    extractors::{parse_path_id, parse_query, split_list, PaginationQuery},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use newsroom_core::{Category, NewsId, UserId};
use newsroom_service::{
    CreateNewsRequest, NewsFilter, NewsListResponse, NewsResponse, UpdateNewsRequest,
};
use serde::Deserialize;
use tracing::debug;

/// Query string of `GET /news`.
///
/// `tags` is comma separated; an article matches when it carries any of them.
#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub author_id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl NewsQuery {
    fn into_filter(self) -> Result<NewsFilter, AppError> {
        Ok(NewsFilter {
            author_id: self
                .author_id
                .as_deref()
                .map(parse_path_id::<UserId>)
                .transpose()?,
            title: self.title,
            category: parse_query::<Category>("category", self.category.as_deref())?,
            tags: split_list(self.tags.as_deref()),
            page: PaginationQuery {
                page: self.page,
                size: self.size,
            }
            .into(),
        })
    }
}

/// Creates the news router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route("/:id", get(get_news).put(update_news).delete(delete_news))
}

async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<NewsListResponse> {
    debug!("List news request: {:?}", query);

    let response = state.news_service.list_news(query.into_filter()?).await?;
    ok(response)
}

async fn create_news(
    State(state): State<AppState>,
    Json(request): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NewsResponse>>), AppError> {
    debug!("Create news request: {}", request.title);

    let response = state.news_service.create_news(request).await?;
    Ok(created(response))
}

async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<NewsResponse> {
    debug!("Get news request: {}", id);

    let news_id = parse_path_id::<NewsId>(&id)?;
    let response = state.news_service.get_news(news_id).await?;
    ok(response)
}

async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateNewsRequest>,
) -> ApiResult<NewsResponse> {
    debug!("Update news request: {}", id);

    let news_id = parse_path_id::<NewsId>(&id)?;
    let response = state.news_service.update_news(news_id, request).await?;
    ok(response)
}

async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete news request: {}", id);

    let news_id = parse_path_id::<NewsId>(&id)?;
    state.news_service.delete_news(news_id).await?;
    Ok(no_content())
}
