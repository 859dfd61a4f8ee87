//! User management controller.

use crate::{
    extractors::{parse_path_id, parse_query, PaginationQuery},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use newsroom_core::{Role, UserId};
use newsroom_service::{
    CreateUserRequest, UpdateUserRequest, UserFilter, UserListResponse, UserResponse,
};
use serde::Deserialize;
use tracing::debug;

/// Query string of `GET /users`. Nickname and email match on substrings.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl UserQuery {
    fn into_filter(self) -> Result<UserFilter, AppError> {
        Ok(UserFilter {
            nickname: self.nickname.filter(|n| !n.is_empty()),
            email: self.email.filter(|e| !e.is_empty()),
            role: parse_query::<Role>("role", self.role.as_deref())?,
            page: PaginationQuery {
                page: self.page,
                size: self.size,
            }
            .into(),
        })
    }
}

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<UserListResponse> {
    debug!("List users request: {:?}", query);

    let response = state.user_service.list_users(query.into_filter()?).await?;
    ok(response)
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Create user request: {}", request.nickname);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_path_id::<UserId>(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_path_id::<UserId>(&id)?;
    let response = state.user_service.update_user(user_id, request).await?;
    ok(response)
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_path_id::<UserId>(&id)?;
    state.user_service.delete_user(user_id).await?;
    Ok(no_content())
}
