//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newsroom_core::{ErrorResponse, NewsroomError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Standard API response wrapper.
///
/// Successful and failed calls share the same shape; `data` is `null` on
/// failure, `message` carries the error text and `error` the error code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            message: "Success".to_string(),
            status_code: status.as_u16(),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(error: ErrorResponse, status: StatusCode) -> ApiResponse<()> {
        ApiResponse {
            data: None,
            message: error.message.clone(),
            status_code: status.as_u16(),
            error: Some(error),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub NewsroomError);

impl From<NewsroomError> for AppError {
    fn from(err: NewsroomError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(
                code = self.0.error_code(),
                repository_failure = self.0.is_repository_failure(),
                "Request failed: {}",
                self.0
            );
        }

        let body = Json(ApiResponse::<()>::error(ErrorResponse::from_error(&self.0), status));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data, StatusCode::OK)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(data, StatusCode::CREATED)),
    )
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
