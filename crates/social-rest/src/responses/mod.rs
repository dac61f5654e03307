//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use social_core::{ErrorResponse, SocialError};
use tracing::error;

/// Message returned in place of the details of a server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub SocialError);

impl From<SocialError> for AppError {
    fn from(err: SocialError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            ErrorResponse::new(self.0.error_code(), INTERNAL_ERROR_MESSAGE)
        } else {
            ErrorResponse::from_error(&self.0)
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
