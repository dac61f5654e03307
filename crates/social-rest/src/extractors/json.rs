//! JSON body extractor with the standard error body.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use social_core::SocialError;

/// JSON extractor whose rejections use the API error body.
///
/// A body over the size limit is reported as 413 `PAYLOAD_TOO_LARGE`. Any
/// other rejection (malformed JSON, wrong field types, missing content type)
/// is 400 `INVALID_REQUEST`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(
                AppError(SocialError::PayloadTooLarge(rejection.body_text())),
            ),
            Err(rejection) => Err(AppError(SocialError::invalid_request(
                rejection.body_text(),
            ))),
        }
    }
}
