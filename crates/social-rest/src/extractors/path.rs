//! Path parameter parsing.

use crate::responses::AppError;
use social_core::{SocialError, UserId};

/// Parses a `{id}` path segment into a user id.
pub fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(SocialError::invalid_request(format!("Invalid user ID: {}", id))))
}
