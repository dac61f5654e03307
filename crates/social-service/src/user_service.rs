//! User service trait definition.

use crate::dto::{UserRequest, UserResponse};
use async_trait::async_trait;
use social_core::{SocialResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validates the payload and stores a new user.
    async fn create_user(&self, request: UserRequest) -> SocialResult<UserResponse>;

    /// Lists all users.
    async fn list_users(&self) -> SocialResult<Vec<UserResponse>>;

    /// Validates the payload and replaces name and age of an existing user.
    async fn update_user(&self, id: UserId, request: UserRequest) -> SocialResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> SocialResult<()>;
}
