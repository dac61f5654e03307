//! User-related DTOs.

use serde::{Deserialize, Serialize};
use social_core::{FieldError, NewUser, SocialError, SocialResult, User, UserId};
use utoipa::ToSchema;
use validator::Validate;

/// Payload of create and update requests.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a violation rather than a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(
        required(message = "Name is required"),
        custom(function = "social_core::rules::not_blank", message = "Name must not be blank"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    #[schema(example = "Ana", max_length = 255)]
    pub name: Option<String>,

    #[validate(
        required(message = "Age is required"),
        range(min = 0, message = "Age must be zero or greater")
    )]
    #[schema(example = 30, minimum = 0)]
    pub age: Option<i32>,
}

impl UserRequest {
    /// Creates a request with both fields present.
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
        }
    }

    /// Converts a validated payload into a store candidate.
    ///
    /// Fails with the required-field violations if a field is still missing.
    pub fn into_new_user(self) -> SocialResult<NewUser> {
        match (self.name, self.age) {
            (Some(name), Some(age)) => Ok(NewUser::new(name, age)),
            (name, age) => {
                let mut violations = Vec::new();
                if age.is_none() {
                    violations.push(FieldError::new("age", "Age is required", "required"));
                }
                if name.is_none() {
                    violations.push(FieldError::new("name", "Name is required", "required"));
                }
                Err(SocialError::validation(violations))
            }
        }
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = 30)]
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
        }
    }
}
